//! Fixed 16-color editing palette.

use crate::voxel::voxel::Color;

/// A palette slot with its numeric color code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub code: u8,
    /// 0xRRGGBB
    pub rgb: u32,
    pub name: &'static str,
}

impl PaletteEntry {
    const fn new(code: u8, rgb: u32, name: &'static str) -> Self {
        Self { code, rgb, name }
    }

    pub fn color(&self) -> Color {
        Color::from_rgb8((self.rgb >> 16) as u8, (self.rgb >> 8) as u8, self.rgb as u8)
    }

    pub fn hex(&self) -> String {
        format!("#{:06X}", self.rgb)
    }
}

/// Code of the color new voxels get by default (Light Gray).
pub const DEFAULT_VOXEL: u8 = 254;
/// Code of the initially selected color (Cyan).
pub const DEFAULT_SELECTED: u8 = 243;

/// Palette in display order (4x4, row-major).
pub const PALETTE: [PaletteEntry; 16] = [
    PaletteEntry::new(243, 0x00DFD3, "Cyan"),
    PaletteEntry::new(241, 0x005FDF, "Blue"),
    PaletteEntry::new(244, 0x32AE54, "Green"),
    PaletteEntry::new(242, 0x14DFFF, "Light Blue"),
    PaletteEntry::new(245, 0xACDB00, "Light Green"),
    PaletteEntry::new(253, 0x8D5735, "Brown"),
    PaletteEntry::new(246, 0xFBDA03, "Yellow"),
    PaletteEntry::new(252, 0xDD9863, "Tan"),
    PaletteEntry::new(247, 0xFEB329, "Orange"),
    PaletteEntry::new(251, 0xEFC5A0, "Beige"),
    PaletteEntry::new(248, 0xE91724, "Red"),
    PaletteEntry::new(254, 0xDADADA, "Light Gray"),
    PaletteEntry::new(250, 0xFF7BAE, "Pink"),
    PaletteEntry::new(255, 0xB2B3B4, "Gray"),
    PaletteEntry::new(249, 0x8E56AA, "Purple"),
    PaletteEntry::new(224, 0x4B4B4B, "Dark Gray"),
];

pub fn by_code(code: u8) -> Option<&'static PaletteEntry> {
    PALETTE.iter().find(|entry| entry.code == code)
}

/// Case-insensitive lookup by `#RRGGBB`
pub fn by_hex(hex: &str) -> Option<&'static PaletteEntry> {
    let rgb = Color::from_hex(hex)?.to_rgb8();
    let rgb = (rgb[0] as u32) << 16 | (rgb[1] as u32) << 8 | rgb[2] as u32;
    PALETTE.iter().find(|entry| entry.rgb == rgb)
}

/// Color for a palette code, falling back to the default voxel color.
pub fn color_or_default(code: u8) -> Color {
    by_code(code)
        .or_else(|| by_code(DEFAULT_VOXEL))
        .map(PaletteEntry::color)
        .unwrap_or(Color::WHITE)
}
