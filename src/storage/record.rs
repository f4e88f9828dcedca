//! Five-number storage records.
//!
//! A record is `[x, y, z, side, color]` where
//! - `x` and `z` are negated relative to the editor,
//! - `y` has the editor's 0.5 vertical centering offset removed,
//! - `side` is reserved for per-face colors and is always written as 0,
//! - `color` is `0xRRGGBB`.
//!
//! Color quantization is asymmetric: encoding truncates each channel with
//! `floor(c * 255)`, decoding divides by 255 without rounding. Channels that
//! are exact multiples of 1/255 survive a round trip; anything else comes
//! back rounded down to the next representable value.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::core::Error;
use crate::voxel::key::PositionKey;
use crate::voxel::voxel::{Color, Voxel};

/// Vertical offset between editor centers and stored coordinates.
pub const Y_OFFSET: f32 = 0.5;

/// Largest packed color value.
pub const MAX_COLOR: u32 = 0xFF_FFFF;

/// Highest valid `side` value (a face index).
pub const MAX_SIDE: u8 = 5;

/// One voxel in storage coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "(f32, f32, f32, u8, u32)", try_from = "[f64; 5]")]
pub struct StorageRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Reserved; always 0 today.
    pub side: u8,
    pub color: u32,
}

impl From<StorageRecord> for (f32, f32, f32, u8, u32) {
    fn from(r: StorageRecord) -> Self {
        (r.x, r.y, r.z, r.side, r.color)
    }
}

impl TryFrom<[f64; 5]> for StorageRecord {
    type Error = Error;

    fn try_from([x, y, z, side, color]: [f64; 5]) -> Result<Self, Self::Error> {
        for (name, value) in [("x", x), ("y", y), ("z", z)] {
            if !value.is_finite() || value.abs() > f32::MAX as f64 {
                return Err(Error::Decode(format!("{} coordinate {} is not a finite f32", name, value)));
            }
        }
        let position = Vec3::new(-x as f32, y as f32 + Y_OFFSET, -z as f32);
        if !PositionKey::is_packable(position) {
            return Err(Error::Decode(format!(
                "position [{}, {}, {}] is outside the supported coordinate range",
                x, y, z
            )));
        }
        let side = whole_number("side", side, MAX_SIDE as f64)? as u8;
        let color = whole_number("color", color, MAX_COLOR as f64)? as u32;

        Ok(StorageRecord {
            x: x as f32,
            y: y as f32,
            z: z as f32,
            side,
            color,
        })
    }
}

fn whole_number(name: &str, value: f64, max: f64) -> Result<f64, Error> {
    if value.fract() != 0.0 || !(0.0..=max).contains(&value) {
        return Err(Error::Decode(format!(
            "{} must be an integer in 0..={}, got {}",
            name, max, value
        )));
    }
    Ok(value)
}

/// Pack a color as `0xRRGGBB`, truncating each channel.
pub fn rgb_to_int(color: Color) -> u32 {
    let [r, g, b] = color.to_rgb8();
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Unpack `0xRRGGBB` into normalized channels.
pub fn int_to_rgb(color: u32) -> Color {
    Color::from_rgb8((color >> 16 & 0xff) as u8, (color >> 8 & 0xff) as u8, (color & 0xff) as u8)
}

/// Editor voxel to storage record.
pub fn to_storage(voxel: &Voxel) -> StorageRecord {
    StorageRecord {
        x: -voxel.position.x,
        y: voxel.position.y - Y_OFFSET,
        z: -voxel.position.z,
        side: 0,
        color: rgb_to_int(voxel.color),
    }
}

/// Storage record back to an editor voxel.
pub fn from_storage(record: &StorageRecord) -> Voxel {
    Voxel::new(
        Vec3::new(-record.x, record.y + Y_OFFSET, -record.z),
        int_to_rgb(record.color),
    )
}

pub fn serialize_voxels(voxels: &[Voxel]) -> Vec<StorageRecord> {
    voxels.iter().map(to_storage).collect()
}

pub fn deserialize_voxels(records: &[StorageRecord]) -> Vec<Voxel> {
    records.iter().map(from_storage).collect()
}

/// Decode a JSON array of records.
pub fn decode_records(json: &str) -> crate::core::Result<Vec<StorageRecord>> {
    serde_json::from_str(json).map_err(|e| Error::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_inversion_and_offset() {
        let voxel = Voxel::at(2.0, 1.5, -3.0, Color::RED);
        let record = to_storage(&voxel);
        assert_eq!((record.x, record.y, record.z), (-2.0, 1.0, 3.0));
        assert_eq!(record.side, 0);
        assert_eq!(record.color, 0xFF0000);
    }

    #[test]
    fn test_round_trip_exact_for_8bit_colors() {
        for (r, g, b) in [(0, 0, 0), (255, 255, 255), (233, 23, 36), (1, 128, 254)] {
            let voxel = Voxel::at(-4.0, 0.5, 7.0, Color::from_rgb8(r, g, b));
            assert_eq!(from_storage(&to_storage(&voxel)), voxel);
        }
        for n in 0..=255u8 {
            let color = Color::from_rgb8(n, n, n);
            assert_eq!(int_to_rgb(rgb_to_int(color)), color, "channel {}", n);
        }
    }

    #[test]
    fn test_quantization_truncates() {
        // 0.999 * 255 = 254.7 -> 254, not 255
        let color = Color::new(0.999, 0.5, 0.0);
        assert_eq!(rgb_to_int(color), 254 << 16 | 127 << 8);
        let back = int_to_rgb(rgb_to_int(color));
        assert_eq!(back, Color::from_rgb8(254, 127, 0));
        assert_ne!(back, color);
    }

    #[test]
    fn test_json_shape() {
        let record = to_storage(&Voxel::at(1.0, 0.5, 0.0, Color::from_rgb8(0x12, 0x34, 0x56)));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, "[-1.0,0.0,-0.0,0,1193046]");

        let back: StorageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_decode_accepts_integers() {
        let records = decode_records("[[0, 0, 0, 0, 16777215], [-1.5, 2, 3, 0, 0]]").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].color, MAX_COLOR);
        assert_eq!(records[1].x, -1.5);
    }

    #[test]
    fn test_decode_rejects_malformed_records() {
        for bad in [
            "[[0, 0, 0, 0]]",
            "[[0, 0, 0, 0, 0, 0]]",
            "[[0, 0, \"z\", 0, 0]]",
            "[[0, 0, 0, 0, 1.5]]",
            "[[0, 0, 0, 0, -1]]",
            "[[0, 0, 0, 0, 16777216]]",
            "[[0, 0, 0, 9, 0]]",
            "[[0, 0, 0, 0.5, 0]]",
            "[[1e300, 0, 0, 0, 0]]",
            "[[-600000, 0, 0, 0, 255], [448577, 0, 0, 0, 255]]",
            "[[0, 524288, 0, 0, 0]]",
            "{}",
        ] {
            let result = decode_records(bad);
            assert!(matches!(result, Err(Error::Decode(_))), "accepted {}", bad);
        }
    }

    #[test]
    fn test_decode_accepts_range_edges() {
        let records = decode_records("[[524288, -0.5, -524287.5, 0, 0]]").unwrap();
        let voxel = from_storage(&records[0]);
        assert_eq!(voxel.position, Vec3::new(-524_288.0, 0.0, 524_287.5));
        assert!(PositionKey::is_packable(voxel.position));
    }

    #[test]
    fn test_batch_helpers_preserve_order() {
        let voxels = vec![
            Voxel::at(0.0, 0.5, 0.0, Color::RED),
            Voxel::at(1.0, 0.5, 0.0, Color::GREEN),
        ];
        let records = serialize_voxels(&voxels);
        assert_eq!(records[1].x, -1.0);
        assert_eq!(deserialize_voxels(&records), voxels);
    }
}
