//! Voxel data types

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::voxel::key::PositionKey;

/// RGB color with channels normalized to [0, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    /// Create a color from normalized channels
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as `#RRGGBB`, truncating each channel to 8 bits
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// 8-bit channels, truncated (`floor(c * 255)`) after clamping to [0, 1]
    pub fn to_rgb8(&self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).floor() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Bit-exact grouping key. Two colors share a key iff every channel has
    /// the same `f32` bit pattern.
    pub fn bits_key(&self) -> [u32; 3] {
        [self.r.to_bits(), self.g.to_bits(), self.b.to_bits()]
    }
}

/// Single voxel: a unit cube at a grid position with a color.
///
/// Positions are integers on X and Z and `n + 0.5` on Y once placed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "VoxelRepr", into = "VoxelRepr")]
pub struct Voxel {
    pub position: Vec3,
    pub color: Color,
}

impl Voxel {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }

    pub fn at(x: f32, y: f32, z: f32, color: Color) -> Self {
        Self::new(Vec3::new(x, y, z), color)
    }

    /// Packed lookup key for this voxel's position
    pub fn key(&self) -> PositionKey {
        PositionKey::from_position(self.position)
    }

    /// Copy with a different color
    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }
}

/// Flat `{x, y, z, color}` shape used in JSON drafts
#[derive(Serialize, Deserialize)]
struct VoxelRepr {
    x: f32,
    y: f32,
    z: f32,
    color: Color,
}

impl From<VoxelRepr> for Voxel {
    fn from(repr: VoxelRepr) -> Self {
        Voxel::at(repr.x, repr.y, repr.z, repr.color)
    }
}

impl From<Voxel> for VoxelRepr {
    fn from(voxel: Voxel) -> Self {
        VoxelRepr {
            x: voxel.position.x,
            y: voxel.position.y,
            z: voxel.position.z,
            color: voxel.color,
        }
    }
}

/// Ordered collection of voxels making up a model.
///
/// Positions are compared exactly. The set does not reject duplicate
/// positions; [`crate::edit::Editor`] checks occupancy before adding.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoxelSet {
    voxels: Vec<Voxel>,
}

impl VoxelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Voxel> {
        self.voxels.iter()
    }

    pub fn as_slice(&self) -> &[Voxel] {
        &self.voxels
    }

    pub fn into_vec(self) -> Vec<Voxel> {
        self.voxels
    }

    /// Index of the first voxel at `position`
    pub fn position_of(&self, position: Vec3) -> Option<usize> {
        self.voxels.iter().position(|v| v.position == position)
    }

    /// Voxel at `position`
    pub fn find(&self, position: Vec3) -> Option<&Voxel> {
        self.voxels.iter().find(|v| v.position == position)
    }

    pub fn contains_position(&self, position: Vec3) -> bool {
        self.find(position).is_some()
    }

    /// Whether any voxel falls in the lookup cell `key`. Agrees with
    /// [`crate::voxel::VoxelMap`], which also indexes by key.
    pub fn contains_key(&self, key: PositionKey) -> bool {
        self.voxels.iter().any(|v| v.key() == key)
    }

    pub(crate) fn push(&mut self, voxel: Voxel) {
        self.voxels.push(voxel);
    }

    /// Insert at `index`, or append if the index is past the end
    pub(crate) fn insert_at(&mut self, index: usize, voxel: Voxel) {
        let index = index.min(self.voxels.len());
        self.voxels.insert(index, voxel);
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Option<Voxel> {
        (index < self.voxels.len()).then(|| self.voxels.remove(index))
    }

    /// Remove the most recently added voxel at `position`
    pub(crate) fn remove_last_at(&mut self, position: Vec3) -> Option<Voxel> {
        let index = self.voxels.iter().rposition(|v| v.position == position)?;
        Some(self.voxels.remove(index))
    }

    /// Recolor every voxel at `position`. Returns whether any matched.
    pub(crate) fn set_color_at(&mut self, position: Vec3, color: Color) -> bool {
        let mut found = false;
        for voxel in self.voxels.iter_mut().filter(|v| v.position == position) {
            voxel.color = color;
            found = true;
        }
        found
    }

    /// Swap in a new voxel list, returning the old one
    pub(crate) fn replace_all(&mut self, voxels: Vec<Voxel>) -> Vec<Voxel> {
        std::mem::replace(&mut self.voxels, voxels)
    }
}

impl From<Vec<Voxel>> for VoxelSet {
    fn from(voxels: Vec<Voxel>) -> Self {
        Self { voxels }
    }
}

impl FromIterator<Voxel> for VoxelSet {
    fn from_iter<I: IntoIterator<Item = Voxel>>(iter: I) -> Self {
        Self { voxels: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a VoxelSet {
    type Item = &'a Voxel;
    type IntoIter = std::slice::Iter<'a, Voxel>;

    fn into_iter(self) -> Self::IntoIter {
        self.voxels.iter()
    }
}
