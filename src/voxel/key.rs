//! Packed position keys for voxel lookup

use crate::core::types::{IVec3, Vec3};
use crate::math::morton;
use crate::voxel::face::Face;

/// Composite integer key for a voxel position.
///
/// Coordinates are stored in half-units so that the `n + 0.5` vertical
/// convention stays integral, then Morton-packed into one `u64`. Supported
/// range is `[-2^19, 2^19)` units on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey(u64);

impl PositionKey {
    /// Key for a world position, snapped to the nearest half-unit
    pub fn from_position(position: Vec3) -> Self {
        Self::from_half_units(half_units(position))
    }

    /// Whether `position` is finite and inside the packable range, so that
    /// [`PositionKey::from_position`] gives a unique key.
    pub fn is_packable(position: Vec3) -> bool {
        position.is_finite() && morton::in_signed_range(half_units(position))
    }

    pub fn from_half_units(half_units: IVec3) -> Self {
        Self(morton::encode_signed(half_units))
    }

    pub fn half_units(self) -> IVec3 {
        morton::decode_signed(self.0)
    }

    /// Position this key was built from (after half-unit snapping)
    pub fn position(self) -> Vec3 {
        self.half_units().as_vec3() * 0.5
    }

    /// Key of the neighboring cell across `face`
    pub fn neighbor(self, face: Face) -> Self {
        Self::from_half_units(self.half_units() + face.offset() * 2)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

fn half_units(position: Vec3) -> IVec3 {
    (position * 2.0).round().as_ivec3()
}
