//! VoxelMap - snapshot index for O(1) neighbor lookup.

use std::collections::HashMap;

use crate::core::types::Vec3;
use crate::voxel::key::PositionKey;
use crate::voxel::voxel::Voxel;

/// Read-only position index over a voxel snapshot.
///
/// Built from a slice and discarded after use; it is never updated in
/// place. Duplicate positions resolve to the last voxel in the input.
pub struct VoxelMap<'a> {
    voxels: HashMap<PositionKey, &'a Voxel>,
}

impl<'a> VoxelMap<'a> {
    /// Index every voxel in `voxels` by position.
    pub fn build(voxels: impl IntoIterator<Item = &'a Voxel>) -> Self {
        let iter = voxels.into_iter();
        let mut map = HashMap::with_capacity(iter.size_hint().0);
        for voxel in iter {
            map.insert(voxel.key(), voxel);
        }
        Self { voxels: map }
    }

    /// Voxel occupying `position`, if any.
    pub fn get(&self, position: Vec3) -> Option<&'a Voxel> {
        self.get_key(PositionKey::from_position(position))
    }

    pub fn get_key(&self, key: PositionKey) -> Option<&'a Voxel> {
        self.voxels.get(&key).copied()
    }

    pub fn contains(&self, position: Vec3) -> bool {
        self.contains_key(PositionKey::from_position(position))
    }

    pub fn contains_key(&self, key: PositionKey) -> bool {
        self.voxels.contains_key(&key)
    }

    /// Number of distinct occupied positions.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }
}
