//! Face culling: which faces of a voxel border empty space.

use std::fmt;

use crate::voxel::face::Face;
use crate::voxel::map::VoxelMap;
use crate::voxel::voxel::Voxel;

/// Set of faces, one bit per [`Face`] discriminant.
///
/// Iterates in [`Face::ALL`] order regardless of insertion order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VisibleFaces(u8);

impl VisibleFaces {
    pub const NONE: VisibleFaces = VisibleFaces(0);
    pub const ALL: VisibleFaces = VisibleFaces(0b11_1111);

    pub fn insert(&mut self, face: Face) {
        self.0 |= 1 << face.index();
    }

    pub fn contains(&self, face: Face) -> bool {
        self.0 & (1 << face.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Face> + use<> {
        let set = *self;
        Face::ALL.into_iter().filter(move |face| set.contains(*face))
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl FromIterator<Face> for VisibleFaces {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        let mut set = VisibleFaces::NONE;
        for face in iter {
            set.insert(face);
        }
        set
    }
}

impl fmt::Debug for VisibleFaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Faces of `voxel` with no occupied neighbor in `map`.
///
/// Depends only on the voxel's position and the map's occupancy. A fully
/// enclosed voxel yields [`VisibleFaces::NONE`].
pub fn visible_faces(voxel: &Voxel, map: &VoxelMap<'_>) -> VisibleFaces {
    let key = voxel.key();
    Face::ALL
        .into_iter()
        .filter(|face| !map.contains_key(key.neighbor(*face)))
        .collect()
}

/// Cull every voxel in the set against the whole set.
pub fn cull(voxels: &[Voxel]) -> Vec<(Voxel, VisibleFaces)> {
    let map = VoxelMap::build(voxels);
    voxels
        .iter()
        .map(|voxel| (*voxel, visible_faces(voxel, &map)))
        .collect()
}

/// Total number of exposed faces in the model.
pub fn count_visible_faces(voxels: &[Voxel]) -> usize {
    let map = VoxelMap::build(voxels);
    voxels
        .iter()
        .map(|voxel| visible_faces(voxel, &map).len())
        .sum()
}
