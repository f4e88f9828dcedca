//! Voxel data structures, lookup, and face culling

pub mod voxel;
pub mod face;
pub mod key;
pub mod map;
pub mod culling;
pub mod grid;
pub mod palette;
pub mod pick;

pub use voxel::{Color, Voxel, VoxelSet};
pub use face::Face;
pub use key::PositionKey;
pub use map::VoxelMap;
pub use culling::{count_visible_faces, cull, visible_faces, VisibleFaces};
pub use pick::{raycast, RaycastHit};
