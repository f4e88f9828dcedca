//! Voxedit - core of a grid voxel editor
//!
//! Voxel model, face culling, mesh building, model storage and undoable
//! editing. Rendering and input are left to the host application, which
//! feeds [`edit::Intent`]s into an [`edit::Editor`] and draws the meshes
//! from [`mesh::build_color_meshes`].

pub mod core;
pub mod math;
pub mod voxel;
pub mod mesh;
pub mod storage;
pub mod edit;
