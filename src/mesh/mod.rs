//! Geometry emission for culled voxel faces

pub mod face_geometry;
pub mod vertex;
pub mod builder;

pub use face_geometry::{emit_face, FaceQuad, FACE_INDICES};
pub use vertex::Vertex;
pub use builder::{
    build_color_meshes, build_vertex_colored_mesh, group_by_color, mesh_bounds, ColorGroup, ColorMesh,
    MeshBuffers,
};
