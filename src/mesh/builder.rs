//! Mesh building from culled voxels.
//!
//! Culling always runs against the full model, so faces between two voxels
//! of different colors are dropped from both color groups.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::mesh::face_geometry::{emit_face, FaceQuad, FACE_INDICES};
use crate::mesh::vertex::Vertex;
use crate::voxel::culling::visible_faces;
use crate::voxel::map::VoxelMap;
use crate::voxel::voxel::{Color, Voxel};

/// Indexed triangle buffers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex colors; empty for per-group colored meshes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one quad as four vertices and two triangles.
    pub fn push_quad(&mut self, quad: &FaceQuad, color: Option<Color>) {
        let base = self.positions.len() as u32;
        for corner in quad.corners {
            self.positions.push(corner.to_array());
            self.normals.push(quad.normal.to_array());
            if let Some(color) = color {
                self.colors.push(color.to_array());
            }
        }
        self.indices.extend(FACE_INDICES.iter().map(|i| base + i));
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn face_count(&self) -> usize {
        self.positions.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Interleave into [`Vertex`] records. Vertices without a color get
    /// `fallback`.
    pub fn interleaved(&self, fallback: Color) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .enumerate()
            .map(|(i, (position, normal))| {
                let color = self.colors.get(i).copied().unwrap_or(fallback.to_array());
                Vertex::new(*position, *normal, color)
            })
            .collect()
    }
}

/// Voxels sharing one exact color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorGroup {
    pub color: Color,
    pub voxels: Vec<Voxel>,
}

/// Mesh for one color group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorMesh {
    pub color: Color,
    pub mesh: MeshBuffers,
}

/// Group voxels by exact color, ordered by first appearance.
pub fn group_by_color(voxels: &[Voxel]) -> Vec<ColorGroup> {
    let mut slots: HashMap<[u32; 3], usize> = HashMap::new();
    let mut groups: Vec<ColorGroup> = Vec::new();

    for voxel in voxels {
        let slot = *slots.entry(voxel.color.bits_key()).or_insert_with(|| {
            groups.push(ColorGroup { color: voxel.color, voxels: Vec::new() });
            groups.len() - 1
        });
        groups[slot].voxels.push(*voxel);
    }

    groups
}

fn append_voxel(
    mesh: &mut MeshBuffers,
    voxel: &Voxel,
    map: &VoxelMap<'_>,
    half_extent: f32,
    color: Option<Color>,
) {
    for face in visible_faces(voxel, map).iter() {
        mesh.push_quad(&emit_face(face, voxel.position, half_extent), color);
    }
}

/// One mesh per color group, culled against the whole model.
pub fn build_color_meshes(voxels: &[Voxel], half_extent: f32) -> Vec<ColorMesh> {
    let map = VoxelMap::build(voxels);

    let meshes: Vec<ColorMesh> = group_by_color(voxels)
        .into_iter()
        .map(|group| {
            let mut mesh = MeshBuffers::new();
            for voxel in &group.voxels {
                append_voxel(&mut mesh, voxel, &map, half_extent, None);
            }
            ColorMesh { color: group.color, mesh }
        })
        .collect();

    log::debug!(
        "Built {} color meshes ({} faces) from {} voxels",
        meshes.len(),
        meshes.iter().map(|m| m.mesh.face_count()).sum::<usize>(),
        voxels.len()
    );
    meshes
}

/// Single mesh with per-vertex colors, in voxel order.
pub fn build_vertex_colored_mesh(voxels: &[Voxel], half_extent: f32) -> MeshBuffers {
    let map = VoxelMap::build(voxels);
    let mut mesh = MeshBuffers::new();
    for voxel in voxels {
        append_voxel(&mut mesh, voxel, &map, half_extent, Some(voxel.color));
    }
    mesh
}

/// Bounds of the emitted geometry, if any.
pub fn mesh_bounds(mesh: &MeshBuffers) -> Option<(Vec3, Vec3)> {
    crate::math::Aabb::enclosing(mesh.positions.iter().map(|p| Vec3::from_array(*p)))
        .map(|aabb| (aabb.min, aabb.max))
}
