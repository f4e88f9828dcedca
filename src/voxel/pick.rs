//! Ray picking against voxels and the ground plane.

use crate::core::types::Vec3;
use crate::math::{Aabb, Ray};
use crate::voxel::face::Face;
use crate::voxel::voxel::Voxel;

/// Result of casting a pointer ray into the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RaycastHit {
    /// The ray hit a voxel's surface.
    Voxel {
        voxel: Voxel,
        point: Vec3,
        face: Face,
    },
    /// The ray missed every voxel and hit the ground plane (`y = 0`).
    Grid {
        point: Vec3,
        cell_x: i32,
        cell_z: i32,
    },
}

impl RaycastHit {
    /// Outward normal of the surface that was hit.
    pub fn normal(&self) -> Vec3 {
        match self {
            RaycastHit::Voxel { face, .. } => face.normal(),
            RaycastHit::Grid { .. } => Vec3::Y,
        }
    }

    /// Voxel under the pointer, if the ray hit one.
    pub fn voxel(&self) -> Option<&Voxel> {
        match self {
            RaycastHit::Voxel { voxel, .. } => Some(voxel),
            RaycastHit::Grid { .. } => None,
        }
    }

    /// Where a new voxel goes when adding at this hit: next to the hit voxel
    /// across the hit face, or on the first layer above a grid cell.
    pub fn placement_position(&self, y_offset: f32) -> Vec3 {
        match self {
            RaycastHit::Voxel { voxel, face, .. } => voxel.position + face.normal(),
            RaycastHit::Grid { cell_x, cell_z, .. } => {
                Vec3::new(*cell_x as f32, y_offset, *cell_z as f32)
            }
        }
    }
}

/// Cast `ray` against unit voxels of edge `voxel_size`, falling back to the
/// ground plane. The nearest voxel wins.
pub fn raycast<'a>(
    ray: &Ray,
    voxels: impl IntoIterator<Item = &'a Voxel>,
    voxel_size: f32,
) -> Option<RaycastHit> {
    raycast_voxels(ray, voxels, voxel_size).or_else(|| raycast_grid(ray))
}

/// Nearest voxel hit along `ray`.
pub fn raycast_voxels<'a>(
    ray: &Ray,
    voxels: impl IntoIterator<Item = &'a Voxel>,
    voxel_size: f32,
) -> Option<RaycastHit> {
    let mut closest: Option<(f32, RaycastHit)> = None;

    for voxel in voxels {
        let bounds = Aabb::cube(voxel.position, voxel_size);
        let Some((t_near, _)) = ray.intersects_aabb(&bounds) else {
            continue;
        };
        if closest.as_ref().is_some_and(|(t, _)| *t <= t_near) {
            continue;
        }

        let point = ray.at(t_near);
        let face = Face::from_normal(bounds.face_normal_at(point)).unwrap_or(Face::Top);
        closest = Some((t_near, RaycastHit::Voxel { voxel: *voxel, point, face }));
    }

    closest.map(|(_, hit)| hit)
}

/// Hit on the ground plane, snapped to a grid cell.
pub fn raycast_grid(ray: &Ray) -> Option<RaycastHit> {
    let t = ray.intersects_horizontal_plane(0.0)?;
    let hit = ray.at(t);
    let cell_x = (hit.x + 0.5).floor() as i32;
    let cell_z = (hit.z + 0.5).floor() as i32;
    Some(RaycastHit::Grid {
        point: Vec3::new(cell_x as f32, 0.0, cell_z as f32),
        cell_x,
        cell_z,
    })
}
