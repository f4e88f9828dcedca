//! Grid helpers for voxel placement.

use crate::core::types::Vec3;
use crate::voxel::face::Face;

/// A grid line segment on the ground plane
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub start: Vec3,
    pub end: Vec3,
}

/// Round half toward positive infinity, so `-0.5` snaps to `0`.
fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}

/// Snap a world position to the nearest multiple of `cell_size` on every axis.
pub fn snap_to_grid(position: Vec3, cell_size: f32) -> Vec3 {
    Vec3::new(
        round_half_up(position.x / cell_size) * cell_size,
        round_half_up(position.y / cell_size) * cell_size,
        round_half_up(position.z / cell_size) * cell_size,
    )
}

/// Cell targeted by a surface hit.
///
/// Adding steps half a cell out along `normal` before snapping (the empty
/// cell in front of the surface); removing steps half a cell in (the cell
/// that was hit).
pub fn calculate_voxel_position(point: Vec3, normal: Vec3, adding: bool) -> Vec3 {
    let offset = if adding { 0.5 } else { -0.5 };
    snap_to_grid(point + normal * offset, 1.0)
}

/// Whether `position` lies within a grid of edge `grid_size` centered on
/// the origin (inclusive).
pub fn is_in_bounds(position: Vec3, grid_size: u32) -> bool {
    let half = grid_size as f32 / 2.0;
    position.is_finite() && position.abs().max_element() <= half
}

/// Whether `position` is a cell center: integer X and Z, and `n + y_offset`
/// on Y.
pub fn is_grid_aligned(position: Vec3, y_offset: f32) -> bool {
    let cell = Vec3::new(position.x, position.y - y_offset, position.z);
    cell.is_finite() && cell.round() == cell
}

/// The six face-adjacent positions, in [`Face::ALL`] order.
pub fn neighbors(position: Vec3) -> [Vec3; 6] {
    Face::ALL.map(|face| position + face.normal())
}

/// Line segments for a `size` x `size` ground grid with `divisions` cells
/// per side. Lines alternate X-parallel and Z-parallel.
pub fn grid_lines(size: f32, divisions: u32) -> Vec<GridLine> {
    if divisions == 0 {
        return Vec::new();
    }
    let step = size / divisions as f32;
    let half = size / 2.0;

    let mut lines = Vec::with_capacity(2 * (divisions as usize + 1));
    for i in 0..=divisions {
        let offset = -half + i as f32 * step;
        lines.push(GridLine {
            start: Vec3::new(-half, 0.0, offset),
            end: Vec3::new(half, 0.0, offset),
        });
        lines.push(GridLine {
            start: Vec3::new(offset, 0.0, -half),
            end: Vec3::new(offset, 0.0, half),
        });
    }
    lines
}
