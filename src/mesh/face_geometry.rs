//! Per-face corner and normal table.

use crate::core::types::Vec3;
use crate::voxel::face::Face;

/// Triangle indices into a quad's corners: `[0, 1, 2]` and `[0, 2, 3]`.
pub const FACE_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Four corners and outward normal of one cube face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceQuad {
    pub corners: [Vec3; 4],
    pub normal: Vec3,
}

/// Corner signs for a unit cube face, scaled by the half-extent.
/// The order is fixed; consumers rely on it for consistent winding.
fn corner_signs(face: Face) -> [[f32; 3]; 4] {
    match face {
        Face::Front => [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
        Face::Back => [[1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0]],
        Face::Top => [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]],
        Face::Bottom => [[-1.0, -1.0, 1.0], [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0]],
        Face::Right => [[1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0]],
        Face::Left => [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
    }
}

/// Emit the quad for `face` of the cube centered at `center`.
pub fn emit_face(face: Face, center: Vec3, half_extent: f32) -> FaceQuad {
    let corners = corner_signs(face).map(|sign| center + Vec3::from_array(sign) * half_extent);
    FaceQuad {
        corners,
        normal: face.normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_face_corners() {
        let quad = emit_face(Face::Front, Vec3::new(1.0, 0.5, 0.0), 0.5);
        assert_eq!(quad.normal, Vec3::Z);
        assert_eq!(
            quad.corners,
            [
                Vec3::new(0.5, 0.0, 0.5),
                Vec3::new(1.5, 0.0, 0.5),
                Vec3::new(1.5, 1.0, 0.5),
                Vec3::new(0.5, 1.0, 0.5),
            ]
        );
    }

    #[test]
    fn test_corners_lie_on_face_plane() {
        let center = Vec3::new(-2.0, 3.5, 4.0);
        for face in Face::ALL {
            let quad = emit_face(face, center, 0.5);
            for corner in quad.corners {
                assert_eq!((corner - center).dot(quad.normal), 0.5, "{:?}", face);
            }
        }
    }

    #[test]
    fn test_winding_faces_outward() {
        // Triangle [0, 1, 2] must be counter-clockwise seen from outside.
        for face in Face::ALL {
            let c = emit_face(face, Vec3::ZERO, 0.5).corners;
            let winding = (c[1] - c[0]).cross(c[2] - c[0]).normalize();
            assert_eq!(winding, face.normal(), "{:?}", face);
        }
    }

    #[test]
    fn test_half_extent_scales_quad() {
        let quad = emit_face(Face::Top, Vec3::ZERO, 0.475);
        assert_eq!(quad.corners[0], Vec3::new(-0.475, 0.475, -0.475));
        assert_eq!(quad.corners[2], Vec3::new(0.475, 0.475, 0.475));
    }
}
