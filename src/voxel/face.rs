//! Cube face directions

use serde::{Deserialize, Serialize};

use crate::core::types::{IVec3, Vec3};

/// One of the six faces of a voxel.
///
/// Discriminants are fixed and match the `side` codes used by the storage
/// format. [`Face::ALL`] is the canonical iteration and emission order.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    /// +Z
    Front = 0,
    /// -Z
    Back = 1,
    /// +Y
    Top = 2,
    /// -Y
    Bottom = 3,
    /// -X
    Left = 4,
    /// +X
    Right = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Top,
        Face::Bottom,
        Face::Left,
        Face::Right,
    ];

    /// Unit grid offset to the neighbor across this face
    pub const fn offset(self) -> IVec3 {
        match self {
            Face::Front => IVec3::Z,
            Face::Back => IVec3::NEG_Z,
            Face::Top => IVec3::Y,
            Face::Bottom => IVec3::NEG_Y,
            Face::Left => IVec3::NEG_X,
            Face::Right => IVec3::X,
        }
    }

    /// Outward unit normal
    pub fn normal(self) -> Vec3 {
        self.offset().as_vec3()
    }

    /// The face pointing the other way
    pub const fn opposite(self) -> Face {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
            Face::Left => Face::Right,
            Face::Right => Face::Left,
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Face> {
        Face::ALL.get(index as usize).copied()
    }

    /// Face whose normal matches `normal` exactly (axis-aligned unit vectors only)
    pub fn from_normal(normal: Vec3) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.normal() == normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip_and_order() {
        for (i, face) in Face::ALL.iter().enumerate() {
            assert_eq!(face.index() as usize, i);
            assert_eq!(Face::from_index(i as u8), Some(*face));
        }
        assert_eq!(Face::from_index(6), None);
    }

    #[test]
    fn test_offsets_are_opposed() {
        for face in Face::ALL {
            assert_eq!(face.offset() + face.opposite().offset(), IVec3::ZERO);
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn test_axis_directions() {
        assert_eq!(Face::Front.normal(), Vec3::Z);
        assert_eq!(Face::Back.normal(), Vec3::NEG_Z);
        assert_eq!(Face::Top.normal(), Vec3::Y);
        assert_eq!(Face::Bottom.normal(), Vec3::NEG_Y);
        assert_eq!(Face::Left.normal(), Vec3::NEG_X);
        assert_eq!(Face::Right.normal(), Vec3::X);
        assert_eq!(Face::from_normal(Vec3::NEG_X), Some(Face::Left));
        assert_eq!(Face::from_normal(Vec3::new(0.5, 0.5, 0.0)), None);
    }
}
