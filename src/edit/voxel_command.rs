//! Edit commands over a [`VoxelSet`].

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::edit::command::{Command, ExecuteMode};
use crate::voxel::voxel::{Color, Voxel, VoxelSet};

/// Kind of a [`VoxelCommand`], for status displays and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Add,
    Remove,
    Paint,
    ClearAll,
}

/// One reversible change to a voxel set.
///
/// Each variant holds the state needed to undo it, captured when the
/// command is built.
#[derive(Clone, Debug, PartialEq)]
pub enum VoxelCommand {
    Add {
        voxel: Voxel,
    },
    Remove {
        voxel: Voxel,
        /// Index the voxel occupied, so undo restores the original order
        index: usize,
    },
    Paint {
        position: Vec3,
        old_color: Color,
        new_color: Color,
    },
    ClearAll {
        previous: Vec<Voxel>,
    },
}

impl VoxelCommand {
    pub fn add(voxel: Voxel) -> Self {
        VoxelCommand::Add { voxel }
    }

    /// Removal of the voxel at `position`, if there is one.
    pub fn remove_from(voxels: &VoxelSet, position: Vec3) -> Option<Self> {
        let index = voxels.position_of(position)?;
        let voxel = voxels.as_slice()[index];
        Some(VoxelCommand::Remove { voxel, index })
    }

    /// Recolor of the voxel at `position`, if there is one.
    pub fn paint_from(voxels: &VoxelSet, position: Vec3, color: Color) -> Option<Self> {
        let voxel = voxels.find(position)?;
        Some(VoxelCommand::Paint {
            position,
            old_color: voxel.color,
            new_color: color,
        })
    }

    /// Removal of every voxel, remembering the current contents.
    pub fn clear_all_from(voxels: &VoxelSet) -> Self {
        VoxelCommand::ClearAll { previous: voxels.as_slice().to_vec() }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            VoxelCommand::Add { .. } => CommandKind::Add,
            VoxelCommand::Remove { .. } => CommandKind::Remove,
            VoxelCommand::Paint { .. } => CommandKind::Paint,
            VoxelCommand::ClearAll { .. } => CommandKind::ClearAll,
        }
    }
}

impl Command for VoxelCommand {
    type Target = VoxelSet;

    fn execute(&self, voxels: &mut VoxelSet, mode: ExecuteMode) {
        log::debug!("{:?} {:?}", mode, self.kind());
        match self {
            VoxelCommand::Add { voxel } => voxels.push(*voxel),
            VoxelCommand::Remove { voxel, index } => {
                if voxels.as_slice().get(*index) == Some(voxel) {
                    voxels.remove_at(*index);
                } else {
                    log::warn!("Voxel at {} moved since capture; removing by position", voxel.position);
                    voxels.remove_last_at(voxel.position);
                }
            }
            VoxelCommand::Paint { position, new_color, .. } => {
                voxels.set_color_at(*position, *new_color);
            }
            VoxelCommand::ClearAll { .. } => {
                voxels.replace_all(Vec::new());
            }
        }
    }

    fn undo(&self, voxels: &mut VoxelSet) {
        log::debug!("Undo {:?}", self.kind());
        match self {
            VoxelCommand::Add { voxel } => {
                voxels.remove_last_at(voxel.position);
            }
            VoxelCommand::Remove { voxel, index } => voxels.insert_at(*index, *voxel),
            VoxelCommand::Paint { position, old_color, .. } => {
                voxels.set_color_at(*position, *old_color);
            }
            VoxelCommand::ClearAll { previous } => {
                voxels.replace_all(previous.clone());
            }
        }
    }
}
