//! Undoable editing: commands, history and the editor session.

pub mod command;
pub mod history;
pub mod voxel_command;
pub mod editor;

pub use command::{Command, ExecuteMode};
pub use history::{History, HistoryState, UndoRedoState};
pub use voxel_command::{CommandKind, VoxelCommand};
pub use editor::{intent_for_hit, Editor, EditorTool, IgnoreReason, Intent, Outcome};
