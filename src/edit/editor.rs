//! Editing session: turns intents into commands and records them.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::core::{EditorConfig, Result};
use crate::edit::history::{History, HistoryState, UndoRedoState};
use crate::edit::voxel_command::{CommandKind, VoxelCommand};
use crate::mesh::builder::{build_color_meshes, ColorMesh};
use crate::storage::draft::DraftStore;
use crate::storage::model::{deserialize_model, serialize_model, ModelMetadata, SerializedModel};
use crate::voxel::grid::{is_grid_aligned, is_in_bounds};
use crate::voxel::key::PositionKey;
use crate::voxel::palette;
use crate::voxel::pick::RaycastHit;
use crate::voxel::voxel::{Color, Voxel, VoxelSet};

/// A requested edit, as produced by input handling or read from a script.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Intent {
    /// Place a voxel. Without a color the configured default is used.
    Add {
        position: Vec3,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
    },
    Remove { position: Vec3 },
    Paint { position: Vec3, color: Color },
    ClearAll,
    Undo,
    Redo,
}

/// Why an intent left the model untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// A voxel already sits at the target position.
    Occupied,
    /// Nothing at the target position (or nothing at all, for clear-all).
    Empty,
    /// Paint with the color the voxel already has.
    Unchanged,
    OutOfBounds,
    /// Not a cell center, or not a finite position.
    OffGrid,
    NothingToUndo,
    NothingToRedo,
}

/// Result of applying an [`Intent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Applied(CommandKind),
    Undone(CommandKind),
    Redone(CommandKind),
    Ignored(IgnoreReason),
}

impl Outcome {
    /// Whether the voxel set changed.
    pub fn changed(&self) -> bool {
        !matches!(self, Outcome::Ignored(_))
    }
}

/// Pointer tool selected in the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTool {
    #[default]
    Add,
    Remove,
    Paint,
}

/// Intent for clicking with `tool` at `hit`.
///
/// Removing or painting needs a voxel under the pointer; adding works on
/// voxels (next to the hit face) and on the ground grid.
pub fn intent_for_hit(tool: EditorTool, hit: &RaycastHit, color: Color, y_offset: f32) -> Option<Intent> {
    match tool {
        EditorTool::Add => Some(Intent::Add {
            position: hit.placement_position(y_offset),
            color: Some(color),
        }),
        EditorTool::Remove => hit.voxel().map(|v| Intent::Remove { position: v.position }),
        EditorTool::Paint => hit.voxel().map(|v| Intent::Paint { position: v.position, color }),
    }
}

/// One editing session over a voxel set.
///
/// All changes go through [`VoxelCommand`]s recorded in the history, so
/// every applied intent can be undone. When a draft store is attached the
/// set is written to it after each change.
pub struct Editor {
    voxels: VoxelSet,
    history: History<VoxelCommand>,
    config: EditorConfig,
    draft: Option<DraftStore>,
}

impl Editor {
    /// Empty session. Fails if the config is invalid.
    pub fn new(config: EditorConfig) -> Result<Self> {
        Self::with_voxels(config, VoxelSet::new())
    }

    /// Session starting from existing voxels, with an empty history.
    pub fn with_voxels(config: EditorConfig, voxels: VoxelSet) -> Result<Self> {
        config.validate()?;
        let draft = config.draft_path.as_ref().map(DraftStore::new);
        Ok(Self {
            voxels,
            history: History::with_limit(config.history_limit),
            config,
            draft,
        })
    }

    /// Session restored from the configured draft, if any.
    pub fn restore(config: EditorConfig) -> Result<Self> {
        let voxels = match &config.draft_path {
            Some(path) => DraftStore::new(path).load(),
            None => VoxelSet::new(),
        };
        Self::with_voxels(config, voxels)
    }

    pub fn voxels(&self) -> &VoxelSet {
        &self.voxels
    }

    pub fn history(&self) -> &History<VoxelCommand> {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    pub fn undo_redo_state(&self) -> UndoRedoState {
        self.history.undo_redo_state()
    }

    /// Validate `intent` against the current model and carry it out.
    ///
    /// Intents that would not change anything come back as
    /// [`Outcome::Ignored`]. Errors only come from writing the draft, after
    /// the change has been applied.
    pub fn apply(&mut self, intent: Intent) -> Result<Outcome> {
        let command = match intent {
            Intent::Add { position, color } => {
                if !is_grid_aligned(position, self.config.y_offset) {
                    return Ok(Outcome::Ignored(IgnoreReason::OffGrid));
                }
                if !is_in_bounds(position, self.config.effective_grid_size()) {
                    return Ok(Outcome::Ignored(IgnoreReason::OutOfBounds));
                }
                if self.voxels.contains_key(PositionKey::from_position(position)) {
                    return Ok(Outcome::Ignored(IgnoreReason::Occupied));
                }
                let color = color.unwrap_or_else(|| palette::color_or_default(self.config.default_color));
                VoxelCommand::add(Voxel::new(position, color))
            }
            Intent::Remove { position } => match VoxelCommand::remove_from(&self.voxels, position) {
                Some(command) => command,
                None => return Ok(Outcome::Ignored(IgnoreReason::Empty)),
            },
            Intent::Paint { position, color } => match VoxelCommand::paint_from(&self.voxels, position, color) {
                None => return Ok(Outcome::Ignored(IgnoreReason::Empty)),
                Some(VoxelCommand::Paint { old_color, .. }) if old_color == color => {
                    return Ok(Outcome::Ignored(IgnoreReason::Unchanged));
                }
                Some(command) => command,
            },
            Intent::ClearAll => {
                if self.voxels.is_empty() {
                    return Ok(Outcome::Ignored(IgnoreReason::Empty));
                }
                VoxelCommand::clear_all_from(&self.voxels)
            }
            Intent::Undo => {
                return Ok(match self.undo()? {
                    Some(kind) => Outcome::Undone(kind),
                    None => Outcome::Ignored(IgnoreReason::NothingToUndo),
                });
            }
            Intent::Redo => {
                return Ok(match self.redo()? {
                    Some(kind) => Outcome::Redone(kind),
                    None => Outcome::Ignored(IgnoreReason::NothingToRedo),
                });
            }
        };

        let kind = command.kind();
        self.execute(command)?;
        Ok(Outcome::Applied(kind))
    }

    /// Run `command` and record it, dropping any redoable commands.
    pub fn execute(&mut self, command: VoxelCommand) -> Result<()> {
        log::debug!("Execute {:?} ({} voxels)", command.kind(), self.voxels.len());
        self.history.execute(command, &mut self.voxels);
        self.autosave()
    }

    /// Undo the last applied command, returning its kind.
    pub fn undo(&mut self) -> Result<Option<CommandKind>> {
        let kind = self.history.pointer().map(|i| self.history.commands()[i].kind());
        if !self.history.undo(&mut self.voxels) {
            return Ok(None);
        }
        self.autosave()?;
        Ok(kind)
    }

    /// Redo the next command, returning its kind.
    pub fn redo(&mut self) -> Result<Option<CommandKind>> {
        let kind = self.history.redoable().first().map(VoxelCommand::kind);
        if !self.history.redo(&mut self.voxels) {
            return Ok(None);
        }
        self.autosave()?;
        Ok(kind)
    }

    /// Drop the undo history, keeping the voxels.
    pub fn reset_history(&mut self) {
        self.history.reset();
    }

    /// Replace the model with a loaded one. History starts over.
    pub fn load_model(&mut self, model: &SerializedModel) -> Result<()> {
        self.voxels = VoxelSet::from(deserialize_model(model));
        self.history.reset();
        log::info!("Loaded '{}' into editor ({} voxels)", model.name, self.voxels.len());
        self.autosave()
    }

    /// Snapshot the current model for saving.
    pub fn to_model(&self, name: impl Into<String>, metadata: Option<ModelMetadata>) -> SerializedModel {
        serialize_model(name, self.voxels.as_slice(), metadata)
    }

    /// Per-color meshes at the configured render scale.
    pub fn meshes(&self) -> Vec<ColorMesh> {
        build_color_meshes(self.voxels.as_slice(), self.config.half_extent())
    }

    fn autosave(&self) -> Result<()> {
        match &self.draft {
            Some(draft) => draft.save(&self.voxels),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Ray;
    use crate::voxel::map::VoxelMap;
    use crate::voxel::pick::raycast;

    fn editor() -> Editor {
        Editor::new(EditorConfig::default()).unwrap()
    }

    fn add(x: f32, y: f32, z: f32, color: Color) -> Intent {
        Intent::Add { position: Vec3::new(x, y, z), color: Some(color) }
    }

    #[test]
    fn test_add_remove_paint() {
        let mut editor = editor();
        let p = Vec3::new(0.0, 0.5, 0.0);

        assert_eq!(editor.apply(add(0.0, 0.5, 0.0, Color::RED)).unwrap(), Outcome::Applied(CommandKind::Add));
        assert_eq!(
            editor.apply(Intent::Paint { position: p, color: Color::BLUE }).unwrap(),
            Outcome::Applied(CommandKind::Paint)
        );
        assert_eq!(editor.voxels().find(p).unwrap().color, Color::BLUE);
        assert_eq!(editor.apply(Intent::Remove { position: p }).unwrap(), Outcome::Applied(CommandKind::Remove));
        assert!(editor.voxels().is_empty());
        assert_eq!(editor.history().len(), 3);
    }

    #[test]
    fn test_ignored_intents() {
        let mut editor = editor();
        let p = Vec3::new(0.0, 0.5, 0.0);

        assert_eq!(editor.apply(Intent::Remove { position: p }).unwrap(), Outcome::Ignored(IgnoreReason::Empty));
        assert_eq!(
            editor.apply(Intent::Paint { position: p, color: Color::RED }).unwrap(),
            Outcome::Ignored(IgnoreReason::Empty)
        );
        assert_eq!(editor.apply(Intent::ClearAll).unwrap(), Outcome::Ignored(IgnoreReason::Empty));
        assert_eq!(editor.apply(Intent::Undo).unwrap(), Outcome::Ignored(IgnoreReason::NothingToUndo));
        assert_eq!(editor.apply(Intent::Redo).unwrap(), Outcome::Ignored(IgnoreReason::NothingToRedo));
        assert_eq!(
            editor.apply(add(13.0, 0.5, 0.0, Color::RED)).unwrap(),
            Outcome::Ignored(IgnoreReason::OutOfBounds)
        );

        editor.apply(add(0.0, 0.5, 0.0, Color::RED)).unwrap();
        assert_eq!(editor.apply(add(0.0, 0.5, 0.0, Color::BLUE)).unwrap(), Outcome::Ignored(IgnoreReason::Occupied));
        assert_eq!(
            editor.apply(Intent::Paint { position: p, color: Color::RED }).unwrap(),
            Outcome::Ignored(IgnoreReason::Unchanged)
        );
        assert_eq!(editor.history().len(), 1);
        assert_eq!(editor.voxels().len(), 1);
    }

    #[test]
    fn test_off_grid_adds_are_ignored() {
        let mut editor = editor();
        editor.apply(add(0.0, 0.5, 0.0, Color::RED)).unwrap();

        for (x, y, z) in [(0.1, 0.5, 0.0), (0.0, 1.0, 0.0), (f32::NAN, 0.5, 0.0), (0.0, 0.5, f32::INFINITY)] {
            assert_eq!(
                editor.apply(add(x, y, z, Color::BLUE)).unwrap(),
                Outcome::Ignored(IgnoreReason::OffGrid),
                "({}, {}, {})",
                x,
                y,
                z
            );
        }
        assert_eq!(editor.voxels().len(), 1);
        assert_eq!(VoxelMap::build(editor.voxels().as_slice()).len(), editor.voxels().len());
    }

    #[test]
    fn test_occupancy_matches_lookup_cell() {
        // A loaded voxel that drifted off its cell center still owns the cell.
        let loaded = VoxelSet::from(vec![Voxel::at(0.2, 0.5, 0.0, Color::RED)]);
        let mut editor = Editor::with_voxels(EditorConfig::default(), loaded).unwrap();
        let p = Vec3::new(0.0, 0.5, 0.0);
        assert!(!editor.voxels().contains_position(p));
        assert_eq!(
            editor.apply(Intent::Add { position: p, color: None }).unwrap(),
            Outcome::Ignored(IgnoreReason::Occupied)
        );
        assert_eq!(VoxelMap::build(editor.voxels().as_slice()).len(), editor.voxels().len());
    }

    #[test]
    fn test_paint_records_previous_color() {
        let mut editor = editor();
        let p = Vec3::new(2.0, 1.5, -1.0);
        editor.apply(add(2.0, 1.5, -1.0, Color::RED)).unwrap();
        editor.apply(Intent::Paint { position: p, color: Color::GREEN }).unwrap();

        let expected = VoxelCommand::paint_from(&VoxelSet::from(vec![Voxel::new(p, Color::RED)]), p, Color::GREEN);
        assert_eq!(editor.history().commands().last(), expected.as_ref());
        editor.apply(Intent::Undo).unwrap();
        assert_eq!(editor.voxels().find(p).unwrap().color, Color::RED);
    }

    #[test]
    fn test_unlimited_grid() {
        let config = EditorConfig { unlimited_grid: true, ..Default::default() };
        let mut editor = Editor::new(config).unwrap();
        assert!(editor.apply(add(100.0, 0.5, 0.0, Color::RED)).unwrap().changed());
    }

    #[test]
    fn test_default_color() {
        let mut editor = editor();
        editor.apply(Intent::Add { position: Vec3::new(0.0, 0.5, 0.0), color: None }).unwrap();
        assert_eq!(editor.voxels().as_slice()[0].color, palette::color_or_default(palette::DEFAULT_VOXEL));
    }

    #[test]
    fn test_undo_redo_outcomes() {
        let mut editor = editor();
        editor.apply(add(0.0, 0.5, 0.0, Color::RED)).unwrap();
        editor.apply(Intent::ClearAll).unwrap();

        assert_eq!(editor.apply(Intent::Undo).unwrap(), Outcome::Undone(CommandKind::ClearAll));
        assert_eq!(editor.voxels().len(), 1);
        assert_eq!(editor.undo_redo_state(), UndoRedoState::Both);
        assert_eq!(editor.apply(Intent::Redo).unwrap(), Outcome::Redone(CommandKind::ClearAll));
        assert!(editor.voxels().is_empty());
        assert!(!editor.can_redo());
    }

    #[test]
    fn test_history_limit_from_config() {
        let config = EditorConfig { history_limit: Some(2), ..Default::default() };
        let mut editor = Editor::new(config).unwrap();
        for x in 0..4 {
            editor.apply(add(x as f32, 0.5, 0.0, Color::RED)).unwrap();
        }
        assert_eq!(editor.history().len(), 2);
        while editor.can_undo() {
            editor.undo().unwrap();
        }
        assert_eq!(editor.voxels().len(), 2);
    }

    #[test]
    fn test_intent_json() {
        let intent: Intent = serde_json::from_str(r#"{"op":"add","position":[1.0,0.5,-2.0]}"#).unwrap();
        assert_eq!(intent, Intent::Add { position: Vec3::new(1.0, 0.5, -2.0), color: None });

        let intent: Intent = serde_json::from_str(r#"{"op":"clear_all"}"#).unwrap();
        assert_eq!(intent, Intent::ClearAll);

        let json = serde_json::to_string(&Intent::Paint { position: Vec3::ZERO, color: Color::RED }).unwrap();
        assert!(json.starts_with(r#"{"op":"paint""#));
    }

    #[test]
    fn test_intent_for_hit() {
        let voxels = vec![Voxel::at(0.0, 0.5, 0.0, Color::RED)];
        let down = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        let hit = raycast(&down, &voxels, 1.0).unwrap();

        assert_eq!(
            intent_for_hit(EditorTool::Add, &hit, Color::BLUE, 0.5),
            Some(Intent::Add { position: Vec3::new(0.0, 1.5, 0.0), color: Some(Color::BLUE) })
        );
        assert_eq!(
            intent_for_hit(EditorTool::Remove, &hit, Color::BLUE, 0.5),
            Some(Intent::Remove { position: Vec3::new(0.0, 0.5, 0.0) })
        );

        let none: [Voxel; 0] = [];
        let grid_hit = raycast(&Ray::new(Vec3::new(3.0, 10.0, 1.0), Vec3::NEG_Y), &none, 1.0).unwrap();
        assert_eq!(intent_for_hit(EditorTool::Paint, &grid_hit, Color::BLUE, 0.5), None);
        assert_eq!(
            intent_for_hit(EditorTool::Add, &grid_hit, Color::BLUE, 0.5),
            Some(Intent::Add { position: Vec3::new(3.0, 0.5, 1.0), color: Some(Color::BLUE) })
        );
    }

    #[test]
    fn test_draft_autosave_and_restore() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig {
            draft_path: Some(dir.path().join("draft.json")),
            ..Default::default()
        };

        let mut editor = Editor::new(config.clone()).unwrap();
        editor.apply(add(0.0, 0.5, 0.0, Color::RED)).unwrap();
        editor.apply(add(1.0, 0.5, 0.0, Color::GREEN)).unwrap();
        editor.apply(Intent::Undo).unwrap();

        let restored = Editor::restore(config).unwrap();
        assert_eq!(restored.voxels(), editor.voxels());
        assert!(!restored.can_undo());
    }

    #[test]
    fn test_load_model_resets_history() {
        let mut editor = editor();
        editor.apply(add(0.0, 0.5, 0.0, Color::RED)).unwrap();
        let model = editor.to_model("one", None);

        let mut other = super::Editor::new(EditorConfig::default()).unwrap();
        other.apply(add(5.0, 0.5, 5.0, Color::BLUE)).unwrap();
        other.load_model(&model).unwrap();
        assert_eq!(other.voxels(), editor.voxels());
        assert!(!other.can_undo());
        assert_eq!(other.meshes().len(), 1);
    }

    #[test]
    fn test_invalid_config() {
        let config = EditorConfig { grid_size: 0, ..Default::default() };
        assert!(Editor::new(config).is_err());
    }
}
