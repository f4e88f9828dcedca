//! Editor configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Grid extent used when `unlimited_grid` is set.
pub const UNLIMITED_GRID_SIZE: u32 = 1000;

/// Configuration for an editing session.
///
/// Every field has a default, so a config file only needs the fields it
/// overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Edge length of the editable grid in cells (centered on the origin).
    pub grid_size: u32,
    /// Ignore `grid_size` and allow placement anywhere within
    /// [`UNLIMITED_GRID_SIZE`].
    pub unlimited_grid: bool,
    /// World-space edge length of one voxel.
    pub voxel_size: f32,
    /// Render scale applied to each voxel (leaves a visible gap between cubes).
    pub voxel_scale: f32,
    /// Height of the first voxel layer's center above the ground plane.
    pub y_offset: f32,
    /// Maximum number of commands kept for undo. `None` keeps everything.
    pub history_limit: Option<usize>,
    /// Palette code used when an intent does not carry a color.
    pub default_color: u8,
    /// Where the working model is autosaved, if anywhere.
    pub draft_path: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 24,
            unlimited_grid: false,
            voxel_size: 1.0,
            voxel_scale: 0.95,
            y_offset: 0.5,
            history_limit: None,
            default_color: 254, // Light Gray
            draft_path: None,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON text and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would make placement or rendering meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(Error::Config("grid_size must be positive".into()));
        }
        if !(self.voxel_size > 0.0) {
            return Err(Error::Config(format!(
                "voxel_size must be positive, got {}",
                self.voxel_size
            )));
        }
        if !(self.voxel_scale > 0.0 && self.voxel_scale <= 1.0) {
            return Err(Error::Config(format!(
                "voxel_scale must be in (0, 1], got {}",
                self.voxel_scale
            )));
        }
        if self.history_limit == Some(0) {
            return Err(Error::Config("history_limit must be at least 1".into()));
        }
        if crate::voxel::palette::by_code(self.default_color).is_none() {
            return Err(Error::Config(format!(
                "default_color {} is not a palette code",
                self.default_color
            )));
        }
        Ok(())
    }

    /// Grid extent that placement is checked against.
    pub fn effective_grid_size(&self) -> u32 {
        if self.unlimited_grid {
            UNLIMITED_GRID_SIZE
        } else {
            self.grid_size
        }
    }

    /// Half-extent of a rendered voxel.
    pub fn half_extent(&self) -> f32 {
        self.voxel_size * self.voxel_scale * 0.5
    }
}
