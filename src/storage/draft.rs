//! Autosaved working copy of the voxel set.
//!
//! The draft holds editor voxels as-is (no storage transform) so an
//! interrupted session restores exactly what was on screen.

use std::path::{Path, PathBuf};

use crate::core::Result;
use crate::voxel::voxel::{Voxel, VoxelSet};

/// File-backed draft slot.
#[derive(Clone, Debug)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the draft, replacing any previous one.
    pub fn save(&self, voxels: &VoxelSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Write to temp file then rename
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, serde_json::to_string(voxels)?)?;
        std::fs::rename(&temp_path, &self.path)?;

        log::debug!("Saved draft ({} voxels) to {:?}", voxels.len(), self.path);
        Ok(())
    }

    /// Read the draft. `Ok(None)` when no draft has been saved.
    pub fn try_load(&self) -> Result<Option<VoxelSet>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        let voxels: Vec<Voxel> = serde_json::from_str(&json)?;
        log::info!("Restored draft ({} voxels) from {:?}", voxels.len(), self.path);
        Ok(Some(VoxelSet::from(voxels)))
    }

    /// Read the draft, falling back to an empty set when it is missing or
    /// unreadable.
    pub fn load(&self) -> VoxelSet {
        match self.try_load() {
            Ok(voxels) => voxels.unwrap_or_default(),
            Err(e) => {
                log::warn!("Failed to load draft from {:?}: {}", self.path, e);
                VoxelSet::new()
            }
        }
    }

    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::voxel::Color;

    #[test]
    fn test_missing_draft_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::new(dir.path().join("draft.json"));
        assert!(!store.exists());
        assert!(store.try_load().unwrap().is_none());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::new(dir.path().join("drafts").join("draft.json"));

        let voxels = VoxelSet::from(vec![
            Voxel::at(0.0, 0.5, 0.0, Color::new(0.3, 0.6, 0.9)),
            Voxel::at(-1.0, 1.5, 2.0, Color::RED),
        ]);
        store.save(&voxels).unwrap();
        assert!(store.exists());
        assert_eq!(store.load(), voxels);

        store.clear().unwrap();
        assert!(!store.exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_draft_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(&path, "not json").unwrap();

        let store = DraftStore::new(&path);
        assert!(store.try_load().is_err());
        assert!(store.load().is_empty());
    }
}
