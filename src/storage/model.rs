//! Named model documents.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::storage::record::{deserialize_voxels, serialize_voxels, StorageRecord};
use crate::voxel::voxel::Voxel;

/// Optional descriptive fields attached to a saved model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// A model as written to disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedModel {
    pub name: String,
    pub voxels: Vec<StorageRecord>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModelMetadata>,
}

impl SerializedModel {
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a model. Malformed documents and records are decoding errors.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Write the model as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved model '{}' ({} voxels) to {:?}", self.name, self.voxels.len(), path);
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let model = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded model '{}' ({} voxels) from {:?}", model.name, model.voxels.len(), path);
        Ok(model)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Snapshot editor voxels into a model stamped with the current time.
pub fn serialize_model(
    name: impl Into<String>,
    voxels: &[Voxel],
    metadata: Option<ModelMetadata>,
) -> SerializedModel {
    SerializedModel {
        name: name.into(),
        voxels: serialize_voxels(voxels),
        timestamp: now_millis(),
        metadata,
    }
}

/// Editor voxels of a model, in stored order.
pub fn deserialize_model(model: &SerializedModel) -> Vec<Voxel> {
    deserialize_voxels(&model.voxels)
}
