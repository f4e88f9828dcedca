//! Persistence: storage records, model documents and drafts.

pub mod record;
pub mod model;
pub mod draft;

pub use record::{
    deserialize_voxels, from_storage, int_to_rgb, rgb_to_int, serialize_voxels, to_storage,
    StorageRecord,
};
pub use model::{deserialize_model, serialize_model, ModelMetadata, SerializedModel};
pub use draft::DraftStore;
