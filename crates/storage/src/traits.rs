//! Storage abstraction trait.

use async_trait::async_trait;
use thiserror::Error;
use tubely_core::storage::ThumbnailStorageKind;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A place uploaded thumbnails can be persisted.
///
/// The upload handler holds one of these as `Arc<dyn ThumbnailStore>` and
/// never branches on the concrete strategy.
#[async_trait]
pub trait ThumbnailStore: Send + Sync {
    /// Persist `data` as the thumbnail of `video_id` and return the reference
    /// to record on the video.
    ///
    /// `content_type` must already be validated against the allow-list.
    async fn store(&self, video_id: Uuid, content_type: &str, data: Vec<u8>)
        -> StorageResult<String>;

    /// Undo a previous [`store`](Self::store) whose reference never made it
    /// onto the video record. Discarding something already gone is not an
    /// error.
    async fn discard(&self, video_id: Uuid, reference: &str) -> StorageResult<()>;

    fn kind(&self) -> ThumbnailStorageKind;
}
