use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tubely_core::storage::ThumbnailStorageKind;
use uuid::Uuid;

use crate::traits::{StorageError, StorageResult, ThumbnailStore};

/// Stores thumbnails inside the video record as `data:` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineEncoder;

impl InlineEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Build `data:<content_type>;base64,<payload>` from raw bytes.
    pub fn encode(content_type: &str, data: &[u8]) -> StorageResult<String> {
        let encoded = STANDARD.encode(data);
        if encoded.is_empty() {
            return Err(StorageError::EncodingFailed(
                "image data encoded to an empty payload".to_string(),
            ));
        }
        Ok(format!("data:{content_type};base64,{encoded}"))
    }
}

#[async_trait]
impl ThumbnailStore for InlineEncoder {
    async fn store(
        &self,
        video_id: Uuid,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        let size = data.len();
        let reference = Self::encode(content_type, &data)?;

        tracing::debug!(
            video_id = %video_id,
            content_type = %content_type,
            size_bytes = size,
            encoded_len = reference.len(),
            "Encoded inline thumbnail"
        );

        Ok(reference)
    }

    async fn discard(&self, _video_id: Uuid, _reference: &str) -> StorageResult<()> {
        // Nothing lives outside the record.
        Ok(())
    }

    fn kind(&self) -> ThumbnailStorageKind {
        ThumbnailStorageKind::Inline
    }
}
