use std::path::Path;
use std::sync::Arc;

use tubely_core::storage::ThumbnailStorageKind;

use crate::{AssetWriter, InlineEncoder, StorageResult, ThumbnailStore};

/// Create the thumbnail store selected by configuration.
///
/// `assets_root` and `assets_base_url` are only used by
/// [`ThumbnailStorageKind::Assets`].
pub async fn create_thumbnail_store(
    kind: ThumbnailStorageKind,
    assets_root: &Path,
    assets_base_url: &str,
) -> StorageResult<Arc<dyn ThumbnailStore>> {
    match kind {
        ThumbnailStorageKind::Inline => Ok(Arc::new(InlineEncoder::new())),
        ThumbnailStorageKind::Assets => {
            let writer = AssetWriter::new(assets_root, assets_base_url).await?;
            Ok(Arc::new(writer))
        }
    }
}
