use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tubely_core::media::{asset_file_name, extension_of};
use tubely_core::storage::ThumbnailStorageKind;
use uuid::Uuid;

use crate::traits::{StorageError, StorageResult, ThumbnailStore};

/// Writes thumbnails to files under an assets root served at `/assets`.
#[derive(Debug, Clone)]
pub struct AssetWriter {
    root: PathBuf,
    base_url: String,
}

impl AssetWriter {
    /// Create a writer rooted at `root`, creating the directory if needed.
    ///
    /// `base_url` is the public prefix files are served under, e.g.
    /// `http://localhost:8091/assets`.
    pub async fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> StorageResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create assets directory {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(Self {
            root,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Public URL of an asset file.
    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url, file_name)
    }

    /// Resolve a file name to a path directly under the root.
    ///
    /// Names must be a single path component.
    fn file_path(&self, file_name: &str) -> StorageResult<PathBuf> {
        if file_name.is_empty()
            || file_name.contains("..")
            || file_name.contains('/')
            || file_name.contains('\\')
            || file_name.contains('\0')
        {
            return Err(StorageError::InvalidKey(format!(
                "Asset name '{file_name}' is not a plain file name"
            )));
        }
        Ok(self.root.join(file_name))
    }

    /// Copy `reader` into `<video_id>.<ext>` and return its public URL.
    ///
    /// The extension comes from `content_type`. An existing file for the same
    /// video and extension is truncated.
    pub async fn write_stream<R>(
        &self,
        video_id: Uuid,
        content_type: &str,
        mut reader: R,
    ) -> StorageResult<String>
    where
        R: AsyncRead + Unpin + Send,
    {
        let file_name = asset_file_name(video_id, extension_of(content_type));
        let path = self.file_path(&file_name)?;
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let copied = match tokio::io::copy(&mut reader, &mut file).await {
            Ok(n) => file.flush().await.map(|()| n),
            Err(e) => Err(e),
        };
        let bytes_copied = match copied {
            Ok(n) => n,
            Err(e) => {
                drop(file);
                if let Err(cleanup) = remove_if_exists(&path).await {
                    tracing::error!(error = %cleanup, "Failed to remove partial thumbnail asset");
                }
                return Err(StorageError::UploadFailed(format!(
                    "Failed to write stream to file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        tracing::info!(
            video_id = %video_id,
            path = %path.display(),
            size_bytes = bytes_copied,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Thumbnail asset written"
        );

        Ok(self.url_for(&file_name))
    }
}

/// Delete `path`, treating a missing file as already gone.
///
/// Returns whether a file was removed.
async fn remove_if_exists(path: &Path) -> StorageResult<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StorageError::DeleteFailed(format!(
            "Failed to delete file {}: {}",
            path.display(),
            e
        ))),
    }
}

#[async_trait]
impl ThumbnailStore for AssetWriter {
    async fn store(
        &self,
        video_id: Uuid,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        self.write_stream(video_id, content_type, std::io::Cursor::new(data))
            .await
    }

    async fn discard(&self, video_id: Uuid, reference: &str) -> StorageResult<()> {
        let file_name = reference
            .strip_prefix(&self.base_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| {
                StorageError::InvalidKey(format!("'{reference}' is not an asset URL"))
            })?;
        let path = self.file_path(file_name)?;

        if remove_if_exists(&path).await? {
            tracing::info!(video_id = %video_id, path = %path.display(), "Thumbnail asset discarded");
        }
        Ok(())
    }

    fn kind(&self) -> ThumbnailStorageKind {
        ThumbnailStorageKind::Assets
    }
}
