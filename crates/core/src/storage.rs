//! Thumbnail storage strategy selection.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Where uploaded thumbnails end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailStorageKind {
    /// Embedded in the video record as a `data:` URL.
    Inline,
    /// Written under the assets root and served over HTTP.
    Assets,
}

impl ThumbnailStorageKind {
    /// Parse from the `THUMBNAIL_STORAGE` setting.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "assets" | "filesystem" => Ok(Self::Assets),
            other => Err(CoreError::Validation(format!(
                "Unknown thumbnail storage '{other}'. Must be one of: inline, assets"
            ))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Assets => "assets",
        }
    }
}
