//! Content-type handling for uploaded thumbnails.
//!
//! Derives file extensions from declared MIME types and checks declared
//! types against an allow-list before anything touches storage.

use uuid::Uuid;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum accepted multipart body for a thumbnail upload (10 MiB).
pub const MAX_THUMBNAIL_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Multipart field carrying the thumbnail file.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Content types accepted when no allow-list is configured.
pub const DEFAULT_THUMBNAIL_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

// ---------------------------------------------------------------------------
// Extension derivation
// ---------------------------------------------------------------------------

/// Return the part of `content_type` after its last `/`.
///
/// `image/png` yields `png`. A value without `/` is returned unchanged, so
/// callers that build paths from the result must validate the input first
/// (see [`validate_thumbnail_content_type`]).
pub fn extension_of(content_type: &str) -> &str {
    content_type
        .rsplit_once('/')
        .map(|(_, subtype)| subtype)
        .unwrap_or(content_type)
}

/// File name for a video's stored thumbnail: `<video_id>.<extension>`.
pub fn asset_file_name(video_id: Uuid, extension: &str) -> String {
    format!("{video_id}.{extension}")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Strip parameters and normalize case (`Image/PNG; q=1` -> `image/png`).
pub fn normalize_media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase()
}

/// Check a declared thumbnail content type against `allowed`.
///
/// Returns the normalized media type on success.
pub fn validate_thumbnail_content_type(
    content_type: &str,
    allowed: &[String],
) -> Result<String, CoreError> {
    let normalized = normalize_media_type(content_type);
    if normalized.is_empty() {
        return Err(CoreError::Validation(
            "Thumbnail is missing a Content-Type".into(),
        ));
    }
    if !allowed.iter().any(|ct| ct.eq_ignore_ascii_case(&normalized)) {
        return Err(CoreError::Validation(format!(
            "Unsupported thumbnail type '{normalized}'. Allowed: {}",
            allowed.join(", ")
        )));
    }
    Ok(normalized)
}

/// Parse a comma-separated allow-list, falling back to
/// [`DEFAULT_THUMBNAIL_TYPES`] when the list is empty.
pub fn parse_allowed_types(raw: &str) -> Vec<String> {
    let parsed: Vec<String> = raw
        .split(',')
        .map(normalize_media_type)
        .filter(|s| !s.is_empty())
        .collect();

    if parsed.is_empty() {
        DEFAULT_THUMBNAIL_TYPES.iter().map(|s| s.to_string()).collect()
    } else {
        parsed
    }
}
