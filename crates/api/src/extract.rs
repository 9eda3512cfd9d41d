//! Path extractors shared by handlers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::AppError;

/// A `{video_id}` path segment parsed as a UUID.
///
/// Rejects with 400 before any other extractor runs when placed first in a
/// handler's argument list.
#[derive(Debug, Clone, Copy)]
pub struct VideoIdPath(pub Uuid);

impl<S> FromRequestParts<S> for VideoIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid ID: {}", e.body_text())))?;

        Uuid::parse_str(&raw)
            .map(VideoIdPath)
            .map_err(|_| AppError::BadRequest("Invalid ID".into()))
    }
}
