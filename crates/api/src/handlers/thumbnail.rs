//! Handler for thumbnail uploads.
//!
//! The storage strategy (inline data URL or asset file) comes from
//! [`AppState::thumbnails`]; this handler never branches on it.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use tubely_core::error::CoreError;
use tubely_core::media::{validate_thumbnail_content_type, THUMBNAIL_FIELD};
use tubely_db::models::video::Video;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::extract::VideoIdPath;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// The uploaded thumbnail part of a multipart form.
#[derive(Debug)]
struct ThumbnailUpload {
    content_type: String,
    data: Vec<u8>,
}

/// POST /api/thumbnail_upload/{video_id}
///
/// Stores the `thumbnail` form file for a video owned by the caller and
/// records its reference in `thumbnail_url`. Returns the updated video.
///
/// Form parsing and missing-field failures respond 500. Videos that cannot
/// be loaded also respond 500, not 404.
#[tracing::instrument(skip_all, fields(video_id = %video_id, user_id = %user.user_id))]
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    VideoIdPath(video_id): VideoIdPath,
    user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Video>> {
    tracing::info!("Uploading thumbnail");

    let multipart = multipart.map_err(|e| {
        tracing::warn!(error = %e, "Rejected multipart request");
        AppError::InternalError("Failed to parse multipart form".into())
    })?;
    let upload = read_thumbnail_field(multipart).await?;

    let mut video = state
        .videos
        .get_video(video_id)
        .await
        .map_err(|source| AppError::Store {
            context: "Failed to get video from database",
            source,
        })?;

    if video.user_id != user.user_id {
        tracing::warn!(owner_id = %video.user_id, "Thumbnail upload by non-owner rejected");
        return Err(CoreError::Unauthorized(
            "You are not the owner of the requested video".into(),
        )
        .into());
    }

    let content_type =
        validate_thumbnail_content_type(&upload.content_type, &state.config.storage.allowed_types)?;
    if upload.data.is_empty() {
        return Err(CoreError::Validation("Thumbnail file is empty".into()).into());
    }

    let size_bytes = upload.data.len();
    let reference = state
        .thumbnails
        .store(video_id, &content_type, upload.data)
        .await
        .map_err(|source| AppError::Storage {
            context: "Failed to store thumbnail",
            source,
        })?;

    video.thumbnail_url = Some(reference.clone());

    match state.videos.update_video(&video).await {
        Ok(updated) => {
            tracing::info!(
                storage = state.thumbnails.kind().label(),
                content_type = %content_type,
                size_bytes,
                "Thumbnail updated"
            );
            Ok(Json(updated))
        }
        Err(source) => {
            discard_unreferenced(&state, video_id, &reference).await;
            Err(AppError::Store {
                context: "Failed to update video data",
                source,
            })
        }
    }
}

/// Remove a freshly stored thumbnail after a failed update, unless the record
/// points at it anyway.
///
/// The update may have committed before its error surfaced, and a concurrent
/// upload of the same type writes the same reference. Only a re-read that
/// succeeds and shows another reference makes the delete safe.
async fn discard_unreferenced(state: &AppState, video_id: Uuid, reference: &str) {
    match state.videos.get_video(video_id).await {
        Ok(current) if current.thumbnail_url.as_deref() == Some(reference) => {
            tracing::warn!("Video references the new thumbnail despite the failed update; keeping it");
        }
        Ok(_) => {
            if let Err(e) = state.thumbnails.discard(video_id, reference).await {
                tracing::error!(error = %e, "Failed to discard orphaned thumbnail");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not re-read video; keeping new thumbnail");
        }
    }
}

/// Read the first `thumbnail` field of the form, skipping any others.
async fn read_thumbnail_field(mut multipart: Multipart) -> AppResult<ThumbnailUpload> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!(error = %e, "Failed to read multipart field");
        AppError::InternalError("Failed to parse multipart form".into())
    })? {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read thumbnail data");
            AppError::InternalError("Failed to retrieve file data".into())
        })?;

        return Ok(ThumbnailUpload {
            content_type,
            data: data.to_vec(),
        });
    }

    tracing::warn!(field = THUMBNAIL_FIELD, "Multipart form has no thumbnail field");
    Err(AppError::InternalError("Failed to retrieve file data".into()))
}
