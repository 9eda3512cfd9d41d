//! Handlers for the `/videos` resource.

use axum::extract::State;
use axum::Json;
use tubely_core::error::CoreError;
use tubely_db::models::video::Video;
use tubely_db::StoreError;

use crate::error::{AppError, AppResult};
use crate::extract::VideoIdPath;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/videos/{video_id}
///
/// Returns the video if the caller owns it.
pub async fn get_video(
    State(state): State<AppState>,
    VideoIdPath(video_id): VideoIdPath,
    user: AuthUser,
) -> AppResult<Json<Video>> {
    let video = state
        .videos
        .get_video(video_id)
        .await
        .map_err(|source| match source {
            StoreError::NotFound(id) => AppError::Core(CoreError::NotFound { entity: "Video", id }),
            source => AppError::Store {
                context: "Failed to get video from database",
                source,
            },
        })?;

    if video.user_id != user.user_id {
        return Err(CoreError::Unauthorized(
            "You are not the owner of the requested video".into(),
        )
        .into());
    }

    Ok(Json(video))
}
