//! Route definitions for videos and their thumbnails.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tubely_core::media::MAX_THUMBNAIL_UPLOAD_BYTES;

use crate::handlers::{thumbnail, video};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/videos/{video_id}", get(video::get_video))
        .route(
            "/thumbnail_upload/{video_id}",
            post(thumbnail::upload_thumbnail)
                .layer(DefaultBodyLimit::max(MAX_THUMBNAIL_UPLOAD_BYTES)),
        )
}
