pub mod health;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// GET  /videos/{video_id}              get_video (owner only)
/// POST /thumbnail_upload/{video_id}    upload_thumbnail (owner only, multipart)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(video::router())
}
