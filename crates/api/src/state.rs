use std::sync::Arc;

use tubely_db::VideoStore;
use tubely_storage::ThumbnailStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Video metadata records.
    pub videos: Arc<dyn VideoStore>,
    /// Thumbnail storage strategy selected at startup.
    pub thumbnails: Arc<dyn ThumbnailStore>,
}
