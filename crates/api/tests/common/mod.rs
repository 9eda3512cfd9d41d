#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use tubely_api::auth::jwt::{generate_access_token, JwtConfig};
use tubely_api::config::{ServerConfig, StorageConfig};
use tubely_api::router::build_app_router;
use tubely_api::state::AppState;
use tubely_core::media::parse_allowed_types;
use tubely_core::storage::ThumbnailStorageKind;
use tubely_db::models::video::{CreateVideo, Video};
use tubely_db::{MemoryVideoStore, StoreError, VideoStore};

pub const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";
pub const BOUNDARY: &str = "tubely-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Port `8091` and host `localhost` are only used to build asset URLs; the
/// tests never bind a socket.
pub fn test_config(kind: ThumbnailStorageKind, assets_root: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 8091,
        cors_origins: vec!["http://localhost:8091".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
        storage: StorageConfig {
            kind,
            assets_root,
            public_host: "localhost".to_string(),
            allowed_types: parse_allowed_types(""),
        },
    }
}

/// A router plus handles on everything behind it.
///
/// `assets` must outlive the router: dropping it removes the asset root.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    pub videos: Arc<dyn VideoStore>,
    pub assets: TempDir,
}

impl TestApp {
    pub fn assets_root(&self) -> PathBuf {
        self.config.storage.assets_root.clone()
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        generate_access_token(user_id, &self.config.jwt).unwrap()
    }

    /// Insert a video owned by `user_id` with the given id.
    pub async fn seed_video(&self, id: Uuid, user_id: Uuid) -> Video {
        self.videos
            .create_video(&CreateVideo {
                id: Some(id),
                user_id,
                title: "Boots".to_string(),
                description: "A video about boots".to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Build the full application with an in-memory video store.
pub async fn build_test_app(kind: ThumbnailStorageKind) -> TestApp {
    build_test_app_with_store(kind, Arc::new(MemoryVideoStore::new())).await
}

/// Build the full application around a caller-supplied video store.
///
/// Uses the same [`build_app_router`] as `main.rs` so the tests exercise the
/// production middleware stack.
pub async fn build_test_app_with_store(
    kind: ThumbnailStorageKind,
    videos: Arc<dyn VideoStore>,
) -> TestApp {
    let assets = TempDir::new().unwrap();
    let config = test_config(kind, assets.path().join("assets"));

    let thumbnails = tubely_storage::create_thumbnail_store(
        config.storage.kind,
        &config.storage.assets_root,
        &config.assets_base_url(),
    )
    .await
    .unwrap();

    let state = AppState {
        config: Arc::new(config.clone()),
        videos: Arc::clone(&videos),
        thumbnails,
    };

    TestApp {
        router: build_app_router(state, &config),
        config,
        videos,
        assets,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Encode a `multipart/form-data` body with one file part.
pub fn multipart_body(field: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"upload\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Build an authenticated thumbnail upload request.
pub fn upload_request(video_id: &str, token: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/thumbnail_upload/{video_id}"))
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

/// Build a GET request, optionally carrying a bearer token.
pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Number of regular files under `dir`, or 0 if it does not exist.
pub fn file_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(Result::ok).count())
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Store doubles
// ---------------------------------------------------------------------------

/// Wraps a [`MemoryVideoStore`] but fails every update.
#[derive(Default)]
pub struct FailingUpdateStore {
    inner: MemoryVideoStore,
}

#[async_trait]
impl VideoStore for FailingUpdateStore {
    async fn create_video(&self, input: &CreateVideo) -> Result<Video, StoreError> {
        self.inner.create_video(input).await
    }

    async fn get_video(&self, id: Uuid) -> Result<Video, StoreError> {
        self.inner.get_video(id).await
    }

    async fn update_video(&self, _video: &Video) -> Result<Video, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Applies every update, then reports failure anyway, as when a connection
/// drops after the commit.
#[derive(Default)]
pub struct CommitThenFailStore {
    inner: MemoryVideoStore,
}

#[async_trait]
impl VideoStore for CommitThenFailStore {
    async fn create_video(&self, input: &CreateVideo) -> Result<Video, StoreError> {
        self.inner.create_video(input).await
    }

    async fn get_video(&self, id: Uuid) -> Result<Video, StoreError> {
        self.inner.get_video(id).await
    }

    async fn update_video(&self, video: &Video) -> Result<Video, StoreError> {
        self.inner.update_video(video).await?;
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Accepts the first `allowed` updates and fails the rest.
pub struct LimitedUpdateStore {
    inner: MemoryVideoStore,
    allowed: usize,
    updates: AtomicUsize,
}

impl LimitedUpdateStore {
    pub fn new(allowed: usize) -> Self {
        Self {
            inner: MemoryVideoStore::new(),
            allowed,
            updates: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl VideoStore for LimitedUpdateStore {
    async fn create_video(&self, input: &CreateVideo) -> Result<Video, StoreError> {
        self.inner.create_video(input).await
    }

    async fn get_video(&self, id: Uuid) -> Result<Video, StoreError> {
        self.inner.get_video(id).await
    }

    async fn update_video(&self, video: &Video) -> Result<Video, StoreError> {
        if self.updates.fetch_add(1, Ordering::SeqCst) >= self.allowed {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.update_video(video).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// A store whose backing database is unreachable.
pub struct UnreachableStore;

#[async_trait]
impl VideoStore for UnreachableStore {
    async fn create_video(&self, _input: &CreateVideo) -> Result<Video, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn get_video(&self, _id: Uuid) -> Result<Video, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn update_video(&self, _video: &Video) -> Result<Video, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}
