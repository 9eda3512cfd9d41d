//! The video store interface consumed by the API, and its implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::video::{CreateVideo, Video};
use crate::repositories::VideoRepo;
use crate::DbPool;

/// Video store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Video not found: {0}")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Reads and writes video records.
///
/// Handlers hold this as `Arc<dyn VideoStore>` so the backing database can be
/// swapped (Postgres in production, memory in tests).
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn create_video(&self, input: &CreateVideo) -> Result<Video, StoreError>;

    /// Fetch a video, failing with [`StoreError::NotFound`] if it is absent.
    async fn get_video(&self, id: Uuid) -> Result<Video, StoreError>;

    /// Persist the mutable fields of `video`, returning the stored row.
    async fn update_video(&self, video: &Video) -> Result<Video, StoreError>;

    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Postgres
// ---------------------------------------------------------------------------

/// [`VideoStore`] backed by the `videos` table.
#[derive(Clone)]
pub struct PgVideoStore {
    pool: DbPool,
}

impl PgVideoStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    async fn create_video(&self, input: &CreateVideo) -> Result<Video, StoreError> {
        Ok(VideoRepo::create(&self.pool, input).await?)
    }

    async fn get_video(&self, id: Uuid) -> Result<Video, StoreError> {
        VideoRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn update_video(&self, video: &Video) -> Result<Video, StoreError> {
        VideoRepo::update(&self.pool, video)
            .await?
            .ok_or(StoreError::NotFound(video.id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// [`VideoStore`] kept in process memory. Used by tests and local tooling.
#[derive(Default)]
pub struct MemoryVideoStore {
    videos: RwLock<HashMap<Uuid, Video>>,
}

impl MemoryVideoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored videos.
    pub async fn len(&self) -> usize {
        self.videos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.videos.read().await.is_empty()
    }
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn create_video(&self, input: &CreateVideo) -> Result<Video, StoreError> {
        let now = chrono::Utc::now();
        let video = Video {
            id: input.id.unwrap_or_else(Uuid::new_v4),
            user_id: input.user_id,
            title: input.title.clone(),
            description: input.description.clone(),
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        };
        self.videos.write().await.insert(video.id, video.clone());
        Ok(video)
    }

    async fn get_video(&self, id: Uuid) -> Result<Video, StoreError> {
        self.videos
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update_video(&self, video: &Video) -> Result<Video, StoreError> {
        let mut videos = self.videos.write().await;
        let stored = videos
            .get_mut(&video.id)
            .ok_or(StoreError::NotFound(video.id))?;

        stored.title = video.title.clone();
        stored.description = video.description.clone();
        stored.thumbnail_url = video.thumbnail_url.clone();
        stored.video_url = video.video_url.clone();
        stored.updated_at = chrono::Utc::now();

        Ok(stored.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn new_video(user_id: Uuid) -> CreateVideo {
        CreateVideo {
            id: None,
            user_id,
            title: "Boots".to_string(),
            description: "A video about boots".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = MemoryVideoStore::new();
        let owner = Uuid::new_v4();

        let created = store.create_video(&new_video(owner)).await.unwrap();
        let fetched = store.get_video(created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.user_id, owner);
        assert!(fetched.thumbnail_url.is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn create_keeps_requested_id() {
        let store = MemoryVideoStore::new();
        let id = Uuid::new_v4();
        let mut input = new_video(Uuid::new_v4());
        input.id = Some(id);

        let created = store.create_video(&input).await.unwrap();
        assert_eq!(created.id, id);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = MemoryVideoStore::new();
        let id = Uuid::new_v4();
        assert_matches!(store.get_video(id).await, Err(StoreError::NotFound(missing)) if missing == id);
    }

    #[tokio::test]
    async fn update_overwrites_thumbnail() {
        let store = MemoryVideoStore::new();
        let mut video = store.create_video(&new_video(Uuid::new_v4())).await.unwrap();

        video.thumbnail_url = Some("first".to_string());
        store.update_video(&video).await.unwrap();
        video.thumbnail_url = Some("second".to_string());
        let updated = store.update_video(&video).await.unwrap();

        assert_eq!(updated.thumbnail_url.as_deref(), Some("second"));
        assert!(updated.updated_at >= updated.created_at);
        assert_eq!(
            store.get_video(video.id).await.unwrap().thumbnail_url.as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn update_does_not_change_owner() {
        let store = MemoryVideoStore::new();
        let owner = Uuid::new_v4();
        let mut video = store.create_video(&new_video(owner)).await.unwrap();

        video.user_id = Uuid::new_v4();
        let updated = store.update_video(&video).await.unwrap();
        assert_eq!(updated.user_id, owner);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store = MemoryVideoStore::new();
        let now = chrono::Utc::now();
        let ghost = Video {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: String::new(),
            description: String::new(),
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        };
        assert_matches!(store.update_video(&ghost).await, Err(StoreError::NotFound(_)));
        assert!(store.is_empty().await);
    }
}
