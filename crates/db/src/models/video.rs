//! Video entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tubely_core::types::Timestamp;
use uuid::Uuid;

/// A row from the `videos` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new video record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
}
