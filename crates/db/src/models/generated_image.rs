//! Generated artwork records.

use charasphere_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `generated_image` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub id: DbId,
    pub character_id: Option<DbId>,
    pub url: String,
    pub prompt: String,
    pub style: Option<String>,
    pub seed: Option<i64>,
    pub created_by: Option<UserId>,
    pub created_at: Timestamp,
}

/// DTO for recording a generated image.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeneratedImage {
    pub character_id: Option<DbId>,
    pub url: String,
    pub prompt: String,
    pub style: Option<String>,
    pub seed: Option<i64>,
    /// Filled from the authenticated user, never from the request body.
    #[serde(skip)]
    pub created_by: Option<UserId>,
}
