//! Saved exploration board.

use charasphere_core::board::Board;
use charasphere_core::error::CoreError;
use charasphere_core::types::{Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `gridprogress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProgress {
    pub user_id: UserId,
    /// Serialized [`Board`].
    pub tilemap: serde_json::Value,
    pub gold_collected: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl GridProgress {
    /// Decode the stored tilemap.
    pub fn board(&self) -> Result<Board, CoreError> {
        Board::from_json(self.tilemap.clone())
    }
}
