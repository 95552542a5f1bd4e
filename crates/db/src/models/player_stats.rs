//! Per-user economy ledger.

use charasphere_core::types::{Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `playerstats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub user_id: UserId,
    pub gold: i64,
    pub moves: i32,
    pub cards: i32,
    pub cards_collected: i32,
    pub starter_pack_claimed: bool,
    pub last_move_refresh: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
