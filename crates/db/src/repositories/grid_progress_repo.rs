//! Repository for the `gridprogress` table.

use charasphere_core::types::UserId;
use sqlx::PgExecutor;

use crate::models::grid_progress::GridProgress;

const COLUMNS: &str = "user_id, tilemap, gold_collected, created_at, updated_at";

/// One saved board per user, replaced wholesale on every save.
pub struct GridProgressRepo;

impl GridProgressRepo {
    pub async fn find<'e, E>(executor: E, user_id: UserId) -> Result<Option<GridProgress>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM gridprogress WHERE user_id = $1");
        sqlx::query_as::<_, GridProgress>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Lock the caller's board so concurrent moves are applied one at a time.
    pub async fn find_for_update<'e, E>(
        executor: E,
        user_id: UserId,
    ) -> Result<Option<GridProgress>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM gridprogress WHERE user_id = $1 FOR UPDATE");
        sqlx::query_as::<_, GridProgress>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Insert or fully replace the caller's board.
    pub async fn upsert<'e, E>(
        executor: E,
        user_id: UserId,
        tilemap: &serde_json::Value,
        gold_collected: i64,
    ) -> Result<GridProgress, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO gridprogress (user_id, tilemap, gold_collected)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO UPDATE
             SET tilemap = EXCLUDED.tilemap,
                 gold_collected = EXCLUDED.gold_collected,
                 updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GridProgress>(&query)
            .bind(user_id)
            .bind(tilemap)
            .bind(gold_collected)
            .fetch_one(executor)
            .await
    }

    /// Delete the caller's board. Returns `true` if a row was removed, so a
    /// second call is a harmless no-op.
    pub async fn delete<'e, E>(executor: E, user_id: UserId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM gridprogress WHERE user_id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
