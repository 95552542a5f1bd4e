//! Repository for the `playerstats` ledger.
//!
//! Every debit is a single conditional `UPDATE ... WHERE balance >= cost`,
//! so a concurrent request can never drive a balance negative and a failed
//! debit mutates nothing. A `None` return from a debit means the balance
//! was insufficient (or the row does not exist; call [`PlayerStatsRepo::ensure`]
//! first).

use charasphere_core::economy::{MAX_MOVES, STARTING_CARDS, STARTING_GOLD, STARTING_MOVES};
use charasphere_core::types::{Timestamp, UserId};
use sqlx::{PgExecutor, PgPool};

use crate::models::player_stats::PlayerStats;

const COLUMNS: &str = "user_id, gold, moves, cards, cards_collected, starter_pack_claimed, \
     last_move_refresh, created_at, updated_at";

/// Reads and atomic mutations of a player's economy row.
pub struct PlayerStatsRepo;

impl PlayerStatsRepo {
    /// Return the caller's row, creating it with starting balances if missing.
    pub async fn ensure(pool: &PgPool, user_id: UserId) -> Result<PlayerStats, sqlx::Error> {
        let inserted = sqlx::query(
            "INSERT INTO playerstats (user_id, gold, moves, cards)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(STARTING_GOLD)
        .bind(STARTING_MOVES)
        .bind(STARTING_CARDS)
        .execute(pool)
        .await?;
        if inserted.rows_affected() > 0 {
            tracing::info!(%user_id, "Created player stats");
        }

        let query = format!("SELECT {COLUMNS} FROM playerstats WHERE user_id = $1");
        sqlx::query_as::<_, PlayerStats>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find<'e, E>(executor: E, user_id: UserId) -> Result<Option<PlayerStats>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM playerstats WHERE user_id = $1");
        sqlx::query_as::<_, PlayerStats>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Lock the caller's row for the rest of the enclosing transaction.
    pub async fn find_for_update<'e, E>(
        executor: E,
        user_id: UserId,
    ) -> Result<Option<PlayerStats>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM playerstats WHERE user_id = $1 FOR UPDATE");
        sqlx::query_as::<_, PlayerStats>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Subtract `amount` gold if the balance covers it.
    pub async fn debit_gold<'e, E>(
        executor: E,
        user_id: UserId,
        amount: i64,
    ) -> Result<Option<PlayerStats>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE playerstats
             SET gold = gold - $2, updated_at = NOW()
             WHERE user_id = $1 AND gold >= $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlayerStats>(&query)
            .bind(user_id)
            .bind(amount)
            .fetch_optional(executor)
            .await
    }

    /// Exchange `cost` gold for `count` cards in one statement.
    pub async fn buy_cards<'e, E>(
        executor: E,
        user_id: UserId,
        cost: i64,
        count: i32,
    ) -> Result<Option<PlayerStats>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE playerstats
             SET gold = gold - $2, cards = cards + $3, updated_at = NOW()
             WHERE user_id = $1 AND gold >= $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlayerStats>(&query)
            .bind(user_id)
            .bind(cost)
            .bind(count)
            .fetch_optional(executor)
            .await
    }

    /// Spend `count` cards if the player holds that many.
    pub async fn spend_cards<'e, E>(
        executor: E,
        user_id: UserId,
        count: i32,
    ) -> Result<Option<PlayerStats>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE playerstats
             SET cards = cards - $2, updated_at = NOW()
             WHERE user_id = $1 AND cards >= $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlayerStats>(&query)
            .bind(user_id)
            .bind(count)
            .fetch_optional(executor)
            .await
    }

    /// Spend `count` moves if the player has that many left.
    ///
    /// The regeneration timer starts from the first spend below the cap.
    pub async fn spend_moves<'e, E>(
        executor: E,
        user_id: UserId,
        count: i32,
    ) -> Result<Option<PlayerStats>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE playerstats
             SET moves = moves - $2,
                 last_move_refresh = CASE WHEN moves >= $3 THEN NOW() ELSE last_move_refresh END,
                 updated_at = NOW()
             WHERE user_id = $1 AND moves >= $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlayerStats>(&query)
            .bind(user_id)
            .bind(count)
            .bind(MAX_MOVES)
            .fetch_optional(executor)
            .await
    }

    /// Add gold and cards (tile rewards). Returns `None` if the row is missing.
    pub async fn credit<'e, E>(
        executor: E,
        user_id: UserId,
        gold: i64,
        cards: i32,
    ) -> Result<Option<PlayerStats>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE playerstats
             SET gold = gold + $2, cards = cards + $3, updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlayerStats>(&query)
            .bind(user_id)
            .bind(gold)
            .bind(cards)
            .fetch_optional(executor)
            .await
    }

    /// Store the result of a move-regeneration computation.
    pub async fn set_moves<'e, E>(
        executor: E,
        user_id: UserId,
        moves: i32,
        last_move_refresh: Timestamp,
    ) -> Result<Option<PlayerStats>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE playerstats
             SET moves = $2, last_move_refresh = $3, updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlayerStats>(&query)
            .bind(user_id)
            .bind(moves)
            .bind(last_move_refresh)
            .fetch_optional(executor)
            .await
    }

    pub async fn add_cards_collected<'e, E>(
        executor: E,
        user_id: UserId,
        count: i32,
    ) -> Result<Option<PlayerStats>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE playerstats
             SET cards_collected = cards_collected + $2, updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlayerStats>(&query)
            .bind(user_id)
            .bind(count)
            .fetch_optional(executor)
            .await
    }

    /// Flip `starter_pack_claimed` and grant `cards`, once per player.
    ///
    /// Returns `None` if the pack was already claimed.
    pub async fn claim_starter_pack<'e, E>(
        executor: E,
        user_id: UserId,
        cards: i32,
    ) -> Result<Option<PlayerStats>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE playerstats
             SET starter_pack_claimed = TRUE, cards = cards + $2, updated_at = NOW()
             WHERE user_id = $1 AND starter_pack_claimed = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlayerStats>(&query)
            .bind(user_id)
            .bind(cards)
            .fetch_optional(executor)
            .await
    }
}
