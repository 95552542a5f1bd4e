//! Character pulls: by card, by gold, and the one-time starter pack.
//!
//! Every pull runs in a single transaction: debit the payment, claim random
//! unclaimed roster rows with `FOR UPDATE SKIP LOCKED`, insert collection
//! rows and bump `cards_collected`. Any failure rolls the whole pull back,
//! so a player is never charged for a character they did not receive.

use axum::extract::State;
use axum::response::IntoResponse;
use charasphere_core::economy::{
    ensure_affordable, PULL_GOLD_COST, STARTER_PACK_CARDS, STARTER_PACK_CHARACTERS,
};
use charasphere_core::error::CoreError;
use charasphere_core::types::UserId;
use charasphere_db::models::character::Character;
use charasphere_db::models::player_stats::PlayerStats;
use charasphere_db::repositories::{CollectionRepo, PlayerStatsRepo, RosterRepo};
use charasphere_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::economy::current_stats;
use crate::middleware::auth::AuthUser;
use crate::response::success;
use crate::state::AppState;

/// What a pull costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Payment {
    /// One pull card.
    Card,
    /// [`PULL_GOLD_COST`] gold.
    Gold,
    /// The one-time starter pack (free, grants cards too).
    StarterPack,
}

impl Payment {
    fn label(self) -> &'static str {
        match self {
            Payment::Card => "card",
            Payment::Gold => "gold",
            Payment::StarterPack => "starter_pack",
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PullBody {
    character: Character,
    stats: PlayerStats,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StarterPackBody {
    characters: Vec<Character>,
    stats: PlayerStats,
    cards_granted: i32,
}

/// Charge `payment` and claim up to `count` characters for `user_id`.
async fn pull_characters(
    pool: &DbPool,
    user_id: UserId,
    payment: Payment,
    count: i64,
) -> AppResult<(Vec<Character>, PlayerStats)> {
    PlayerStatsRepo::ensure(pool, user_id).await?;

    let mut tx = pool.begin().await?;
    let debited = match payment {
        Payment::Card => PlayerStatsRepo::spend_cards(&mut *tx, user_id, 1).await?,
        Payment::Gold => PlayerStatsRepo::debit_gold(&mut *tx, user_id, PULL_GOLD_COST).await?,
        Payment::StarterPack => {
            PlayerStatsRepo::claim_starter_pack(&mut *tx, user_id, STARTER_PACK_CARDS).await?
        }
    };
    if debited.is_none() {
        tx.rollback().await?;
        return Err(shortfall(pool, user_id, payment).await);
    }

    let characters = RosterRepo::claim_random_unclaimed(&mut *tx, count).await?;
    if characters.is_empty() {
        tx.rollback().await?;
        tracing::warn!(%user_id, payment = payment.label(), "Pull attempted with an exhausted roster");
        return Err(AppError::Core(CoreError::Conflict(
            "No unclaimed characters remain".into(),
        )));
    }

    for character in &characters {
        CollectionRepo::insert(&mut *tx, user_id, character.id).await?;
    }
    let pulled = i32::try_from(characters.len())
        .map_err(|_| AppError::InternalError("Pulled more characters than fit in i32".into()))?;
    let stats = PlayerStatsRepo::add_cards_collected(&mut *tx, user_id, pulled)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Player stats for {user_id} vanished")))?;
    tx.commit().await?;

    tracing::info!(
        %user_id,
        payment = payment.label(),
        character_ids = ?characters.iter().map(|c| c.id).collect::<Vec<_>>(),
        "Characters pulled",
    );
    Ok((characters, stats))
}

/// Explain why a debit matched no row.
async fn shortfall(pool: &DbPool, user_id: UserId, payment: Payment) -> AppError {
    let stats = match current_stats(pool, user_id).await {
        Ok(stats) => stats,
        Err(e) => return e,
    };
    let outcome = match payment {
        Payment::Card => ensure_affordable("cards", i64::from(stats.cards), 1),
        Payment::Gold => ensure_affordable("gold", stats.gold, PULL_GOLD_COST),
        Payment::StarterPack => {
            return AppError::Core(CoreError::Conflict("Starter pack already claimed".into()))
        }
    };
    match outcome {
        Err(e) => AppError::Core(e),
        Ok(()) => AppError::Core(CoreError::Conflict(
            "Balance changed during pull, please retry".into(),
        )),
    }
}

/// POST /api/pull
///
/// Spend one card for one random character.
pub async fn pull(user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (mut characters, stats) =
        pull_characters(&state.pool, user.user_id, Payment::Card, 1).await?;
    let character = characters
        .pop()
        .ok_or_else(|| AppError::InternalError("Pull returned no character".into()))?;
    Ok(success(PullBody { character, stats }))
}

/// POST /api/gacha
///
/// Spend gold directly for one random character.
pub async fn gacha(user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (mut characters, stats) =
        pull_characters(&state.pool, user.user_id, Payment::Gold, 1).await?;
    let character = characters
        .pop()
        .ok_or_else(|| AppError::InternalError("Pull returned no character".into()))?;
    Ok(success(PullBody { character, stats }))
}

/// POST /api/starter-pack
///
/// Grants up to three characters and three cards, once per player.
pub async fn starter_pack(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let (characters, stats) = pull_characters(
        &state.pool,
        user.user_id,
        Payment::StarterPack,
        STARTER_PACK_CHARACTERS,
    )
    .await?;
    Ok(success(StarterPackBody {
        characters,
        stats,
        cards_granted: STARTER_PACK_CARDS,
    }))
}
