//! Player ledger endpoints: sync, card purchases and moves.

use axum::extract::State;
use axum::response::IntoResponse;
use charasphere_core::economy::{
    card_purchase_cost, ensure_affordable, refresh_moves as regenerate, spend_moves,
    validate_move_count,
};
use charasphere_core::error::CoreError;
use charasphere_core::types::UserId;
use charasphere_db::models::player_stats::PlayerStats;
use charasphere_db::repositories::{CollectionRepo, PlayerStatsRepo};
use charasphere_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::success;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyCardsRequest {
    pub count: i32,
    #[serde(default, alias = "userid")]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseMovesRequest {
    #[serde(default = "one")]
    pub count: i32,
    #[serde(default, alias = "userid")]
    pub user_id: Option<UserId>,
}

fn one() -> i32 {
    1
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncBody {
    stats: PlayerStats,
    collection_size: i64,
    moves_gained: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PurchaseBody {
    stats: PlayerStats,
    cards_purchased: i32,
    gold_spent: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MovesBody {
    stats: PlayerStats,
    moves_gained: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpentMovesBody {
    stats: PlayerStats,
    moves_spent: i32,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Ensure the caller's ledger exists, apply move regeneration and persist it.
///
/// Returns the stored stats and how many moves were regenerated. The row is
/// locked while the new balance is computed so concurrent refreshes cannot
/// both credit the same interval.
pub(crate) async fn refreshed_stats(
    pool: &DbPool,
    user_id: UserId,
) -> AppResult<(PlayerStats, i32)> {
    PlayerStatsRepo::ensure(pool, user_id).await?;

    let mut tx = pool.begin().await?;
    let current = PlayerStatsRepo::find_for_update(&mut *tx, user_id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Player stats for {user_id} vanished")))?;

    let refresh = regenerate(current.moves, current.last_move_refresh, chrono::Utc::now());
    let unchanged =
        refresh.moves == current.moves && refresh.last_refresh == current.last_move_refresh;
    if unchanged {
        tx.commit().await?;
        return Ok((current, 0));
    }

    let stats = PlayerStatsRepo::set_moves(&mut *tx, user_id, refresh.moves, refresh.last_refresh)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Player stats for {user_id} vanished")))?;
    tx.commit().await?;

    if refresh.gained > 0 {
        tracing::debug!(%user_id, gained = refresh.gained, moves = stats.moves, "Moves regenerated");
    }
    Ok((stats, refresh.gained))
}

/// Current stats for a user whose ledger is known to exist.
pub(crate) async fn current_stats(pool: &DbPool, user_id: UserId) -> AppResult<PlayerStats> {
    PlayerStatsRepo::find(pool, user_id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Player stats for {user_id} vanished")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/sync
///
/// First call for a new player creates their ledger with starting balances.
pub async fn sync(user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (stats, moves_gained) = refreshed_stats(&state.pool, user.user_id).await?;
    let collection_size = CollectionRepo::count_for_user(&state.pool, user.user_id).await?;

    tracing::info!(user_id = %user.user_id, gold = stats.gold, moves = stats.moves, "Player synced");

    Ok(success(SyncBody {
        stats,
        collection_size,
        moves_gained,
    }))
}

/// POST /api/buy-cards
pub async fn buy_cards(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<BuyCardsRequest>,
) -> AppResult<impl IntoResponse> {
    user.ensure_matches(input.user_id)?;
    let cost = card_purchase_cost(input.count)?;

    PlayerStatsRepo::ensure(&state.pool, user.user_id).await?;
    let Some(stats) =
        PlayerStatsRepo::buy_cards(&state.pool, user.user_id, cost, input.count).await?
    else {
        let stats = current_stats(&state.pool, user.user_id).await?;
        ensure_affordable("gold", stats.gold, cost)?;
        return Err(AppError::Core(CoreError::Conflict(
            "Balance changed during purchase, please retry".into(),
        )));
    };

    tracing::info!(
        user_id = %user.user_id,
        count = input.count,
        cost,
        gold = stats.gold,
        "Cards purchased",
    );

    Ok(success(PurchaseBody {
        stats,
        cards_purchased: input.count,
        gold_spent: cost,
    }))
}

/// POST /api/refresh-moves
pub async fn refresh_moves(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let (stats, moves_gained) = refreshed_stats(&state.pool, user.user_id).await?;
    Ok(success(MovesBody {
        stats,
        moves_gained,
    }))
}

/// POST /api/use-moves
pub async fn use_moves(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UseMovesRequest>,
) -> AppResult<impl IntoResponse> {
    user.ensure_matches(input.user_id)?;
    validate_move_count(input.count)?;

    // Regenerate first so the spend sees every move the player has earned.
    refreshed_stats(&state.pool, user.user_id).await?;
    let Some(stats) =
        PlayerStatsRepo::spend_moves(&state.pool, user.user_id, input.count).await?
    else {
        let stats = current_stats(&state.pool, user.user_id).await?;
        spend_moves(stats.moves, input.count)?;
        return Err(AppError::Core(CoreError::Conflict(
            "Moves changed during request, please retry".into(),
        )));
    };

    Ok(success(SpentMovesBody {
        stats,
        moves_spent: input.count,
    }))
}
