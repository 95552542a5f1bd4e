//! The 5×5 exploration board.

use axum::extract::State;
use axum::response::IntoResponse;
use charasphere_core::board::{Board, Position};
use charasphere_core::error::CoreError;
use charasphere_core::tile::{tile_reward, TileKind, TileReward};
use charasphere_core::types::UserId;
use charasphere_db::models::player_stats::PlayerStats;
use charasphere_db::repositories::{GridProgressRepo, PlayerStatsRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::economy::refreshed_stats;
use crate::middleware::auth::AuthUser;
use crate::response::success;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverTileRequest {
    pub x: i32,
    pub y: i32,
    #[serde(default, alias = "userid")]
    pub user_id: Option<UserId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GameStateBody {
    stats: PlayerStats,
    board: Option<Board>,
    gold_collected: i64,
    moves_gained: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewGameBody {
    board: Board,
    gold_collected: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DiscoverBody {
    tile: TileKind,
    newly_discovered: bool,
    reward: TileReward,
    stats: PlayerStats,
    /// `None` once the board is complete and its progress row is gone.
    board: Option<Board>,
    gold_collected: i64,
    completed: bool,
}

/// GET /api/game-state
pub async fn game_state(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let (stats, moves_gained) = refreshed_stats(&state.pool, user.user_id).await?;
    let progress = GridProgressRepo::find(&state.pool, user.user_id).await?;

    let (board, gold_collected) = match progress {
        Some(progress) => (Some(progress.board()?), progress.gold_collected),
        None => (None, 0),
    };

    Ok(success(GameStateBody {
        stats,
        board,
        gold_collected,
        moves_gained,
    }))
}

/// POST /api/new-game
///
/// Deal a fresh board, replacing any board in progress.
pub async fn new_game(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    PlayerStatsRepo::ensure(&state.pool, user.user_id).await?;

    let board = Board::generate(&mut rand::rng());
    GridProgressRepo::upsert(&state.pool, user.user_id, &board.to_json()?, 0).await?;

    tracing::info!(user_id = %user.user_id, "New board dealt");
    Ok(success(NewGameBody {
        board,
        gold_collected: 0,
    }))
}

/// POST /api/discover-tile
///
/// Move onto an adjacent tile, paying one move. A tile seen for the first
/// time pays its reward. Stepping onto the last hidden tile completes the
/// board, which deletes the saved progress.
pub async fn discover_tile(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<DiscoverTileRequest>,
) -> AppResult<impl IntoResponse> {
    user.ensure_matches(input.user_id)?;
    let user_id = user.user_id;
    let target = Position::new(input.x, input.y);

    refreshed_stats(&state.pool, user_id).await?;

    let mut tx = state.pool.begin().await?;
    let progress = GridProgressRepo::find_for_update(&mut *tx, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Missing(
                "No board in progress; start a new game first".into(),
            ))
        })?;

    let mut board = progress.board()?;
    let outcome = board.move_player(target)?;

    let Some(stats) = PlayerStatsRepo::spend_moves(&mut *tx, user_id, 1).await? else {
        return Err(AppError::Core(CoreError::InsufficientFunds {
            resource: "moves",
            needed: 1,
            available: 0,
        }));
    };

    let reward = if outcome.newly_discovered {
        tile_reward(&outcome.uncovered, &mut rand::rng())
    } else {
        TileReward::NONE
    };
    let stats = if reward.is_empty() {
        stats
    } else {
        PlayerStatsRepo::credit(&mut *tx, user_id, reward.gold, reward.cards)
            .await?
            .ok_or_else(|| AppError::InternalError(format!("Player stats for {user_id} vanished")))?
    };

    let gold_collected = progress.gold_collected + reward.gold;
    let completed = board.is_complete();
    if completed {
        GridProgressRepo::delete(&mut *tx, user_id).await?;
    } else {
        GridProgressRepo::upsert(&mut *tx, user_id, &board.to_json()?, gold_collected).await?;
    }
    tx.commit().await?;

    tracing::info!(
        %user_id,
        %target,
        tile = %outcome.uncovered,
        gold = reward.gold,
        cards = reward.cards,
        completed,
        "Tile discovered",
    );

    Ok(success(DiscoverBody {
        tile: outcome.uncovered,
        newly_discovered: outcome.newly_discovered,
        reward,
        stats,
        board: (!completed).then_some(board),
        gold_collected,
        completed,
    }))
}
