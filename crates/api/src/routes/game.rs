//! Board routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::game;
use crate::state::AppState;

/// ```text
/// GET  /game-state       -> game_state
/// POST /new-game         -> new_game
/// POST /discover-tile    -> discover_tile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/game-state", get(game::game_state))
        .route("/new-game", post(game::new_game))
        .route("/discover-tile", post(game::discover_tile))
}
