//! Ledger, collection and pull routes. All require a bearer token.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{collection, economy, gacha};
use crate::state::AppState;

/// ```text
/// POST /sync                         -> sync
/// GET  /collection                   -> list_collection
/// PUT  /collection/{character_id}    -> update_collection_entry
/// POST /buy-cards                    -> buy_cards
/// POST /refresh-moves                -> refresh_moves
/// POST /use-moves                    -> use_moves
/// POST /pull                         -> pull
/// POST /gacha                        -> gacha
/// POST /starter-pack                 -> starter_pack
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sync", post(economy::sync))
        .route("/collection", get(collection::list_collection))
        .route(
            "/collection/{character_id}",
            put(collection::update_collection_entry),
        )
        .route("/buy-cards", post(economy::buy_cards))
        .route("/refresh-moves", post(economy::refresh_moves))
        .route("/use-moves", post(economy::use_moves))
        .route("/pull", post(gacha::pull))
        .route("/gacha", post(gacha::gacha))
        .route("/starter-pack", post(gacha::starter_pack))
}
