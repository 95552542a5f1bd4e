pub mod catalog;
pub mod content;
pub mod game;
pub mod health;
pub mod player;

use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tower_http::timeout::TimeoutLayer;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /characters                  roster listing (public)
/// /characters/{id}             one character (public)
/// /series                      series listing (public)
///
/// /sync                        ensure ledger, regenerate moves
/// /collection                  caller's characters
/// /collection/{character_id}   favorite / selected image (PUT)
/// /buy-cards                   gold -> cards
/// /pull                        card -> character
/// /gacha                       gold -> character
/// /starter-pack                one-time characters + cards
/// /refresh-moves               apply move regeneration
/// /use-moves                   spend moves
///
/// /game-state                  stats + board
/// /new-game                    deal a fresh board
/// /discover-tile               move + reveal
///
/// /images                      generated artwork listing
/// /store-image                 record artwork
/// /delete-image                delete own artwork
/// /grok                        character bio             (generation timeout)
/// /generate-dialog             character dialog lines    (generation timeout)
/// /flux                        generate artwork          (generation timeout)
/// ```
///
/// Every route answers 408 once its timeout elapses.
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .merge(player::router())
        .merge(game::router())
        .merge(content::router())
        .layer(timeout_layer(config.request_timeout_secs))
        .merge(content::generation_router().layer(timeout_layer(config.generation_timeout_secs)))
}

/// A timeout that answers `408 Request Timeout`.
pub fn timeout_layer(secs: u64) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_secs(secs))
}
