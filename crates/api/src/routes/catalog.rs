//! Public roster routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// ```text
/// GET  /characters          -> list_characters
/// GET  /characters/{id}     -> get_character
/// GET  /series              -> list_series
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/characters", get(catalog::list_characters))
        .route("/characters/{id}", get(catalog::get_character))
        .route("/series", get(catalog::list_series))
}
