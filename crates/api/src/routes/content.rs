//! Artwork records and AI generation routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{content, images};
use crate::state::AppState;

/// ```text
/// GET  /images            -> list_images
/// POST /store-image       -> store_image
/// POST /delete-image      -> delete_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/images", get(images::list_images))
        .route("/store-image", post(images::store_image))
        .route("/delete-image", post(images::delete_image))
}

/// Routes that wait on an AI vendor. Kept separate so they can run under a
/// longer timeout than the rest of the API.
///
/// ```text
/// POST /grok              -> generate_bio
/// POST /generate-dialog   -> generate_dialog
/// POST /flux              -> generate_art
/// ```
pub fn generation_router() -> Router<AppState> {
    Router::new()
        .route("/grok", post(content::generate_bio))
        .route("/generate-dialog", post(content::generate_dialog))
        .route("/flux", post(content::generate_art))
}
