//! The caller's owned characters.

use axum::extract::State;
use axum::response::IntoResponse;
use charasphere_core::error::CoreError;
use charasphere_core::types::DbId;
use charasphere_db::models::collection::{CollectedCharacter, CollectionEntry, UpdateCollectionEntry};
use charasphere_db::repositories::{CollectionRepo, GeneratedImageRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::success;
use crate::state::AppState;

#[derive(Serialize)]
struct CollectionList {
    collection: Vec<CollectedCharacter>,
}

#[derive(Serialize)]
struct EntryBody {
    entry: CollectionEntry,
}

/// GET /api/collection
pub async fn list_collection(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let collection = CollectionRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(success(CollectionList { collection }))
}

/// PUT /api/collection/{character_id}
///
/// Toggle `favorite` and/or pick the displayed artwork. A selected image
/// must belong to the same character; `"selectedImageId": null` clears it.
pub async fn update_collection_entry(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(character_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateCollectionEntry>,
) -> AppResult<impl IntoResponse> {
    if let Some(Some(image_id)) = input.selected_image_id {
        let image = GeneratedImageRepo::find_by_id(&state.pool, image_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "GeneratedImage",
                id: image_id,
            }))?;
        if image.character_id != Some(character_id) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Image {image_id} does not depict character {character_id}"
            ))));
        }
    }

    let entry = CollectionRepo::update(&state.pool, user.user_id, character_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CollectionEntry",
            id: character_id,
        }))?;
    Ok(success(EntryBody { entry }))
}
