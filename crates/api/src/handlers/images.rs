//! Generated artwork records.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use charasphere_core::error::CoreError;
use charasphere_core::types::{DbId, UserId};
use charasphere_db::models::generated_image::{CreateGeneratedImage, GeneratedImage};
use charasphere_db::repositories::{GeneratedImageRepo, RosterRepo};
use charasphere_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::ImageListParams;
use crate::response::success;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreImageRequest {
    #[serde(flatten)]
    pub image: CreateGeneratedImage,
    #[serde(default, alias = "userid")]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImageRequest {
    pub id: DbId,
    #[serde(default, alias = "userid")]
    pub user_id: Option<UserId>,
}

#[derive(Serialize)]
struct ImageBody {
    image: GeneratedImage,
}

#[derive(Serialize)]
struct ImageList {
    images: Vec<GeneratedImage>,
}

#[derive(Serialize)]
struct DeletedBody {
    deleted: DbId,
}

/// 404 unless the roster has a character with this id.
pub(crate) async fn ensure_character_exists(pool: &DbPool, id: DbId) -> AppResult<()> {
    RosterRepo::find_by_id(pool, id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))
}

fn validate_image_url(url: &str) -> Result<(), CoreError> {
    let url = url.trim();
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "url must be an absolute http(s) URL".into(),
        ))
    }
}

/// POST /api/store-image
pub async fn store_image(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<StoreImageRequest>,
) -> AppResult<impl IntoResponse> {
    user.ensure_matches(input.user_id)?;
    let mut image = input.image;
    validate_image_url(&image.url)?;
    if let Some(character_id) = image.character_id {
        ensure_character_exists(&state.pool, character_id).await?;
    }
    image.created_by = Some(user.user_id);

    let image = GeneratedImageRepo::create(&state.pool, &image).await?;
    tracing::info!(user_id = %user.user_id, image_id = image.id, "Image stored");

    Ok((StatusCode::CREATED, success(ImageBody { image })))
}

/// POST /api/delete-image
///
/// Only the user who stored an image may delete it.
pub async fn delete_image(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<DeleteImageRequest>,
) -> AppResult<impl IntoResponse> {
    user.ensure_matches(input.user_id)?;

    let deleted = GeneratedImageRepo::delete_owned(&state.pool, input.id, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "GeneratedImage",
            id: input.id,
        }));
    }

    tracing::info!(user_id = %user.user_id, image_id = input.id, "Image deleted");
    Ok(success(DeletedBody { deleted: input.id }))
}

/// GET /api/images?characterId=&limit=&offset=
pub async fn list_images(
    _user: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ImageListParams>,
) -> AppResult<impl IntoResponse> {
    let images =
        GeneratedImageRepo::list(&state.pool, params.character_id, params.limit, params.offset)
            .await?;
    Ok(success(ImageList { images }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_urls_must_be_absolute() {
        assert!(validate_image_url("https://cdn.example/a.png").is_ok());
        assert!(validate_image_url("http://localhost/a.png").is_ok());
        assert!(validate_image_url("ftp://cdn.example/a.png").is_err());
        assert!(validate_image_url("/a.png").is_err());
    }

    #[test]
    fn store_request_accepts_camel_case_body() {
        let user = uuid::Uuid::new_v4();
        let request: StoreImageRequest = serde_json::from_value(serde_json::json!({
            "characterId": 7,
            "url": "https://cdn.example/a.png",
            "prompt": "a knight",
            "seed": 12,
            "userId": user,
        }))
        .unwrap();
        assert_eq!(request.image.character_id, Some(7));
        assert_eq!(request.image.style, None);
        assert_eq!(request.image.created_by, None);
        assert_eq!(request.user_id, Some(user));
    }
}
