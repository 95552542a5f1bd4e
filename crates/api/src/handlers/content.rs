//! AI-backed content: bios, dialog lines and artwork.
//!
//! Text endpoints always answer: vendor failures degrade to canned content
//! and the response's `fallback` flag says so. Generated text is written back
//! to the shared roster only for a caller who owns the character. Artwork has
//! no sensible fallback, so vendor failures surface as 502/503/504.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use charasphere_ai::image::ImageRequest;
use charasphere_ai::prompts::{art_prompt, CharacterSubject};
use charasphere_core::error::CoreError;
use charasphere_core::types::{DbId, UserId};
use charasphere_db::models::character::CharacterDetail;
use charasphere_db::models::generated_image::{CreateGeneratedImage, GeneratedImage};
use charasphere_db::repositories::{CollectionRepo, GeneratedImageRepo, RosterRepo};
use charasphere_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::images::ensure_character_exists;
use crate::middleware::auth::AuthUser;
use crate::response::success;
use crate::state::AppState;

/// Longest art description accepted from a client.
const MAX_PROMPT_CHARS: usize = 1000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BioRequest {
    pub character_id: Option<DbId>,
    pub name: Option<String>,
    pub series: Option<String>,
    /// Write the generated bio back to the roster (needs `characterId`).
    #[serde(default)]
    pub save: bool,
    #[serde(default, alias = "userid")]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogRequest {
    pub character_id: DbId,
    #[serde(default, alias = "userid")]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FluxRequest {
    pub prompt: String,
    pub style: Option<String>,
    pub seed: Option<i64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub character_id: Option<DbId>,
    #[serde(default, alias = "userid")]
    pub user_id: Option<UserId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BioBody {
    bio: String,
    fallback: bool,
    saved: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DialogBody {
    dialogs: Vec<String>,
    fallback: bool,
    saved: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtBody {
    image: GeneratedImage,
    job_id: String,
}

fn subject_from(detail: &CharacterDetail) -> CharacterSubject {
    let bio = Some(detail.character.bio.clone()).filter(|b| !b.trim().is_empty());
    CharacterSubject {
        name: detail.character.name.clone(),
        series: detail.series_name.clone(),
        universe: detail.series_universe.clone(),
        bio,
    }
}

async fn load_character(pool: &DbPool, id: DbId) -> AppResult<CharacterDetail> {
    RosterRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))
}

async fn owns_character(pool: &DbPool, user_id: UserId, character_id: DbId) -> AppResult<bool> {
    Ok(CollectionRepo::find(pool, user_id, character_id)
        .await?
        .is_some())
}

/// POST /api/grok
///
/// Bio for a roster character (`characterId`) or an ad-hoc `name`/`series`.
pub async fn generate_bio(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<BioRequest>,
) -> AppResult<impl IntoResponse> {
    user.ensure_matches(input.user_id)?;

    let subject = match (input.character_id, input.name.as_deref().map(str::trim)) {
        (Some(id), _) => subject_from(&load_character(&state.pool, id).await?),
        (None, Some(name)) if !name.is_empty() => CharacterSubject {
            series: input.series.clone().filter(|s| !s.trim().is_empty()),
            ..CharacterSubject::named(name)
        },
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Either characterId or name is required".into(),
            )))
        }
    };

    if let (true, Some(id)) = (input.save, input.character_id) {
        if !owns_character(&state.pool, user.user_id, id).await? {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only a player who owns this character can save its bio".into(),
            )));
        }
    }

    let generated = state.content.character_bio(&subject).await;

    let mut saved = false;
    if let (true, Some(id), false) = (input.save, input.character_id, generated.fallback) {
        saved = RosterRepo::update_bio(&state.pool, id, &generated.value)
            .await?
            .is_some();
        if saved {
            tracing::info!(character_id = id, "Bio saved to roster");
        }
    }

    Ok(success(BioBody {
        bio: generated.value,
        fallback: generated.fallback,
        saved,
    }))
}

/// POST /api/generate-dialog
///
/// Generated lines replace the character's stored dialog when the caller owns
/// the character; canned lines are returned but never stored.
pub async fn generate_dialog(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<DialogRequest>,
) -> AppResult<impl IntoResponse> {
    user.ensure_matches(input.user_id)?;

    let character = load_character(&state.pool, input.character_id).await?;
    let owned = owns_character(&state.pool, user.user_id, input.character_id).await?;
    let generated = state
        .content
        .character_dialogs(&subject_from(&character))
        .await;

    let saved = if generated.fallback || !owned {
        false
    } else {
        RosterRepo::update_dialogs(&state.pool, input.character_id, &generated.value)
            .await?
            .is_some()
    };

    Ok(success(DialogBody {
        dialogs: generated.value,
        fallback: generated.fallback,
        saved,
    }))
}

/// POST /api/flux
///
/// Generate artwork and record it as a `generated_image` owned by the caller.
pub async fn generate_art(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<FluxRequest>,
) -> AppResult<impl IntoResponse> {
    user.ensure_matches(input.user_id)?;

    let description = input.prompt.trim();
    if description.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "prompt must not be empty".into(),
        )));
    }
    if description.chars().count() > MAX_PROMPT_CHARS {
        return Err(AppError::Core(CoreError::Validation(format!(
            "prompt must be at most {MAX_PROMPT_CHARS} characters"
        ))));
    }
    if let Some(character_id) = input.character_id {
        ensure_character_exists(&state.pool, character_id).await?;
    }

    let prompt = art_prompt(description, input.style.as_deref());
    let request = ImageRequest::new(prompt.clone(), input.width, input.height).with_seed(input.seed);
    let art = state.images.generate(&request).await?;

    let image = GeneratedImageRepo::create(
        &state.pool,
        &CreateGeneratedImage {
            character_id: input.character_id,
            url: art.url,
            prompt,
            style: input.style,
            seed: art.seed,
            created_by: Some(user.user_id),
        },
    )
    .await?;

    tracing::info!(
        user_id = %user.user_id,
        image_id = image.id,
        job_id = %art.job_id,
        "Artwork generated",
    );

    Ok((
        StatusCode::CREATED,
        success(ArtBody {
            image,
            job_id: art.job_id,
        }),
    ))
}
