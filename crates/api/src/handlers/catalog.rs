//! Public read-only roster endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use charasphere_core::error::CoreError;
use charasphere_core::types::DbId;
use charasphere_db::models::character::{CharacterDetail, CharacterFilter};
use charasphere_db::models::series::Series;
use charasphere_db::repositories::{RosterRepo, SeriesRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::response::success;
use crate::state::AppState;

#[derive(Serialize)]
struct CharacterList {
    characters: Vec<CharacterDetail>,
}

#[derive(Serialize)]
struct CharacterBody {
    character: CharacterDetail,
}

#[derive(Serialize)]
struct SeriesList {
    series: Vec<Series>,
}

/// GET /api/characters?seriesId=&rarity=&unclaimed=&limit=&offset=
pub async fn list_characters(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<CharacterFilter>,
) -> AppResult<impl IntoResponse> {
    if let Some(rarity) = filter.rarity {
        if !(1..=6).contains(&rarity) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "rarity must be between 1 and 6, got {rarity}"
            ))));
        }
    }
    let characters = RosterRepo::list(&state.pool, &filter).await?;
    Ok(success(CharacterList { characters }))
}

/// GET /api/characters/{id}
pub async fn get_character(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let character = RosterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(success(CharacterBody { character }))
}

/// GET /api/series
pub async fn list_series(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let series = SeriesRepo::list(&state.pool).await?;
    Ok(success(SeriesList { series }))
}
