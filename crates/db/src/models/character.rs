//! Roster character model and DTOs.

use charasphere_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `roster` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub bio: String,
    /// 1 (common) to 6 (legendary).
    pub rarity: i16,
    pub series_id: Option<DbId>,
    pub dialogs: Vec<String>,
    /// Up to six artwork URLs.
    pub image_urls: Vec<String>,
    /// Set once the character has been pulled into some collection.
    pub claimed: bool,
    pub created_at: Timestamp,
}

/// A character joined with its series.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub character: Character,
    pub series_name: Option<String>,
    pub series_universe: Option<String>,
    pub series_ability: Option<String>,
}

/// DTO for seeding a roster character.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacter {
    pub name: String,
    pub bio: Option<String>,
    pub rarity: i16,
    pub series_id: Option<DbId>,
    pub dialogs: Option<Vec<String>>,
    pub image_urls: Option<Vec<String>>,
}

/// Filters for listing the roster. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterFilter {
    pub series_id: Option<DbId>,
    pub rarity: Option<i16>,
    /// `true` lists only characters still available to pull.
    pub unclaimed: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
