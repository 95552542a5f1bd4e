//! User collection model and DTOs.

use charasphere_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::character::Character;
use crate::models::explicit_null;

/// A row from the `user_collection` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
    pub id: DbId,
    pub user_id: UserId,
    pub character_id: DbId,
    pub favorite: bool,
    pub selected_image_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// A collected character as shown in the player's collection view.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedCharacter {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub character: Character,
    pub series_name: Option<String>,
    pub favorite: bool,
    pub selected_image_id: Option<DbId>,
    pub selected_image_url: Option<String>,
    pub collected_at: Timestamp,
}

/// DTO for updating a collection entry. Only these two fields are mutable.
///
/// `selectedImageId: null` clears the selection; omitting it leaves it as is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollectionEntry {
    pub favorite: Option<bool>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub selected_image_id: Option<Option<DbId>>,
}
