//! Repository for the `user_collection` table.

use charasphere_core::types::{DbId, UserId};
use sqlx::{PgExecutor, PgPool};

use crate::models::collection::{CollectedCharacter, CollectionEntry, UpdateCollectionEntry};

const COLUMNS: &str = "id, user_id, character_id, favorite, selected_image_id, created_at";

/// Join rows between users and the roster characters they own.
pub struct CollectionRepo;

impl CollectionRepo {
    /// Record that `user_id` now owns `character_id`.
    pub async fn insert<'e, E>(
        executor: E,
        user_id: UserId,
        character_id: DbId,
    ) -> Result<CollectionEntry, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO user_collection (user_id, character_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CollectionEntry>(&query)
            .bind(user_id)
            .bind(character_id)
            .fetch_one(executor)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        user_id: UserId,
        character_id: DbId,
    ) -> Result<Option<CollectionEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_collection WHERE user_id = $1 AND character_id = $2"
        );
        sqlx::query_as::<_, CollectionEntry>(&query)
            .bind(user_id)
            .bind(character_id)
            .fetch_optional(pool)
            .await
    }

    /// The player's collection, favorites first, then rarest.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<CollectedCharacter>, sqlx::Error> {
        sqlx::query_as::<_, CollectedCharacter>(
            "SELECT r.id, r.name, r.bio, r.rarity, r.series_id, r.dialogs, r.image_urls,
                    r.claimed, r.created_at,
                    s.name AS series_name,
                    uc.favorite, uc.selected_image_id,
                    gi.url AS selected_image_url,
                    uc.created_at AS collected_at
             FROM user_collection uc
             JOIN roster r ON r.id = uc.character_id
             LEFT JOIN series s ON s.id = r.series_id
             LEFT JOIN generated_image gi ON gi.id = uc.selected_image_id
             WHERE uc.user_id = $1
             ORDER BY uc.favorite DESC, r.rarity DESC, r.name ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Update `favorite` and/or `selected_image_id`. Fields left `None` are kept.
    ///
    /// Returns `None` if the player does not own the character.
    pub async fn update(
        pool: &PgPool,
        user_id: UserId,
        character_id: DbId,
        input: &UpdateCollectionEntry,
    ) -> Result<Option<CollectionEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE user_collection SET
                favorite = COALESCE($3, favorite),
                selected_image_id = CASE WHEN $4 THEN $5 ELSE selected_image_id END
             WHERE user_id = $1 AND character_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CollectionEntry>(&query)
            .bind(user_id)
            .bind(character_id)
            .bind(input.favorite)
            .bind(input.selected_image_id.is_some())
            .bind(input.selected_image_id.flatten())
            .fetch_optional(pool)
            .await
    }

    pub async fn count_for_user(pool: &PgPool, user_id: UserId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_collection WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
