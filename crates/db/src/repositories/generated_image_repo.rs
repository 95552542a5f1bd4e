//! Repository for the `generated_image` table.

use charasphere_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::generated_image::{CreateGeneratedImage, GeneratedImage};
use crate::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, character_id, url, prompt, style, seed, created_by, created_at";

pub struct GeneratedImageRepo;

impl GeneratedImageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateGeneratedImage,
    ) -> Result<GeneratedImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO generated_image (character_id, url, prompt, style, seed, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(input.character_id)
            .bind(&input.url)
            .bind(&input.prompt)
            .bind(&input.style)
            .bind(input.seed)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GeneratedImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generated_image WHERE id = $1");
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Newest first, optionally restricted to one character.
    pub async fn list(
        pool: &PgPool,
        character_id: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<GeneratedImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generated_image
             WHERE ($1::BIGINT IS NULL OR character_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(character_id)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Delete an image the user created. Collection entries that had it
    /// selected fall back to no selection (`ON DELETE SET NULL`).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_owned(pool: &PgPool, id: DbId, user_id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM generated_image WHERE id = $1 AND created_by = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
