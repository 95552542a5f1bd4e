//! Repository for the `roster` table.

use charasphere_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::character::{Character, CharacterDetail, CharacterFilter, CreateCharacter};
use crate::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, bio, rarity, series_id, dialogs, image_urls, claimed, created_at";

/// Roster columns qualified with the `r` alias, plus the joined series fields.
const DETAIL_COLUMNS: &str = "r.id, r.name, r.bio, r.rarity, r.series_id, r.dialogs, \
     r.image_urls, r.claimed, r.created_at, \
     s.name AS series_name, s.universe AS series_universe, s.ability AS series_ability";

/// Queries over the master character table.
pub struct RosterRepo;

impl RosterRepo {
    /// Insert a roster character. Seeding tools and tests only.
    pub async fn create(pool: &PgPool, input: &CreateCharacter) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO roster (name, bio, rarity, series_id, dialogs, image_urls)
             VALUES ($1, COALESCE($2, ''), $3, $4,
                     COALESCE($5, '{{}}'::TEXT[]), COALESCE($6, '{{}}'::TEXT[]))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(&input.name)
            .bind(&input.bio)
            .bind(input.rarity)
            .bind(input.series_id)
            .bind(&input.dialogs)
            .bind(&input.image_urls)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CharacterDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS}
             FROM roster r
             LEFT JOIN series s ON s.id = r.series_id
             WHERE r.id = $1"
        );
        sqlx::query_as::<_, CharacterDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the roster, rarest first. Filters that are `None` are ignored.
    pub async fn list(
        pool: &PgPool,
        filter: &CharacterFilter,
    ) -> Result<Vec<CharacterDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS}
             FROM roster r
             LEFT JOIN series s ON s.id = r.series_id
             WHERE ($1::BIGINT IS NULL OR r.series_id = $1)
               AND ($2::SMALLINT IS NULL OR r.rarity = $2)
               AND ($3::BOOLEAN IS NULL OR r.claimed = NOT $3)
             ORDER BY r.rarity DESC, r.name ASC, r.id ASC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, CharacterDetail>(&query)
            .bind(filter.series_id)
            .bind(filter.rarity)
            .bind(filter.unclaimed)
            .bind(clamp_limit(filter.limit))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    pub async fn count_unclaimed<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM roster WHERE claimed = FALSE")
            .fetch_one(executor)
            .await
    }

    /// Atomically pick up to `count` random unclaimed characters and mark
    /// them claimed.
    ///
    /// Uses `SELECT FOR UPDATE SKIP LOCKED` so concurrent pulls can never
    /// hand out the same character; a character locked by another pull is
    /// simply skipped. Returns fewer rows than requested when the roster
    /// runs dry.
    pub async fn claim_random_unclaimed<'e, E>(
        executor: E,
        count: i64,
    ) -> Result<Vec<Character>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE roster
             SET claimed = TRUE
             WHERE claimed = FALSE
               AND id IN (
                 SELECT id FROM roster
                 WHERE claimed = FALSE
                 ORDER BY random()
                 LIMIT $1
                 FOR UPDATE SKIP LOCKED
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(count)
            .fetch_all(executor)
            .await
    }

    /// Replace a character's bio. Returns `None` if the character is missing.
    pub async fn update_bio(
        pool: &PgPool,
        id: DbId,
        bio: &str,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("UPDATE roster SET bio = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(bio)
            .fetch_optional(pool)
            .await
    }

    /// Replace a character's dialog lines. Returns `None` if the character is missing.
    pub async fn update_dialogs(
        pool: &PgPool,
        id: DbId,
        dialogs: &[String],
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("UPDATE roster SET dialogs = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(dialogs)
            .fetch_optional(pool)
            .await
    }
}
