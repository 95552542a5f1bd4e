//! Repository for the `series` table.

use sqlx::PgPool;

use crate::models::series::{CreateSeries, Series};

const COLUMNS: &str = "id, name, universe, ability, created_at";

/// Read access to series reference data.
pub struct SeriesRepo;

impl SeriesRepo {
    /// Insert a series. The app never does this at runtime; seeding tools and
    /// tests do.
    pub async fn create(pool: &PgPool, input: &CreateSeries) -> Result<Series, sqlx::Error> {
        let query = format!(
            "INSERT INTO series (name, universe, ability)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Series>(&query)
            .bind(&input.name)
            .bind(&input.universe)
            .bind(&input.ability)
            .fetch_one(pool)
            .await
    }

    /// List all series ordered by universe, then name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Series>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM series ORDER BY universe ASC, name ASC");
        sqlx::query_as::<_, Series>(&query).fetch_all(pool).await
    }
}
