//! Series reference data.

use charasphere_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `series` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: DbId,
    pub name: String,
    pub universe: String,
    pub ability: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for seeding a series.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeries {
    pub name: String,
    pub universe: String,
    pub ability: Option<String>,
}
