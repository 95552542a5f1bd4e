//! Shared query-string parameter types.

use charasphere_core::types::DbId;
use serde::Deserialize;

/// `?characterId=&limit=&offset=` for image listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageListParams {
    pub character_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
