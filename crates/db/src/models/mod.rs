//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and patches where the app writes the table
//!
//! Models serialize in camelCase to match the browser client.

pub mod character;
pub mod collection;
pub mod generated_image;
pub mod grid_progress;
pub mod player_stats;
pub mod series;

use serde::{Deserialize, Deserializer};

/// Deserialize a field that distinguishes "absent" from "explicitly null".
///
/// Pair with `#[serde(default)]`: a missing key yields `None`, `null` yields
/// `Some(None)`, and a value yields `Some(Some(v))`.
pub(crate) fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
