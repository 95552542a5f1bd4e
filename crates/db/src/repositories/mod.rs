//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Simple reads take `&PgPool`; methods that take part in multi-statement
//! game transactions are generic over [`sqlx::PgExecutor`] so callers can
//! pass either the pool or `&mut *tx`.

pub mod collection_repo;
pub mod generated_image_repo;
pub mod grid_progress_repo;
pub mod player_stats_repo;
pub mod roster_repo;
pub mod series_repo;

pub use collection_repo::CollectionRepo;
pub use generated_image_repo::GeneratedImageRepo;
pub use grid_progress_repo::GridProgressRepo;
pub use player_stats_repo::PlayerStatsRepo;
pub use roster_repo::RosterRepo;
pub use series_repo::SeriesRepo;
