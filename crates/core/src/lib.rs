//! Pure game rules for CharaSphere.
//!
//! Nothing in this crate performs I/O. Tile rewards, board movement and the
//! economy arithmetic live here so the database and HTTP layers can share
//! one definition of the rules.

pub mod board;
pub mod economy;
pub mod error;
pub mod tile;
pub mod types;
