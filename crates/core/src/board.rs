//! The 5×5 exploration board.
//!
//! A board is persisted as a JSON blob per user. The player starts in the
//! centre and walks one tile at a time (including diagonals), uncovering
//! the tile they step on. Once every tile is discovered the board is
//! complete and the saved progress is discarded.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::tile::{Tile, TileKind};

/// Width and height of the board.
pub const GRID_SIZE: usize = 5;

/// Where a fresh board places the player.
pub const START_POSITION: Position = Position { x: 2, y: 2 };

/// The hidden tiles dealt onto a fresh board (everything except the start).
const TILE_DECK: [(TileKind, usize); 9] = [
    (TileKind::G1, 9),
    (TileKind::G2, 6),
    (TileKind::G3, 3),
    (TileKind::E1, 1),
    (TileKind::E2, 1),
    (TileKind::E3, 1),
    (TileKind::C1, 1),
    (TileKind::C2, 1),
    (TileKind::C3, 1),
];

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A board coordinate. Signed so untrusted input can be range-checked
/// instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        let size = GRID_SIZE as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }

    /// Chebyshev adjacency: the eight surrounding tiles, never the tile itself.
    pub fn is_adjacent(self, other: Position) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Result of a legal move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Kind of the tile the player stepped onto, before it became `P`.
    pub uncovered: TileKind,
    /// `false` when the player walked back onto a tile they already visited.
    pub newly_discovered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Row-major: `tiles[y][x]`.
    pub tiles: [[Tile; GRID_SIZE]; GRID_SIZE],
    pub player: Position,
}

impl Board {
    /// Deal a fresh board: the player in the centre, the rest shuffled.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck: Vec<TileKind> = TILE_DECK
            .iter()
            .flat_map(|(kind, count)| std::iter::repeat(kind.clone()).take(*count))
            .collect();
        deck.shuffle(rng);

        // The deck holds exactly one tile per cell other than the start.
        let mut deck = deck.into_iter();
        let tiles = std::array::from_fn(|y| {
            std::array::from_fn(|x| {
                if Position::new(x as i32, y as i32) == START_POSITION {
                    Tile {
                        kind: TileKind::Player,
                        discovered: true,
                    }
                } else {
                    deck.next().map_or(
                        Tile {
                            kind: TileKind::Claimed,
                            discovered: true,
                        },
                        Tile::hidden,
                    )
                }
            })
        });

        Self {
            tiles,
            player: START_POSITION,
        }
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        if !pos.in_bounds() {
            return None;
        }
        Some(&self.tiles[pos.y as usize][pos.x as usize])
    }

    fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if !pos.in_bounds() {
            return None;
        }
        Some(&mut self.tiles[pos.y as usize][pos.x as usize])
    }

    /// Check that the player may step onto `target` without changing anything.
    pub fn validate_move(&self, target: Position) -> Result<(), CoreError> {
        if !target.in_bounds() {
            return Err(CoreError::Validation(format!(
                "Tile {target} is outside the {GRID_SIZE}x{GRID_SIZE} board"
            )));
        }
        if !self.player.is_adjacent(target) {
            return Err(CoreError::Validation(format!(
                "Tile {target} is not adjacent to the player at {}",
                self.player
            )));
        }
        Ok(())
    }

    /// Move the player onto `target`, marking the vacated tile as claimed.
    pub fn move_player(&mut self, target: Position) -> Result<MoveOutcome, CoreError> {
        self.validate_move(target)?;

        let from = self.player;
        let stepped = self
            .tile(target)
            .cloned()
            .ok_or_else(|| CoreError::Internal(format!("Tile {target} missing from board")))?;

        if let Some(vacated) = self.tile_mut(from) {
            *vacated = Tile {
                kind: TileKind::Claimed,
                discovered: true,
            };
        }
        if let Some(entered) = self.tile_mut(target) {
            *entered = Tile {
                kind: TileKind::Player,
                discovered: true,
            };
        }
        self.player = target;

        Ok(MoveOutcome {
            uncovered: stepped.kind,
            newly_discovered: !stepped.discovered,
        })
    }

    pub fn undiscovered_count(&self) -> usize {
        self.tiles
            .iter()
            .flatten()
            .filter(|tile| !tile.discovered)
            .count()
    }

    /// A board is complete once every tile has been discovered.
    pub fn is_complete(&self) -> bool {
        self.undiscovered_count() == 0
    }

    pub fn to_json(&self) -> Result<serde_json::Value, CoreError> {
        serde_json::to_value(self)
            .map_err(|e| CoreError::Internal(format!("Failed to serialize board: {e}")))
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, CoreError> {
        let board: Board = serde_json::from_value(value)
            .map_err(|e| CoreError::Internal(format!("Stored board is malformed: {e}")))?;
        if !board.player.in_bounds() {
            return Err(CoreError::Internal(format!(
                "Stored board has player outside the grid at {}",
                board.player
            )));
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board() -> Board {
        Board::generate(&mut StdRng::seed_from_u64(42))
    }

    #[test]
    fn generated_board_has_player_in_centre() {
        let board = board();
        assert_eq!(board.player, START_POSITION);
        let start = board.tile(START_POSITION).unwrap();
        assert_eq!(start.kind, TileKind::Player);
        assert!(start.discovered);
        assert_eq!(board.undiscovered_count(), GRID_SIZE * GRID_SIZE - 1);
    }

    #[test]
    fn generated_board_deals_the_whole_deck() {
        let board = board();
        let count = |kind: &TileKind| {
            board
                .tiles
                .iter()
                .flatten()
                .filter(|t| &t.kind == kind)
                .count()
        };
        for (kind, expected) in TILE_DECK {
            assert_eq!(count(&kind), expected, "wrong number of {kind}");
        }
        assert!(board
            .tiles
            .iter()
            .flatten()
            .all(|t| !matches!(t.kind, TileKind::Unknown(_))));
    }

    #[test]
    fn adjacency_includes_diagonals() {
        let centre = Position::new(2, 2);
        assert!(centre.is_adjacent(Position::new(1, 1)));
        assert!(centre.is_adjacent(Position::new(3, 2)));
        assert!(centre.is_adjacent(Position::new(3, 3)));
        assert!(!centre.is_adjacent(centre));
        assert!(!centre.is_adjacent(Position::new(4, 2)));
        assert!(!centre.is_adjacent(Position::new(0, 0)));
    }

    #[test]
    fn bounds_check_rejects_negative_and_overflow() {
        assert!(Position::new(0, 4).in_bounds());
        assert!(!Position::new(-1, 0).in_bounds());
        assert!(!Position::new(0, 5).in_bounds());
    }

    #[test]
    fn move_marks_vacated_tile_claimed() {
        let mut board = board();
        let target = Position::new(3, 3);
        let before = board.tile(target).unwrap().clone();

        let outcome = board.move_player(target).unwrap();

        assert_eq!(outcome.uncovered, before.kind);
        assert!(outcome.newly_discovered);
        assert_eq!(board.player, target);
        assert_eq!(board.tile(target).unwrap().kind, TileKind::Player);
        assert_eq!(board.tile(START_POSITION).unwrap().kind, TileKind::Claimed);
        assert!(board.tile(START_POSITION).unwrap().discovered);
    }

    #[test]
    fn walking_back_is_legal_but_not_new() {
        let mut board = board();
        board.move_player(Position::new(2, 1)).unwrap();
        let outcome = board.move_player(START_POSITION).unwrap();
        assert_eq!(outcome.uncovered, TileKind::Claimed);
        assert!(!outcome.newly_discovered);
    }

    #[test]
    fn illegal_moves_leave_board_untouched() {
        let mut board = board();
        let snapshot = board.clone();

        assert_matches!(
            board.move_player(Position::new(4, 4)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            board.move_player(Position::new(2, 5)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            board.move_player(START_POSITION),
            Err(CoreError::Validation(_))
        );
        assert_eq!(board, snapshot);
    }

    #[test]
    fn sweeping_every_tile_completes_the_board() {
        let mut board = board();
        // Snake through the grid row by row; every step is adjacent.
        board.move_player(Position::new(1, 1)).unwrap();
        board.move_player(Position::new(0, 0)).unwrap();
        for y in 0..GRID_SIZE as i32 {
            let xs: Vec<i32> = if y % 2 == 0 {
                (0..GRID_SIZE as i32).collect()
            } else {
                (0..GRID_SIZE as i32).rev().collect()
            };
            for x in xs {
                let pos = Position::new(x, y);
                if pos != board.player {
                    board.move_player(pos).unwrap();
                }
            }
        }
        assert!(board.is_complete());
        // Completion is a pure read; asking again changes nothing.
        assert!(board.is_complete());
    }

    #[test]
    fn json_round_trip_preserves_board() {
        let board = board();
        let json = board.to_json().unwrap();
        assert_eq!(json["player"], serde_json::json!({"x": 2, "y": 2}));
        assert_eq!(Board::from_json(json).unwrap(), board);
    }

    #[test]
    fn malformed_json_is_an_internal_error() {
        assert_matches!(
            Board::from_json(serde_json::json!({"tiles": []})),
            Err(CoreError::Internal(_))
        );
    }
}
