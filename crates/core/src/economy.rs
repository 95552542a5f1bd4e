//! Economy constants and ledger arithmetic.
//!
//! The database applies every debit as a conditional update, so these
//! helpers exist to compute amounts, validate request sizes and describe
//! shortfalls consistently.

use chrono::Duration;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

/// Gold cost of one pull card.
pub const CARD_PRICE: i64 = 200;
/// Largest card purchase accepted in a single request.
pub const MAX_CARDS_PER_PURCHASE: i32 = 100;
/// Gold cost of a direct gacha pull (no card spent).
pub const PULL_GOLD_COST: i64 = 300;

// ---------------------------------------------------------------------------
// Moves
// ---------------------------------------------------------------------------

/// Upper bound on stored moves.
pub const MAX_MOVES: i32 = 30;
/// One move regenerates per elapsed interval.
pub const MOVE_REGEN_INTERVAL_SECS: i64 = 600;

// ---------------------------------------------------------------------------
// New players
// ---------------------------------------------------------------------------

pub const STARTING_GOLD: i64 = 1000;
pub const STARTING_MOVES: i32 = MAX_MOVES;
pub const STARTING_CARDS: i32 = 0;

/// Characters granted by the one-time starter pack.
pub const STARTER_PACK_CHARACTERS: i64 = 3;
/// Cards granted by the one-time starter pack.
pub const STARTER_PACK_CARDS: i32 = 3;

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// Gold cost of buying `count` cards. Rejects non-positive or oversized counts.
pub fn card_purchase_cost(count: i32) -> Result<i64, CoreError> {
    if !(1..=MAX_CARDS_PER_PURCHASE).contains(&count) {
        return Err(CoreError::Validation(format!(
            "Card count must be between 1 and {MAX_CARDS_PER_PURCHASE}, got {count}"
        )));
    }
    Ok(CARD_PRICE * i64::from(count))
}

/// Fail with [`CoreError::InsufficientFunds`] unless `available >= needed`.
pub fn ensure_affordable(
    resource: &'static str,
    available: i64,
    needed: i64,
) -> Result<(), CoreError> {
    if available < needed {
        return Err(CoreError::InsufficientFunds {
            resource,
            needed,
            available,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Move regeneration
// ---------------------------------------------------------------------------

/// Moves and refresh timestamp after applying regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRefresh {
    pub moves: i32,
    pub last_refresh: Timestamp,
    /// Moves added by this refresh (0 when nothing changed).
    pub gained: i32,
}

/// Apply move regeneration: one move per full [`MOVE_REGEN_INTERVAL_SECS`]
/// since `last_refresh`, capped at [`MAX_MOVES`].
///
/// Partial intervals carry over (the timestamp only advances by the
/// intervals consumed). A full ledger resets the timer to `now` so
/// regeneration starts counting from the next spend. Moves are never
/// lowered, except that a stored value above the cap is clamped.
pub fn refresh_moves(moves: i32, last_refresh: Timestamp, now: Timestamp) -> MoveRefresh {
    if moves >= MAX_MOVES {
        return MoveRefresh {
            moves: MAX_MOVES,
            last_refresh: now,
            gained: 0,
        };
    }

    let elapsed_secs = (now - last_refresh).num_seconds();
    let intervals = if elapsed_secs > 0 {
        elapsed_secs / MOVE_REGEN_INTERVAL_SECS
    } else {
        0
    };
    if intervals == 0 {
        return MoveRefresh {
            moves: moves.max(0),
            last_refresh,
            gained: 0,
        };
    }

    let missing = i64::from(MAX_MOVES - moves.max(0));
    let gained = intervals.min(missing) as i32;
    let new_moves = moves.max(0) + gained;
    let last_refresh = if new_moves >= MAX_MOVES {
        now
    } else {
        last_refresh + Duration::seconds(intervals * MOVE_REGEN_INTERVAL_SECS)
    };

    MoveRefresh {
        moves: new_moves,
        last_refresh,
        gained,
    }
}

/// Reject move spends outside `1..=MAX_MOVES`.
pub fn validate_move_count(count: i32) -> Result<(), CoreError> {
    if !(1..=MAX_MOVES).contains(&count) {
        return Err(CoreError::Validation(format!(
            "Move count must be between 1 and {MAX_MOVES}, got {count}"
        )));
    }
    Ok(())
}

/// Validate a request to spend `count` moves against the current balance.
pub fn spend_moves(moves: i32, count: i32) -> Result<i32, CoreError> {
    validate_move_count(count)?;
    ensure_affordable("moves", i64::from(moves), i64::from(count))?;
    Ok(moves - count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn card_cost_is_linear() {
        assert_eq!(card_purchase_cost(1).unwrap(), 200);
        assert_eq!(card_purchase_cost(5).unwrap(), 1000);
        assert_eq!(
            card_purchase_cost(MAX_CARDS_PER_PURCHASE).unwrap(),
            CARD_PRICE * 100
        );
    }

    #[test]
    fn card_cost_rejects_bad_counts() {
        assert_matches!(card_purchase_cost(0), Err(CoreError::Validation(_)));
        assert_matches!(card_purchase_cost(-3), Err(CoreError::Validation(_)));
        assert_matches!(
            card_purchase_cost(MAX_CARDS_PER_PURCHASE + 1),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn affordability_reports_shortfall() {
        assert!(ensure_affordable("gold", 400, 400).is_ok());
        assert_matches!(
            ensure_affordable("gold", 399, 400),
            Err(CoreError::InsufficientFunds {
                resource: "gold",
                needed: 400,
                available: 399
            })
        );
    }

    #[test]
    fn refresh_adds_one_move_per_interval() {
        let later = t0() + Duration::seconds(MOVE_REGEN_INTERVAL_SECS * 3 + 42);
        let refreshed = refresh_moves(10, t0(), later);
        assert_eq!(refreshed.moves, 13);
        assert_eq!(refreshed.gained, 3);
        // The 42 leftover seconds carry over to the next refresh.
        assert_eq!(
            refreshed.last_refresh,
            t0() + Duration::seconds(MOVE_REGEN_INTERVAL_SECS * 3)
        );
    }

    #[test]
    fn refresh_never_exceeds_cap() {
        let much_later = t0() + Duration::days(30);
        for moves in [0, 1, 29, 30, 31, 500] {
            let refreshed = refresh_moves(moves, t0(), much_later);
            assert!(refreshed.moves <= MAX_MOVES, "{moves} -> {}", refreshed.moves);
        }
        let refreshed = refresh_moves(0, t0(), much_later);
        assert_eq!(refreshed.moves, MAX_MOVES);
        assert_eq!(refreshed.last_refresh, much_later);
    }

    #[test]
    fn refresh_before_first_interval_changes_nothing() {
        let soon = t0() + Duration::seconds(MOVE_REGEN_INTERVAL_SECS - 1);
        let refreshed = refresh_moves(4, t0(), soon);
        assert_eq!(refreshed.moves, 4);
        assert_eq!(refreshed.gained, 0);
        assert_eq!(refreshed.last_refresh, t0());
    }

    #[test]
    fn refresh_tolerates_clock_skew() {
        let earlier = t0() - Duration::hours(1);
        let refreshed = refresh_moves(4, t0(), earlier);
        assert_eq!(refreshed.moves, 4);
        assert_eq!(refreshed.gained, 0);
    }

    #[test]
    fn spending_moves_checks_balance() {
        assert_eq!(spend_moves(5, 2).unwrap(), 3);
        assert_eq!(spend_moves(1, 1).unwrap(), 0);
        assert_matches!(
            spend_moves(0, 1),
            Err(CoreError::InsufficientFunds {
                resource: "moves",
                ..
            })
        );
        assert_matches!(spend_moves(5, 0), Err(CoreError::Validation(_)));
    }
}
