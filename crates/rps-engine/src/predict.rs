//! Heuristic predictors of the player's next move
//!
//! Each predictor reads the analysis window (the most recent player
//! moves, oldest first) and names the move it expects next.

use crate::strategy::Move;

/// Count how often each move appears, indexed in `Move::ALL` order
pub fn move_counts(window: &[Move]) -> [usize; 3] {
    let mut counts = [0usize; 3];
    for m in window {
        counts[m.index()] += 1;
    }
    counts
}

/// Pattern: look for an earlier occurrence of the trailing moves
///
/// Positions are scanned from the oldest. At each position a match of
/// the trailing three moves is checked before a match of the trailing
/// two; the first hit predicts whatever followed it. The follower must
/// come before the last move of the window, so the trailing context
/// never matches itself.
///
/// Returns `None` when no repeated context exists.
pub fn predict_pattern(window: &[Move]) -> Option<Move> {
    let len = window.len();
    if len < 3 {
        return None;
    }

    let last_two = &window[len - 2..];
    let last_three = &window[len - 3..];

    for i in 0..len - 2 {
        if i + 4 < len && window[i..i + 3] == *last_three {
            return Some(window[i + 3]);
        }
        if i + 3 < len && window[i..i + 2] == *last_two {
            return Some(window[i + 2]);
        }
    }

    None
}

/// Frequency: the most played move, ties go to the earlier move
pub fn predict_frequency(window: &[Move]) -> Move {
    let counts = move_counts(window);
    let mut best = Move::Rock;
    for m in Move::ALL {
        if counts[m.index()] > counts[best.index()] {
            best = m;
        }
    }
    best
}

/// Anti-pattern: the least played move, ties go to the earlier move
///
/// Models a player drifting away from an overused throw.
pub fn predict_anti_pattern(window: &[Move]) -> Move {
    let counts = move_counts(window);
    let mut best = Move::Rock;
    for m in Move::ALL {
        if counts[m.index()] < counts[best.index()] {
            best = m;
        }
    }
    best
}
