//! Predictive Rock-Paper-Scissors engine
//!
//! Core game logic for a rock-paper-scissors game whose opponent
//! predicts the player's next move from recent history.
//! This crate is compiled to:
//! - Native (for embedding and tests)
//! - WASM (for the browser frontend)

mod error;
mod game;
mod predict;
mod random;
mod score;
mod strategy;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::GameError;
pub use game::{RoundOutcome, RoundReport, Session};
pub use predict::{move_counts, predict_anti_pattern, predict_frequency, predict_pattern};
pub use random::{RandomSource, SeededRng};
pub use score::{ScoreTracker, SessionStats};
pub use strategy::{select_weighted, DecisionEngine, EngineConfig, Move, UNKNOWN_EMOJI};

/// Resolve a round from the player's perspective
pub fn resolve(player: Move, opponent: Move) -> RoundOutcome {
    if player == opponent {
        RoundOutcome::Tie
    } else if player.beats(opponent) {
        RoundOutcome::Win
    } else {
        RoundOutcome::Lose
    }
}
