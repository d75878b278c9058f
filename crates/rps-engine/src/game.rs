//! Round execution for a single play session

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GameError;
use crate::random::{RandomSource, SeededRng};
use crate::resolve;
use crate::score::{ScoreTracker, SessionStats};
use crate::strategy::{DecisionEngine, EngineConfig, Move};

/// Result of a round from the player's perspective
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundOutcome {
    Win,
    Lose,
    Tie,
}

impl RoundOutcome {
    /// The same round seen from the other side
    pub fn opposite(self) -> Self {
        match self {
            RoundOutcome::Win => RoundOutcome::Lose,
            RoundOutcome::Lose => RoundOutcome::Win,
            RoundOutcome::Tie => RoundOutcome::Tie,
        }
    }
}

/// Everything the presentation layer needs to show a round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    pub player_move: Move,
    pub opponent_move: Move,
    pub outcome: RoundOutcome,
    pub stats: SessionStats,
}

impl RoundReport {
    /// Result line shown under the revealed moves
    pub fn message(&self) -> String {
        match self.outcome {
            RoundOutcome::Win => format!(
                "You win! {} beats {}",
                self.player_move.emoji(),
                self.opponent_move.emoji()
            ),
            RoundOutcome::Lose => format!(
                "AI wins! {} beats {}",
                self.opponent_move.emoji(),
                self.player_move.emoji()
            ),
            RoundOutcome::Tie => format!("It's a tie! Both chose {}", self.player_move.emoji()),
        }
    }
}

/// One player's session against the predicting opponent
///
/// Owns the move history and scores. Rounds run to completion one at a
/// time; nothing is shared between sessions.
#[derive(Clone, Debug)]
pub struct Session<R = SeededRng> {
    engine: DecisionEngine,
    history: Vec<Move>,
    scores: ScoreTracker,
    rng: R,
}

impl Session<SeededRng> {
    /// Create a session with the standard config and an entropy seed
    pub fn new() -> Self {
        Self::with_rng(EngineConfig::standard(), SeededRng::from_entropy())
    }

    /// Create a reproducible session
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(EngineConfig::standard(), SeededRng::new(seed))
    }

    /// Create a session with a custom config and an entropy seed
    pub fn with_config(config: EngineConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::with_rng(config, SeededRng::from_entropy()))
    }
}

impl Default for Session<SeededRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Session<R> {
    /// Create a session drawing from the given random source
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        Self {
            engine: DecisionEngine::new(config),
            history: Vec::new(),
            scores: ScoreTracker::new(),
            rng,
        }
    }

    /// Play one round
    ///
    /// The player's move joins the history before the opponent decides,
    /// then the round is resolved and scored.
    pub fn submit_player_move(&mut self, player_move: Move) -> RoundReport {
        self.history.push(player_move);

        let opponent_move = self.engine.choose_move(&self.history, &mut self.rng);
        let outcome = resolve(player_move, opponent_move);
        self.scores.record(outcome);
        let stats = self.scores.stats();

        debug!(
            round = stats.rounds_played,
            player = %player_move,
            opponent = %opponent_move,
            ?outcome,
            "round resolved"
        );

        RoundReport {
            player_move,
            opponent_move,
            outcome,
            stats,
        }
    }

    /// Play one round from the text form of a move
    pub fn submit_player_choice(&mut self, choice: &str) -> Result<RoundReport, GameError> {
        let player_move = choice.parse::<Move>()?;
        Ok(self.submit_player_move(player_move))
    }

    /// Clear history and scores
    pub fn reset_session(&mut self) -> SessionStats {
        debug!(rounds = self.scores.stats().rounds_played, "session reset");
        self.history.clear();
        self.scores.reset();
        self.scores.stats()
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn stats(&self) -> SessionStats {
        self.scores.stats()
    }

    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }
}
