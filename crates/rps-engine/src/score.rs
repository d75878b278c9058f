//! Session score bookkeeping

use serde::{Deserialize, Serialize};

use crate::game::RoundOutcome;

/// Running totals for one session
///
/// Ties raise neither score, so `player_score + opponent_score` never
/// exceeds `rounds_played`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub player_score: u32,
    pub opponent_score: u32,
    pub rounds_played: u32,
}

impl SessionStats {
    /// Player win percentage, rounded to the nearest integer
    pub fn win_rate(&self) -> u32 {
        if self.rounds_played == 0 {
            return 0;
        }
        (100.0 * self.player_score as f64 / self.rounds_played as f64).round() as u32
    }

    pub fn ties(&self) -> u32 {
        self.rounds_played
            .saturating_sub(self.player_score)
            .saturating_sub(self.opponent_score)
    }
}

/// Accumulates round outcomes into [`SessionStats`]
#[derive(Clone, Debug, Default)]
pub struct ScoreTracker {
    stats: SessionStats,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Win => self.stats.player_score = self.stats.player_score.saturating_add(1),
            RoundOutcome::Lose => {
                self.stats.opponent_score = self.stats.opponent_score.saturating_add(1)
            }
            RoundOutcome::Tie => {}
        }
        self.stats.rounds_played = self.stats.rounds_played.saturating_add(1);
    }

    pub fn reset(&mut self) {
        self.stats = SessionStats::default();
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn win_rate(&self) -> u32 {
        self.stats.win_rate()
    }
}
