//! WASM bindings for the browser frontend

#![cfg(feature = "wasm")]

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{EngineConfig, Move, RoundOutcome, RoundReport, Session, SessionStats, UNKNOWN_EMOJI};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsView {
    player_score: u32,
    opponent_score: u32,
    rounds_played: u32,
    win_rate: u32,
}

impl From<SessionStats> for StatsView {
    fn from(stats: SessionStats) -> Self {
        Self {
            player_score: stats.player_score,
            opponent_score: stats.opponent_score,
            rounds_played: stats.rounds_played,
            win_rate: stats.win_rate(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoundView {
    player_move: Move,
    opponent_move: Move,
    outcome: RoundOutcome,
    message: String,
    stats: StatsView,
}

impl From<RoundReport> for RoundView {
    fn from(report: RoundReport) -> Self {
        Self {
            message: report.message(),
            player_move: report.player_move,
            opponent_move: report.opponent_move,
            outcome: report.outcome,
            stats: report.stats.into(),
        }
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// A play session owned by the page
#[wasm_bindgen]
pub struct RpsGame {
    session: Session,
}

#[wasm_bindgen]
impl RpsGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> RpsGame {
        RpsGame { session: Session::new() }
    }

    /// Reproducible session, for replays and demos
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed: u32) -> RpsGame {
        RpsGame { session: Session::with_seed(u64::from(seed)) }
    }

    /// Session with engine settings given as JSON
    ///
    /// Missing fields keep their standard values, e.g.
    /// `{"noiseProbability": 0.1, "windowSize": 12}`.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<RpsGame, JsError> {
        let config: EngineConfig = serde_json::from_str(config_json)
            .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
        let session = Session::with_config(config)?;
        Ok(RpsGame { session })
    }

    /// Play one round
    ///
    /// Returns `{playerMove, opponentMove, outcome, message, stats}`.
    /// Throws if `choice` is not rock, paper or scissors.
    #[wasm_bindgen(js_name = submitPlayerMove)]
    pub fn submit_player_move(&mut self, choice: &str) -> Result<JsValue, JsError> {
        let report = self.session.submit_player_choice(choice)?;
        to_js(&RoundView::from(report))
    }

    #[wasm_bindgen(js_name = resetSession)]
    pub fn reset_session(&mut self) -> Result<JsValue, JsError> {
        let stats = self.session.reset_session();
        to_js(&StatsView::from(stats))
    }

    pub fn stats(&self) -> Result<JsValue, JsError> {
        to_js(&StatsView::from(self.session.stats()))
    }

    #[wasm_bindgen(js_name = historyLength)]
    pub fn history_length(&self) -> u32 {
        self.session.history().len() as u32
    }

    /// Player moves so far, oldest first, as lowercase names
    pub fn history(&self) -> js_sys::Array {
        self.session
            .history()
            .iter()
            .map(|m| JsValue::from_str(m.as_str()))
            .collect()
    }
}

impl Default for RpsGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Display glyph for a move, or the placeholder for anything else
#[wasm_bindgen(js_name = moveEmoji)]
pub fn move_emoji(choice: &str) -> String {
    choice
        .parse::<Move>()
        .map(Move::emoji)
        .unwrap_or(UNKNOWN_EMOJI)
        .to_string()
}
