//! Move definitions and opponent move selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::GameError;
use crate::predict::{predict_anti_pattern, predict_frequency, predict_pattern};
use crate::random::RandomSource;

/// Glyph shown before a move is revealed
pub const UNKNOWN_EMOJI: &str = "❓";

/// A move in Rock-Paper-Scissors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// Every move, in the order used to break ties
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Rock beats scissors, scissors beats paper, paper beats rock
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Scissors, Move::Paper) | (Move::Paper, Move::Rock)
        )
    }

    /// The move that beats this one
    pub fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Move::Rock => "🪨",
            Move::Paper => "📄",
            Move::Scissors => "✂️",
        }
    }

    /// Uniformly random move
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Move {
        Move::ALL[rng.next_index(Move::ALL.len())]
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Move::Rock => 0,
            Move::Paper => 1,
            Move::Scissors => 2,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            _ => Err(GameError::InvalidMove(s.to_string())),
        }
    }
}

/// Tunable constants of the decision engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Weights for rock, paper, scissors while history is short
    pub opening_weights: [f64; 3],
    /// History length from which the predictors take over
    pub min_history: usize,
    /// Number of recent moves the predictors look at
    pub window_size: usize,
    pub pattern_weight: f64,
    pub frequency_weight: f64,
    pub anti_pattern_weight: f64,
    /// Chance to ignore the prediction and play a random move
    pub noise_probability: f64,
}

impl EngineConfig {
    /// Standard config: paper-leaning opening, 10-move window
    pub fn standard() -> Self {
        Self {
            opening_weights: [0.3, 0.4, 0.3],
            min_history: 3,
            window_size: 10,
            pattern_weight: 0.4,
            frequency_weight: 0.3,
            anti_pattern_weight: 0.3,
            noise_probability: 0.2,
        }
    }

    /// Reject weights and probabilities the engine cannot draw from
    pub fn validate(&self) -> Result<(), GameError> {
        check_weights("opening weights", &self.opening_weights)?;
        check_weights(
            "predictor weights",
            &[self.pattern_weight, self.frequency_weight, self.anti_pattern_weight],
        )?;
        if !(0.0..=1.0).contains(&self.noise_probability) {
            return Err(GameError::InvalidConfig(format!(
                "noise probability {} outside [0, 1]",
                self.noise_probability
            )));
        }
        if self.window_size < 3 {
            return Err(GameError::InvalidConfig(format!(
                "window size {} is below 3",
                self.window_size
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_weights(name: &str, weights: &[f64]) -> Result<(), GameError> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(GameError::InvalidConfig(format!(
            "{} must be finite and non-negative",
            name
        )));
    }
    if weights.iter().sum::<f64>() <= 0.0 {
        return Err(GameError::InvalidConfig(format!("{} sum to zero", name)));
    }
    Ok(())
}

/// Select by cumulative weight
///
/// Walks the candidates in order and returns the first whose running
/// total reaches `draw`. Zero-weight candidates are never chosen.
/// Returns `None` if `draw` lies past the total weight.
pub fn select_weighted<T: Copy>(candidates: &[(T, f64)], draw: f64) -> Option<T> {
    let mut cumulative = 0.0;
    for &(candidate, weight) in candidates {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        if draw <= cumulative {
            return Some(candidate);
        }
    }
    None
}

/// Draw once in [0, total weight) and select by cumulative weight
fn pick_weighted<T: Copy, R: RandomSource + ?Sized>(
    candidates: &[(T, f64)],
    rng: &mut R,
) -> Option<T> {
    let total: f64 = candidates.iter().map(|(_, w)| w.max(0.0)).sum();
    if total.is_nan() || total <= 0.0 {
        return None;
    }
    select_weighted(candidates, rng.next_below(total))
}

/// Chooses the opponent's move from the player's history
#[derive(Clone, Debug, Default)]
pub struct DecisionEngine {
    config: EngineConfig,
}

impl DecisionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Choose the opponent's move for the current round
    ///
    /// # Arguments
    /// * `history` - Player moves so far, including this round's move
    /// * `rng` - Source of every random draw
    pub fn choose_move<R: RandomSource + ?Sized>(&self, history: &[Move], rng: &mut R) -> Move {
        if history.len() < self.config.min_history {
            return self.opening_move(rng);
        }

        let predicted = self.predict(history, rng);
        self.counter_move(predicted, rng)
    }

    /// Weighted opening used until enough history exists
    pub fn opening_move<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Move {
        let weights = self.config.opening_weights;
        let candidates = [
            (Move::Rock, weights[0]),
            (Move::Paper, weights[1]),
            (Move::Scissors, weights[2]),
        ];
        match pick_weighted(&candidates, rng) {
            Some(m) => m,
            None => Move::random(rng),
        }
    }

    /// Predict the player's next move from the recent window
    pub fn predict<R: RandomSource + ?Sized>(&self, history: &[Move], rng: &mut R) -> Move {
        let start = history.len().saturating_sub(self.config.window_size);
        let window = &history[start..];

        let pattern = match predict_pattern(window) {
            Some(m) => m,
            None => Move::random(rng),
        };
        let frequency = predict_frequency(window);
        let anti_pattern = predict_anti_pattern(window);
        trace!(%pattern, %frequency, %anti_pattern, "predictor outputs");

        let candidates = [
            (pattern, self.config.pattern_weight),
            (frequency, self.config.frequency_weight),
            (anti_pattern, self.config.anti_pattern_weight),
        ];
        match pick_weighted(&candidates, rng) {
            Some(m) => m,
            None => Move::random(rng),
        }
    }

    /// Beat the predicted move, except for occasional random noise
    pub fn counter_move<R: RandomSource + ?Sized>(&self, predicted: Move, rng: &mut R) -> Move {
        if rng.next_unit() < self.config.noise_probability {
            return Move::random(rng);
        }
        predicted.counter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRng;
    use Move::{Paper as P, Rock as R, Scissors as S};

    /// Replays a fixed list of draws, cycling at the end
    struct Scripted {
        draws: Vec<f64>,
        pos: usize,
    }

    impl Scripted {
        fn new(draws: &[f64]) -> Self {
            Self { draws: draws.to_vec(), pos: 0 }
        }
    }

    impl RandomSource for Scripted {
        fn next_unit(&mut self) -> f64 {
            let d = self.draws[self.pos % self.draws.len()];
            self.pos += 1;
            d
        }
    }

    #[test]
    fn test_beats_cycle() {
        assert!(R.beats(S));
        assert!(S.beats(P));
        assert!(P.beats(R));
        assert!(!R.beats(P));
        assert!(!R.beats(R));
    }

    #[test]
    fn test_counter_beats_original() {
        for m in Move::ALL {
            assert!(m.counter().beats(m));
        }
        assert_eq!(R.counter(), P);
        assert_eq!(P.counter(), S);
        assert_eq!(S.counter(), R);
    }

    #[test]
    fn test_parse_moves() {
        assert_eq!("rock".parse::<Move>(), Ok(R));
        assert_eq!(" Paper ".parse::<Move>(), Ok(P));
        assert_eq!("SCISSORS".parse::<Move>(), Ok(S));
        assert_eq!(
            "lizard".parse::<Move>(),
            Err(GameError::InvalidMove("lizard".to_string()))
        );
        assert!("".parse::<Move>().is_err());
    }

    #[test]
    fn test_display_matches_serde() {
        for m in Move::ALL {
            let json = serde_json::to_string(&m).unwrap();
            assert_eq!(json, format!("\"{}\"", m));
        }
    }

    #[test]
    fn test_random_move_uses_index() {
        let mut rng = Scripted::new(&[0.0, 0.5, 0.99]);
        assert_eq!(Move::random(&mut rng), R);
        assert_eq!(Move::random(&mut rng), P);
        assert_eq!(Move::random(&mut rng), S);
    }

    #[test]
    fn test_select_weighted_cumulative() {
        let candidates = [(R, 0.4), (P, 0.3), (S, 0.3)];
        assert_eq!(select_weighted(&candidates, 0.0), Some(R));
        assert_eq!(select_weighted(&candidates, 0.4), Some(R));
        assert_eq!(select_weighted(&candidates, 0.5), Some(P));
        assert_eq!(select_weighted(&candidates, 0.95), Some(S));
        assert_eq!(select_weighted(&candidates, 1.5), None);
    }

    #[test]
    fn test_select_weighted_skips_zero_weight() {
        let candidates = [(R, 0.0), (P, 1.0)];
        assert_eq!(select_weighted(&candidates, 0.0), Some(P));
        assert_eq!(select_weighted::<Move>(&[], 0.0), None);
    }

    #[test]
    fn test_opening_weights() {
        let engine = DecisionEngine::default();
        let mut rng = Scripted::new(&[0.1, 0.5, 0.8]);
        assert_eq!(engine.choose_move(&[], &mut rng), R);
        assert_eq!(engine.choose_move(&[R], &mut rng), P);
        assert_eq!(engine.choose_move(&[R, P], &mut rng), S);
    }

    #[test]
    fn test_frequency_prediction_countered() {
        let engine = DecisionEngine::default();
        // pattern falls back to random (rock), draw 0.5 picks frequency (rock), no noise
        let mut rng = Scripted::new(&[0.0, 0.5, 0.9]);
        assert_eq!(engine.choose_move(&[R, R, P], &mut rng), P);
    }

    #[test]
    fn test_anti_pattern_prediction_countered() {
        let engine = DecisionEngine::default();
        // draw 0.95 picks anti-pattern (scissors), countered by rock
        let mut rng = Scripted::new(&[0.0, 0.95, 0.9]);
        assert_eq!(engine.choose_move(&[R, R, P], &mut rng), R);
    }

    #[test]
    fn test_pattern_prediction_countered() {
        let engine = DecisionEngine::default();
        // [R, P] repeats, pattern predicts rock; draw 0.1 picks pattern
        let mut rng = Scripted::new(&[0.1, 0.9]);
        assert_eq!(engine.choose_move(&[R, P, R, P], &mut rng), P);
    }

    #[test]
    fn test_noise_overrides_prediction() {
        let engine = DecisionEngine::default();
        // draw 0.1 triggers noise, 0.9 picks scissors
        let mut rng = Scripted::new(&[0.1, 0.9]);
        assert_eq!(engine.counter_move(R, &mut rng), S);

        let mut rng = Scripted::new(&[0.2]);
        assert_eq!(engine.counter_move(R, &mut rng), P);
    }

    #[test]
    fn test_window_limits_history() {
        let engine = DecisionEngine::default();
        // Old scissors fall outside the 10-move window
        let mut history = vec![S; 20];
        history.extend([R, P, R, P, R, P, R, P, R, P]);
        // pattern predicts rock, draw 0.5 picks frequency; window counts tie so rock
        let mut rng = Scripted::new(&[0.5, 0.9]);
        assert_eq!(engine.predict(&history, &mut rng), R);
    }

    #[test]
    fn test_always_valid_move() {
        let engine = DecisionEngine::default();
        let mut rng = SeededRng::new(7);
        let mut history = Vec::new();

        for _ in 0..200 {
            let m = engine.choose_move(&history, &mut rng);
            assert!(Move::ALL.contains(&m));
            history.push(Move::random(&mut rng));
        }
    }

    #[test]
    fn test_degenerate_weights_fall_back() {
        let config = EngineConfig {
            opening_weights: [0.0, 0.0, 0.0],
            pattern_weight: 0.0,
            frequency_weight: 0.0,
            anti_pattern_weight: 0.0,
            ..EngineConfig::standard()
        };
        let engine = DecisionEngine::new(config);
        let mut rng = SeededRng::new(3);

        assert!(Move::ALL.contains(&engine.choose_move(&[], &mut rng)));
        assert!(Move::ALL.contains(&engine.choose_move(&[R, P, S, R], &mut rng)));
    }

    #[test]
    fn test_standard_config_is_valid() {
        assert_eq!(EngineConfig::standard().validate(), Ok(()));
        assert_eq!(EngineConfig::default(), EngineConfig::standard());
    }

    #[test]
    fn test_invalid_configs() {
        let negative = EngineConfig { pattern_weight: -0.1, ..Default::default() };
        assert!(matches!(negative.validate(), Err(GameError::InvalidConfig(_))));

        let zero = EngineConfig { opening_weights: [0.0; 3], ..Default::default() };
        assert!(matches!(zero.validate(), Err(GameError::InvalidConfig(_))));

        let noise = EngineConfig { noise_probability: 1.5, ..Default::default() };
        assert!(matches!(noise.validate(), Err(GameError::InvalidConfig(_))));

        let window = EngineConfig { window_size: 2, ..Default::default() };
        assert!(matches!(window.validate(), Err(GameError::InvalidConfig(_))));

        let nan = EngineConfig { frequency_weight: f64::NAN, ..Default::default() };
        assert!(matches!(nan.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_json_partial() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"noiseProbability": 0.0, "windowSize": 5}"#).unwrap();
        assert_eq!(config.noise_probability, 0.0);
        assert_eq!(config.window_size, 5);
        assert_eq!(config.opening_weights, [0.3, 0.4, 0.3]);
    }
}
