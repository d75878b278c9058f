//! Errors raised at the API boundary

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Move text is not one of rock, paper or scissors
    #[error("unknown move {0:?}: expected \"rock\", \"paper\" or \"scissors\"")]
    InvalidMove(String),

    /// Engine configuration failed validation
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}
