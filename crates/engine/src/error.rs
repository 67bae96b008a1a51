use thiserror::Error;

/// Errors surfaced by match setup and play.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("PIN length must be at least 1")]
    InvalidPinLength,
    #[error("a match needs at least one round")]
    InvalidRoundCount,
    #[error("expected {expected} secrets (one per round), got {actual}")]
    SecretCount { expected: usize, actual: usize },
    #[error("secret for round {round} must be exactly {length} digits")]
    InvalidSecret { round: usize, length: usize },
    #[error("guess must be exactly {length} digits, got {guess:?}")]
    InvalidGuess { guess: String, length: usize },
    #[error("the match is already finished")]
    MatchFinished,
    #[error("system randomness unavailable: {0}")]
    Randomness(String),
}
