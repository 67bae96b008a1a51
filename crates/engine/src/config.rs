use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Number of rounds in a standard match.
pub const DEFAULT_ROUNDS: usize = 3;
/// Digits per PIN unless configured otherwise.
pub const DEFAULT_PIN_LENGTH: usize = 5;

/// Rules for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub pin_length: usize,
    /// Report per-digit hints after each guess.
    pub hints_enabled: bool,
    /// Round time limit in seconds; `0` disables the timer.
    pub timer_duration_secs: u64,
    pub rounds: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pin_length: DEFAULT_PIN_LENGTH,
            hints_enabled: true,
            timer_duration_secs: 0,
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.pin_length == 0 {
            return Err(EngineError::InvalidPinLength);
        }
        if self.rounds == 0 {
            return Err(EngineError::InvalidRoundCount);
        }
        Ok(())
    }

    pub fn round_duration(&self) -> Option<Duration> {
        (self.timer_duration_secs > 0).then(|| Duration::from_secs(self.timer_duration_secs))
    }
}
