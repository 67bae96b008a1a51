//! The per-round secret PINs a match is played against.

use crate::{EngineError, GameConfig};

/// One secret PIN per round, validated against the match configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    pins: Vec<String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets").field("count", &self.pins.len()).finish_non_exhaustive()
    }
}

impl Secrets {
    /// Validate caller-supplied secrets: one per round, each `pin_length`
    /// ASCII digits.
    pub fn new(config: &GameConfig, pins: Vec<String>) -> Result<Self, EngineError> {
        config.validate()?;
        if pins.len() != config.rounds {
            return Err(EngineError::SecretCount {
                expected: config.rounds,
                actual: pins.len(),
            });
        }
        for (index, pin) in pins.iter().enumerate() {
            if pin.len() != config.pin_length || !pin.bytes().all(|b| b.is_ascii_digit()) {
                return Err(EngineError::InvalidSecret {
                    round: index + 1,
                    length: config.pin_length,
                });
            }
        }
        Ok(Self { pins })
    }

    /// Draw a uniformly random secret for every round.
    pub fn random(config: &GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let pins = (0..config.rounds)
            .map(|_| random_pin(config.pin_length))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pins })
    }

    /// Secret for a 1-based round number.
    pub fn for_round(&self, round: usize) -> Option<&str> {
        round.checked_sub(1).and_then(|index| self.pins.get(index)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

fn random_pin(length: usize) -> Result<String, EngineError> {
    let mut pin = String::with_capacity(length);
    let mut buffer = [0u8; 16];
    while pin.len() < length {
        getrandom::fill(&mut buffer).map_err(|error| EngineError::Randomness(error.to_string()))?;
        // Bytes >= 250 are discarded so each digit stays equally likely.
        for byte in buffer.iter().copied().filter(|&byte| byte < 250) {
            if pin.len() == length {
                break;
            }
            pin.push(char::from(b'0' + byte % 10));
        }
    }
    Ok(pin)
}
