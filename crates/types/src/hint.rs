use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-position feedback for a guess.
///
/// Encoded on the wire as `0`, `1`, `2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Hint {
    /// Digit does not occur in any unmatched position of the secret.
    Absent,
    /// Digit occurs in the secret, but somewhere else.
    Misplaced,
    /// Digit is in the right position.
    Exact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid hint code {0}; expected 0, 1 or 2")]
pub struct InvalidHintCode(pub u8);

impl Hint {
    pub fn symbol(self) -> char {
        match self {
            Hint::Absent => '·',
            Hint::Misplaced => '○',
            Hint::Exact => '●',
        }
    }
}

impl From<Hint> for u8 {
    fn from(value: Hint) -> Self {
        match value {
            Hint::Absent => 0,
            Hint::Misplaced => 1,
            Hint::Exact => 2,
        }
    }
}

impl TryFrom<u8> for Hint {
    type Error = InvalidHintCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Hint::Absent),
            1 => Ok(Hint::Misplaced),
            2 => Ok(Hint::Exact),
            other => Err(InvalidHintCode(other)),
        }
    }
}
