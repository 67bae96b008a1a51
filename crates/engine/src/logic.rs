//! Scoring rules for a single guess.

use lockpick_types::Hint;
use tracing::warn;

/// Stateless rule set shared by every round.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameLogic;

impl GameLogic {
    pub fn new() -> Self {
        Self
    }

    /// Compares `guess` against `secret` position by position.
    ///
    /// Exact matches are claimed first. Each remaining guess digit then claims
    /// the first unclaimed equal digit of the secret, so a digit is never
    /// reported as misplaced more times than it occurs in the secret.
    ///
    /// Mismatched lengths yield all `Absent`.
    pub fn generate_hints(&self, guess: &str, secret: &str) -> Vec<Hint> {
        let guess = guess.as_bytes();
        let secret = secret.as_bytes();
        let length = guess.len();
        if secret.len() != length {
            warn!(guess_len = length, secret_len = secret.len(), "guess length does not match secret length");
            return vec![Hint::Absent; length];
        }

        let mut hints = vec![Hint::Absent; length];
        let mut secret_used = vec![false; length];

        for index in 0..length {
            if guess[index] == secret[index] {
                hints[index] = Hint::Exact;
                secret_used[index] = true;
            }
        }

        for index in 0..length {
            if hints[index] == Hint::Exact {
                continue;
            }
            let claim = (0..length).find(|&candidate| !secret_used[candidate] && guess[index] == secret[candidate]);
            if let Some(candidate) = claim {
                hints[index] = Hint::Misplaced;
                secret_used[candidate] = true;
            }
        }

        hints
    }

    pub fn is_win(&self, guess: &str, secret: &str) -> bool {
        guess == secret
    }
}
