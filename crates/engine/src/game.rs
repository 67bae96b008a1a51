//! Match flow: a fixed number of rounds, each played against its own secret.
//!
//! A round ends when the player cracks the secret or when the optional round
//! timer runs out. The match finishes after the last round; from then on
//! guesses are rejected until a new match is created.

use std::time::Duration;

use lockpick_types::Hint;
use serde::Serialize;
use tracing::{debug, info};

use crate::{EngineError, GameConfig, GameLogic, Secrets};

/// One submitted guess and the feedback it earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessRecord {
    pub guess: String,
    /// `None` when hints are disabled for the match.
    pub hints: Option<Vec<Hint>>,
    pub won: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundResult {
    Cracked { attempts: usize },
    TimedOut,
}

/// Summary of a finished round. The secret is revealed once the round is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round: usize,
    pub result: RoundResult,
    pub secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    /// Round the guess was played in.
    pub round: usize,
    pub hints: Option<Vec<Hint>>,
    pub won: bool,
    /// Present when this guess ended the round.
    pub round_summary: Option<RoundSummary>,
    pub match_finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    InProgress,
    Finished,
}

#[derive(Debug)]
pub struct Match {
    config: GameConfig,
    secrets: Secrets,
    logic: GameLogic,
    /// 1-based
    current_round: usize,
    guesses: Vec<GuessRecord>,
    completed: Vec<RoundSummary>,
    score: usize,
    status: MatchStatus,
    round_elapsed: Duration,
}

impl Match {
    pub fn new(config: GameConfig, secrets: Secrets) -> Result<Self, EngineError> {
        config.validate()?;
        if secrets.len() != config.rounds {
            return Err(EngineError::SecretCount {
                expected: config.rounds,
                actual: secrets.len(),
            });
        }
        Ok(Self {
            config,
            secrets,
            logic: GameLogic::new(),
            current_round: 1,
            guesses: Vec::new(),
            completed: Vec::new(),
            score: 0,
            status: MatchStatus::InProgress,
            round_elapsed: Duration::ZERO,
        })
    }

    /// A match against freshly drawn random secrets.
    pub fn with_random_secrets(config: GameConfig) -> Result<Self, EngineError> {
        let secrets = Secrets::random(&config)?;
        Self::new(config, secrets)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    /// Rounds won so far.
    pub fn score(&self) -> usize {
        self.score
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Guesses made in the round currently being played.
    pub fn guesses(&self) -> &[GuessRecord] {
        &self.guesses
    }

    pub fn completed_rounds(&self) -> &[RoundSummary] {
        &self.completed
    }

    /// Time left on the round timer, if one is configured and the match is live.
    pub fn time_remaining(&self) -> Option<Duration> {
        if self.is_finished() {
            return None;
        }
        self.config.round_duration().map(|limit| limit.saturating_sub(self.round_elapsed))
    }

    /// Score a guess against the current round's secret.
    pub fn submit_guess(&mut self, guess: &str) -> Result<GuessOutcome, EngineError> {
        if self.is_finished() {
            return Err(EngineError::MatchFinished);
        }
        let length = self.config.pin_length;
        if guess.len() != length || !guess.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EngineError::InvalidGuess {
                guess: guess.to_string(),
                length,
            });
        }

        let round = self.current_round;
        let secret = self.secrets.for_round(round).ok_or(EngineError::MatchFinished)?;
        let won = self.logic.is_win(guess, secret);
        let hints = self
            .config
            .hints_enabled
            .then(|| self.logic.generate_hints(guess, secret));
        debug!(round, attempt = self.guesses.len() + 1, won, "guess scored");

        self.guesses.push(GuessRecord {
            guess: guess.to_string(),
            hints: hints.clone(),
            won,
        });

        let round_summary = won.then(|| {
            self.score += 1;
            let attempts = self.guesses.len();
            self.end_round(RoundResult::Cracked { attempts })
        });

        Ok(GuessOutcome {
            round,
            hints,
            won,
            round_summary,
            match_finished: self.is_finished(),
        })
    }

    /// Advance the round timer. Returns the summary when the round times out.
    pub fn tick(&mut self, elapsed: Duration) -> Option<RoundSummary> {
        let limit = self.config.round_duration()?;
        if self.is_finished() {
            return None;
        }
        self.round_elapsed = self.round_elapsed.saturating_add(elapsed);
        (self.round_elapsed >= limit).then(|| self.end_round(RoundResult::TimedOut))
    }

    fn end_round(&mut self, result: RoundResult) -> RoundSummary {
        let round = self.current_round;
        let summary = RoundSummary {
            round,
            result,
            secret: self.secrets.for_round(round).unwrap_or_default().to_string(),
        };
        info!(round, ?result, score = self.score, "round ended");
        self.completed.push(summary.clone());
        self.guesses.clear();
        self.round_elapsed = Duration::ZERO;

        if round >= self.config.rounds {
            self.status = MatchStatus::Finished;
            info!(score = self.score, rounds = self.config.rounds, "match finished");
        } else {
            self.current_round += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_with(secrets: &[&str], timer_duration_secs: u64) -> Match {
        let config = GameConfig {
            pin_length: secrets[0].len(),
            hints_enabled: true,
            timer_duration_secs,
            rounds: secrets.len(),
        };
        let secrets = Secrets::new(&config, secrets.iter().map(|s| s.to_string()).collect()).expect("secrets");
        Match::new(config, secrets).expect("match")
    }

    #[test]
    fn wrong_guess_records_hints_and_stays_in_round() {
        let mut game = match_with(&["1234", "5678"], 0);
        let outcome = game.submit_guess("1243").expect("scored");
        assert_eq!(outcome.round, 1);
        assert!(!outcome.won);
        assert_eq!(
            outcome.hints,
            Some(vec![Hint::Exact, Hint::Exact, Hint::Misplaced, Hint::Misplaced])
        );
        assert!(outcome.round_summary.is_none());
        assert_eq!(game.guesses().len(), 1);
        assert_eq!(game.current_round(), 1);
    }

    #[test]
    fn cracking_every_round_finishes_the_match() {
        let mut game = match_with(&["1234", "5678"], 0);
        game.submit_guess("0000").expect("scored");
        let first = game.submit_guess("1234").expect("scored");
        assert!(first.won);
        assert_eq!(
            first.round_summary,
            Some(RoundSummary {
                round: 1,
                result: RoundResult::Cracked { attempts: 2 },
                secret: "1234".into(),
            })
        );
        assert!(!first.match_finished);
        assert_eq!(game.current_round(), 2);
        assert!(game.guesses().is_empty());

        let second = game.submit_guess("5678").expect("scored");
        assert!(second.match_finished);
        assert_eq!(game.score(), 2);
        assert_eq!(game.status(), MatchStatus::Finished);
        assert_eq!(game.submit_guess("5678"), Err(EngineError::MatchFinished));
    }

    #[test]
    fn malformed_guesses_are_rejected() {
        let mut game = match_with(&["1234"], 0);
        assert!(matches!(game.submit_guess("123"), Err(EngineError::InvalidGuess { .. })));
        assert!(matches!(game.submit_guess("12a4"), Err(EngineError::InvalidGuess { .. })));
        assert!(game.guesses().is_empty());
    }

    #[test]
    fn hints_can_be_disabled() {
        let config = GameConfig {
            pin_length: 2,
            hints_enabled: false,
            timer_duration_secs: 0,
            rounds: 1,
        };
        let secrets = Secrets::new(&config, vec!["12".into()]).expect("secrets");
        let mut game = Match::new(config, secrets).expect("match");
        assert_eq!(game.submit_guess("21").expect("scored").hints, None);
    }

    #[test]
    fn timer_expiry_ends_round_without_score() {
        let mut game = match_with(&["1111", "2222"], 10);
        assert_eq!(game.time_remaining(), Some(Duration::from_secs(10)));
        assert!(game.tick(Duration::from_secs(4)).is_none());
        assert_eq!(game.time_remaining(), Some(Duration::from_secs(6)));

        let summary = game.tick(Duration::from_secs(6)).expect("timed out");
        assert_eq!(summary.result, RoundResult::TimedOut);
        assert_eq!(summary.secret, "1111");
        assert_eq!(game.score(), 0);
        assert_eq!(game.current_round(), 2);
        assert_eq!(game.time_remaining(), Some(Duration::from_secs(10)));

        game.tick(Duration::from_secs(10)).expect("timed out");
        assert!(game.is_finished());
        assert_eq!(game.time_remaining(), None);
        assert!(game.tick(Duration::from_secs(10)).is_none());
    }

    #[test]
    fn without_a_timer_ticks_are_ignored() {
        let mut game = match_with(&["1111"], 0);
        assert!(game.tick(Duration::from_secs(3600)).is_none());
        assert_eq!(game.time_remaining(), None);
    }

    #[test]
    fn outcomes_serialize_with_wire_hint_codes() {
        let mut game = match_with(&["12"], 0);
        let outcome = game.submit_guess("12").expect("scored");
        let json = serde_json::to_value(&outcome).expect("serialize");
        assert_eq!(json["hints"], serde_json::json!([2, 2]));
        assert_eq!(json["round_summary"]["result"], serde_json::json!({ "cracked": { "attempts": 1 } }));
        assert_eq!(json["match_finished"], serde_json::json!(true));
    }
}
