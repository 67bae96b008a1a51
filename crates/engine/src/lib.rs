//! # Lockpick Engine
//!
//! Game rules for the PIN-cracking challenge the widget feeds: scoring a
//! guess into per-digit hints, and the round/match flow around it.
//!
//! ## Usage
//!
//! ```rust
//! use lockpick_engine::{GameConfig, Match, Secrets};
//!
//! let config = GameConfig { pin_length: 4, rounds: 1, ..GameConfig::default() };
//! let secrets = Secrets::new(&config, vec!["3192".to_string()])?;
//! let mut game = Match::new(config, secrets)?;
//!
//! let outcome = game.submit_guess("3192")?;
//! assert!(outcome.won && outcome.match_finished);
//! # Ok::<(), lockpick_engine::EngineError>(())
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod logic;
pub mod secrets;

pub use config::{DEFAULT_PIN_LENGTH, DEFAULT_ROUNDS, GameConfig};
pub use error::EngineError;
pub use game::{GuessOutcome, GuessRecord, Match, MatchStatus, RoundResult, RoundSummary};
pub use logic::GameLogic;
pub use secrets::Secrets;
