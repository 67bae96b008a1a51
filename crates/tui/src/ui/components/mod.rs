//! UI components: PIN input, keypad, attempt history, scoreboard.

pub mod component;
pub mod history;
pub mod keypad;
pub mod pin_input;
pub mod scoreboard;

pub use component::*;
pub use history::HistoryComponent;
pub use pin_input::PinInputComponent;
pub use scoreboard::ScoreboardComponent;
