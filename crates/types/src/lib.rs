//! Shared types for the Lockpick workspace.
//!
//! The PIN value store, widget policies, guess hints, and the message/effect
//! vocabulary that the TUI routes between its components.

pub mod hint;
pub mod pin;
pub mod policy;

pub use hint::{Hint, InvalidHintCode};
pub use pin::{Digit, PinError, PinValue};
pub use policy::{CompletionPolicy, KeypadAddressing, LayoutMode, ParsePolicyError};

/// Application-level messages delivered to components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic tick carrying the elapsed milliseconds since the previous one.
    Tick(u64),
    /// Terminal resized
    Resize(u16, u16),
}

/// Side effects reported by components and applied by the owning screen.
///
/// Effects emitted for a single input event are applied in order, so a
/// `PinChanged` always lands before the `PinCompleted` that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The widget computed a new value; the owner should adopt it.
    PinChanged(PinValue),
    /// The entry is complete and confirmed.
    PinCompleted(PinValue),
    /// Discard the current match and start a fresh one.
    NewMatchRequested,
    /// Leave the application.
    Quit,
}
