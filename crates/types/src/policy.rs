//! Behavioural switches for the PIN widget.
//!
//! Each switch is a closed enum that parses from and prints to a kebab-case
//! name so the same spelling works in the preferences file and on the
//! command line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{value}'; expected one of: {expected}")]
pub struct ParsePolicyError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// When the widget reports a finished entry to its owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionPolicy {
    /// Only an explicit confirmation (Enter or the keypad submit key) on a
    /// complete value fires completion.
    #[default]
    Confirm,
    /// Writing the last slot of an otherwise complete value fires completion
    /// immediately. Explicit confirmation still works.
    LastDigit,
}

/// How the on-screen keypad chooses the slot it writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeypadAddressing {
    /// Keypad writes to the tracked active slot, which can be moved by tapping.
    #[default]
    ActiveSlot,
    /// Keypad writes to the first empty slot and erases the last filled one.
    /// Tapping a slot has no effect on where the next digit lands, so a
    /// digit in the middle cannot be corrected without erasing everything
    /// after it.
    Sequential,
}

/// Which input surface renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Pick from the terminal width.
    #[default]
    Auto,
    /// Always render per-slot boxes driven by the keyboard.
    Keyboard,
    /// Always render tap targets plus the on-screen keypad.
    Touch,
}

macro_rules! kebab_enum {
    ($ty:ty, $kind:literal, { $($variant:path => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParsePolicyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    _ => Err(ParsePolicyError {
                        kind: $kind,
                        value: s.to_string(),
                        expected: concat!($($name, " "),+),
                    }),
                }
            }
        }
    };
}

kebab_enum!(CompletionPolicy, "completion policy", {
    CompletionPolicy::Confirm => "confirm",
    CompletionPolicy::LastDigit => "last-digit",
});

kebab_enum!(KeypadAddressing, "keypad addressing", {
    KeypadAddressing::ActiveSlot => "active-slot",
    KeypadAddressing::Sequential => "sequential",
});

kebab_enum!(LayoutMode, "layout mode", {
    LayoutMode::Auto => "auto",
    LayoutMode::Keyboard => "keyboard",
    LayoutMode::Touch => "touch",
});
