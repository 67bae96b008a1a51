//! The digit value store shared by the PIN widget and its owner.
//!
//! A [`PinValue`] is an immutable, fixed-length sequence of slots. Every
//! mutation returns a new value so that the owner stays the single writer:
//! the widget computes the next value and hands it back through an effect,
//! and the owner decides whether to adopt it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when building or mutating a [`PinValue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PinError {
    /// A PIN must contain at least one slot.
    #[error("PIN length must be at least 1")]
    ZeroLength,
    /// Input was neither a single decimal digit nor the empty string.
    #[error("expected a single decimal digit or an empty string, got {input:?}")]
    InvalidInput { input: String },
    /// The addressed slot does not exist.
    #[error("slot {index} is out of range for a PIN of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// Two sequences were expected to have the same number of slots.
    #[error("expected {expected} digits, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// One decimal digit, `0` through `9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Digit(u8);

impl Digit {
    /// All ten digits in keypad value order.
    pub const ALL: [Digit; 10] = [
        Digit(0),
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    /// Returns `None` when `value` is not in `0..=9`.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 { Some(Self(value)) } else { None }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl TryFrom<char> for Digit {
    type Error = PinError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        value
            .to_digit(10)
            .filter(|_| value.is_ascii_digit())
            .map(|digit| Digit(digit as u8))
            .ok_or_else(|| PinError::InvalidInput { input: value.to_string() })
    }
}

impl From<Digit> for char {
    fn from(value: Digit) -> Self {
        value.as_char()
    }
}

impl FromStr for Digit {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Digit::try_from(c),
            _ => Err(PinError::InvalidInput { input: s.to_string() }),
        }
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered, fixed-length PIN value. Each slot is empty or holds one digit.
///
/// Serializes as an array of strings (`["3", "", "1"]`), empty string for an
/// empty slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PinValue {
    slots: Vec<Option<Digit>>,
}

#[allow(clippy::len_without_is_empty)]
impl PinValue {
    /// Create an all-empty value with `len` slots.
    pub fn empty(len: usize) -> Result<Self, PinError> {
        if len == 0 {
            return Err(PinError::ZeroLength);
        }
        Ok(Self { slots: vec![None; len] })
    }

    /// Parse a fully entered code such as `"3192"`.
    pub fn from_code(code: &str) -> Result<Self, PinError> {
        let slots = code
            .chars()
            .map(|c| Digit::try_from(c).map(Some))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| PinError::InvalidInput { input: code.to_string() })?;
        if slots.is_empty() {
            return Err(PinError::ZeroLength);
        }
        Ok(Self { slots })
    }

    /// Number of slots. Stable for the lifetime of the value.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<Digit>] {
        &self.slots
    }

    /// Digit at `index`, or `None` when the slot is empty or out of range.
    pub fn get(&self, index: usize) -> Option<Digit> {
        self.slots.get(index).copied().flatten()
    }

    pub fn is_filled(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Every slot holds a digit.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Every slot is empty.
    pub fn is_blank(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn last_filled(&self) -> Option<usize> {
        self.slots.iter().rposition(Option::is_some)
    }

    /// Returns a copy with slot `index` set from `input`.
    ///
    /// `input` must be exactly one ASCII decimal digit, or empty to clear the
    /// slot. Anything else, including multi-character strings such as `"12"`,
    /// is rejected and `self` is left as it was.
    pub fn set_digit(&self, index: usize, input: &str) -> Result<Self, PinError> {
        let digit = if input.is_empty() { None } else { Some(input.parse::<Digit>()?) };
        self.with_slot(index, digit)
    }

    /// Typed variant of [`PinValue::set_digit`].
    pub fn with_slot(&self, index: usize, digit: Option<Digit>) -> Result<Self, PinError> {
        let len = self.len();
        if index >= len {
            return Err(PinError::IndexOutOfRange { index, len });
        }
        let mut next = self.clone();
        next.slots[index] = digit;
        Ok(next)
    }

    /// Equivalent to `set_digit(index, "")`.
    pub fn clear(&self, index: usize) -> Result<Self, PinError> {
        self.with_slot(index, None)
    }

    /// An all-empty value of the same length.
    pub fn cleared(&self) -> Self {
        Self {
            slots: vec![None; self.len()],
        }
    }

    /// The entered code when every slot is filled.
    pub fn code(&self) -> Option<String> {
        self.slots.iter().map(|slot| slot.map(Digit::as_char)).collect()
    }

    /// One string per slot, empty string for an empty slot.
    pub fn to_strings(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| slot.map(|digit| digit.to_string()).unwrap_or_default())
            .collect()
    }
}

impl fmt::Display for PinValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            match slot {
                Some(digit) => write!(f, "{digit}")?,
                None => f.write_str("_")?,
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<String>> for PinValue {
    type Error = PinError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        let mut pin = PinValue::empty(value.len())?;
        for (index, slot) in value.iter().enumerate() {
            pin = pin.set_digit(index, slot)?;
        }
        Ok(pin)
    }
}

impl From<PinValue> for Vec<String> {
    fn from(value: PinValue) -> Self {
        value.to_strings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(value: u8) -> Digit {
        Digit::new(value).expect("valid digit")
    }

    #[test]
    fn empty_rejects_zero_length() {
        assert_eq!(PinValue::empty(0), Err(PinError::ZeroLength));
        let pin = PinValue::empty(4).expect("pin");
        assert_eq!(pin.len(), 4);
        assert!(pin.is_blank());
        assert!(!pin.is_complete());
    }

    #[test]
    fn set_digit_only_touches_the_addressed_slot() {
        let pin = PinValue::empty(3).expect("pin");
        let next = pin.set_digit(1, "7").expect("accepted");
        assert_eq!(next.slots(), &[None, Some(digit(7)), None]);
        assert!(pin.is_blank(), "original value is not mutated");
    }

    #[test]
    fn set_digit_rejects_anything_but_one_digit() {
        let pin = PinValue::from_code("123").expect("pin");
        for input in ["ab", "12", "x", " ", "٣", "-1"] {
            let result = pin.set_digit(0, input);
            assert!(matches!(result, Err(PinError::InvalidInput { .. })), "{input:?} must be rejected");
        }
        assert_eq!(pin.to_string(), "123");
    }

    #[test]
    fn empty_string_clears() {
        let pin = PinValue::from_code("42").expect("pin");
        assert_eq!(pin.set_digit(0, "").expect("cleared").to_string(), "_2");
        assert_eq!(pin.clear(1).expect("cleared").to_string(), "4_");
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let pin = PinValue::empty(2).expect("pin");
        assert_eq!(pin.set_digit(2, "1"), Err(PinError::IndexOutOfRange { index: 2, len: 2 }));
    }

    #[test]
    fn first_empty_and_last_filled() {
        let pin = PinValue::empty(4)
            .and_then(|pin| pin.set_digit(0, "1"))
            .and_then(|pin| pin.set_digit(2, "3"))
            .expect("pin");
        assert_eq!(pin.first_empty(), Some(1));
        assert_eq!(pin.last_filled(), Some(2));
        assert_eq!(pin.code(), None);
        assert_eq!(pin.cleared().last_filled(), None);
    }

    #[test]
    fn code_is_available_once_complete() {
        let pin = PinValue::from_code("3192").expect("pin");
        assert!(pin.is_complete());
        assert_eq!(pin.code().as_deref(), Some("3192"));
    }

    #[test]
    fn serializes_as_string_slots() {
        let pin = PinValue::from_code("31").expect("pin").clear(1).expect("cleared");
        let json = serde_json::to_string(&pin).expect("serialize");
        assert_eq!(json, r#"["3",""]"#);
        let parsed: PinValue = serde_json::from_str(r#"["","9"]"#).expect("deserialize");
        assert_eq!(parsed.to_string(), "_9");
        assert!(serde_json::from_str::<PinValue>(r#"["12"]"#).is_err());
        assert!(serde_json::from_str::<PinValue>("[]").is_err());
    }
}
