//! State machine behind the PIN entry widget.
//!
//! The widget never owns the value. Every operation takes the caller's current
//! [`PinValue`] and reports the outcome as [`Effect`]s: `PinChanged` carries the
//! next value, `PinCompleted` follows it when the entry is confirmed. Only
//! cursor position, the submitted latch and the policies live here.

use lockpick_types::{CompletionPolicy, Digit, Effect, KeypadAddressing, PinValue};
use rat_focus::FocusFlag;
use ratatui::layout::{Position, Rect};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PinInputState {
    active_slot: usize,
    /// Completion already fired for the current contents.
    submitted: bool,
    disabled: bool,
    completion: CompletionPolicy,
    addressing: KeypadAddressing,
    /// Last value observed through [`PinInputState::sync`].
    observed: Option<PinValue>,

    pub focus: FocusFlag,
    /// Per-slot hit areas from the last render.
    slot_areas: Vec<Rect>,
}

impl Default for PinInputState {
    fn default() -> Self {
        Self::new(CompletionPolicy::default(), KeypadAddressing::default())
    }
}

impl PinInputState {
    pub fn new(completion: CompletionPolicy, addressing: KeypadAddressing) -> Self {
        Self {
            active_slot: 0,
            submitted: false,
            disabled: false,
            completion,
            addressing,
            observed: None,
            focus: FocusFlag::new().with_name("pin_input.slots"),
            slot_areas: Vec::new(),
        }
    }

    pub fn active_slot(&self) -> usize {
        self.active_slot
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn completion(&self) -> CompletionPolicy {
        self.completion
    }

    pub fn addressing(&self) -> KeypadAddressing {
        self.addressing
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Adopt the owner's current value.
    ///
    /// A value that differs from the last one seen clears the submitted latch.
    /// A value that has just become fully empty also moves the cursor back to
    /// the first slot. Re-syncing an unchanged value keeps the cursor.
    pub fn sync(&mut self, value: &PinValue) {
        let changed = self.observed.as_ref() != Some(value);
        if changed {
            self.submitted = false;
            if value.is_blank() {
                self.active_slot = 0;
            }
        }
        self.active_slot = self.active_slot.min(value.len().saturating_sub(1));
        self.observed = Some(value.clone());
    }

    // ---- cursor ----------------------------------------------------------

    /// Move the cursor to `index`, clamped to the last slot.
    pub fn focus_slot(&mut self, value: &PinValue, index: usize) {
        if self.disabled {
            return;
        }
        self.active_slot = index.min(value.len().saturating_sub(1));
    }

    pub fn focus_next(&mut self, value: &PinValue) {
        self.focus_slot(value, self.active_slot.saturating_add(1));
    }

    pub fn focus_prev(&mut self, value: &PinValue) {
        self.focus_slot(value, self.active_slot.saturating_sub(1));
    }

    pub fn focus_first(&mut self, value: &PinValue) {
        self.focus_slot(value, 0);
    }

    pub fn focus_last(&mut self, value: &PinValue) {
        self.focus_slot(value, value.len().saturating_sub(1));
    }

    // ---- data ------------------------------------------------------------

    /// Write `input` into the active slot and advance.
    ///
    /// `input` goes through [`PinValue::set_digit`]; anything other than a
    /// single decimal digit is dropped without an effect.
    pub fn type_input(&mut self, value: &PinValue, input: &str) -> Vec<Effect> {
        if self.disabled || input.is_empty() {
            return Vec::new();
        }
        let index = self.active_slot;
        match value.set_digit(index, input) {
            Ok(next) => self.commit_write(value, next, index),
            Err(error) => {
                debug!(%error, index, "rejected PIN input");
                Vec::new()
            }
        }
    }

    /// Backspace as typed on a hardware keyboard.
    ///
    /// A filled slot is cleared in place. On an empty slot the cursor steps
    /// back one position and nothing is cleared.
    pub fn backspace(&mut self, value: &PinValue) -> Vec<Effect> {
        if self.disabled {
            return Vec::new();
        }
        let index = self.active_slot;
        if value.is_filled(index) {
            return self.clear_slot(value, index);
        }
        self.active_slot = index.saturating_sub(1);
        Vec::new()
    }

    /// Clear the active slot without moving.
    pub fn delete(&mut self, value: &PinValue) -> Vec<Effect> {
        if self.disabled {
            return Vec::new();
        }
        self.clear_slot(value, self.active_slot)
    }

    /// Fire completion when every slot is filled and it has not fired yet.
    pub fn confirm(&mut self, value: &PinValue) -> Vec<Effect> {
        if self.disabled || self.submitted || !value.is_complete() {
            return Vec::new();
        }
        self.submitted = true;
        vec![Effect::PinCompleted(value.clone())]
    }

    // ---- keypad ----------------------------------------------------------

    /// A tap on slot `index`. Ignored under sequential addressing.
    pub fn tap_slot(&mut self, value: &PinValue, index: usize) {
        if self.addressing == KeypadAddressing::Sequential || index >= value.len() {
            return;
        }
        self.focus_slot(value, index);
    }

    pub fn keypad_digit(&mut self, value: &PinValue, digit: Digit) -> Vec<Effect> {
        if self.disabled {
            return Vec::new();
        }
        let index = match self.addressing {
            KeypadAddressing::ActiveSlot => self.active_slot,
            KeypadAddressing::Sequential => match value.first_empty() {
                Some(index) => index,
                None => return Vec::new(),
            },
        };
        match value.with_slot(index, Some(digit)) {
            Ok(next) => self.commit_write(value, next, index),
            Err(error) => {
                debug!(%error, index, "keypad write out of range");
                Vec::new()
            }
        }
    }

    /// Keypad backspace.
    ///
    /// With active-slot addressing a filled slot is cleared in place, an empty
    /// slot steps back one and clears that slot. Sequential addressing clears
    /// the last filled slot.
    pub fn keypad_backspace(&mut self, value: &PinValue) -> Vec<Effect> {
        if self.disabled {
            return Vec::new();
        }
        match self.addressing {
            KeypadAddressing::ActiveSlot => {
                let index = self.active_slot;
                if value.is_filled(index) {
                    self.clear_slot(value, index)
                } else if index > 0 {
                    self.active_slot = index - 1;
                    self.clear_slot(value, index - 1)
                } else {
                    Vec::new()
                }
            }
            KeypadAddressing::Sequential => match value.last_filled() {
                Some(index) => self.clear_slot(value, index),
                None => Vec::new(),
            },
        }
    }

    // ---- internals -------------------------------------------------------

    fn clear_slot(&mut self, value: &PinValue, index: usize) -> Vec<Effect> {
        match value.clear(index) {
            Ok(next) => self.commit(value, next),
            Err(_) => Vec::new(),
        }
    }

    fn commit_write(&mut self, value: &PinValue, next: PinValue, index: usize) -> Vec<Effect> {
        let last = next.len() - 1;
        if index < last {
            self.active_slot = index + 1;
        }
        let completes = self.completion == CompletionPolicy::LastDigit && index == last && next.is_complete();
        let completed = completes.then(|| next.clone());
        let mut effects = self.commit(value, next);
        if let Some(completed) = completed
            && !effects.is_empty()
        {
            self.submitted = true;
            effects.push(Effect::PinCompleted(completed));
        }
        effects
    }

    fn commit(&mut self, value: &PinValue, next: PinValue) -> Vec<Effect> {
        if next == *value {
            return Vec::new();
        }
        self.submitted = false;
        if next.is_blank() {
            self.active_slot = 0;
        }
        self.observed = Some(next.clone());
        vec![Effect::PinChanged(next)]
    }

    // ---- hit testing -----------------------------------------------------

    pub fn set_slot_areas(&mut self, slot_areas: Vec<Rect>) {
        self.slot_areas = slot_areas;
    }

    /// Index of the slot under a mouse position.
    pub fn slot_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.slot_areas.iter().position(|area| area.contains(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(c: char) -> Digit {
        Digit::try_from(c).expect("digit")
    }

    /// Applies effects the way the owning screen does and returns completions.
    fn apply(state: &mut PinInputState, value: &mut PinValue, effects: Vec<Effect>) -> Vec<PinValue> {
        let mut completed = Vec::new();
        for effect in effects {
            match effect {
                Effect::PinChanged(next) => *value = next,
                Effect::PinCompleted(done) => completed.push(done),
                _ => {}
            }
        }
        state.sync(value);
        completed
    }

    fn strings(value: &PinValue) -> Vec<String> {
        value.to_strings()
    }

    #[test]
    fn keypad_scenario_with_backspace_then_confirm() {
        let mut state = PinInputState::default();
        let mut value = PinValue::empty(4).unwrap();
        state.sync(&value);

        for c in ['3', '1', '4'] {
            let effects = state.keypad_digit(&value, digit(c));
            assert!(apply(&mut state, &mut value, effects).is_empty());
        }
        assert_eq!(strings(&value), ["3", "1", "4", ""]);
        assert_eq!(state.active_slot(), 3);

        let effects = state.keypad_backspace(&value);
        apply(&mut state, &mut value, effects);
        assert_eq!(strings(&value), ["3", "1", "", ""]);
        assert_eq!(state.active_slot(), 2);

        for c in ['9', '2'] {
            let effects = state.keypad_digit(&value, digit(c));
            assert!(apply(&mut state, &mut value, effects).is_empty());
        }
        assert_eq!(strings(&value), ["3", "1", "9", "2"]);
        assert_eq!(state.active_slot(), 3);

        let effects = state.confirm(&value);
        let completed = apply(&mut state, &mut value, effects);
        assert_eq!(completed.len(), 1);
        assert_eq!(strings(&completed[0]), ["3", "1", "9", "2"]);
    }

    #[test]
    fn confirm_fires_once_per_entry() {
        let mut state = PinInputState::default();
        let mut value = PinValue::empty(2).unwrap();
        state.sync(&value);
        for c in ["4", "2"] {
            let effects = state.type_input(&value, c);
            assert!(apply(&mut state, &mut value, effects).is_empty());
        }
        let effects = state.confirm(&value);
        assert_eq!(apply(&mut state, &mut value, effects).len(), 1);
        assert!(state.confirm(&value).is_empty());

        // Editing the value re-arms completion.
        let effects = state.type_input(&value, "7");
        apply(&mut state, &mut value, effects);
        assert_eq!(state.confirm(&value).len(), 1);
    }

    #[test]
    fn last_digit_policy_completes_on_final_write() {
        let mut state = PinInputState::new(CompletionPolicy::LastDigit, KeypadAddressing::ActiveSlot);
        let mut value = PinValue::empty(3).unwrap();
        state.sync(&value);
        let mut completions = Vec::new();
        for c in ["1", "2", "3"] {
            let effects = state.type_input(&value, c);
            let before = completions.len();
            completions.extend(apply(&mut state, &mut value, effects));
            if c != "3" {
                assert_eq!(completions.len(), before);
            }
        }
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].code().as_deref(), Some("123"));
        // Explicit confirmation does not fire a second time.
        assert!(state.confirm(&value).is_empty());
    }

    #[test]
    fn last_digit_policy_orders_change_before_completion() {
        let mut state = PinInputState::new(CompletionPolicy::LastDigit, KeypadAddressing::ActiveSlot);
        let value = PinValue::from_code("12").unwrap().clear(1).unwrap();
        state.sync(&value);
        state.focus_slot(&value, 1);
        let effects = state.type_input(&value, "5");
        assert!(matches!(effects.as_slice(), [Effect::PinChanged(_), Effect::PinCompleted(_)]));
    }

    #[test]
    fn last_digit_policy_ignores_incomplete_last_write() {
        let mut state = PinInputState::new(CompletionPolicy::LastDigit, KeypadAddressing::ActiveSlot);
        let value = PinValue::empty(3).unwrap();
        state.sync(&value);
        state.focus_last(&value);
        let effects = state.type_input(&value, "9");
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::PinChanged(_)));
    }

    #[test]
    fn confirm_on_incomplete_value_is_silent() {
        let mut state = PinInputState::default();
        let value = PinValue::empty(4).unwrap().set_digit(0, "1").unwrap();
        state.sync(&value);
        assert!(state.confirm(&value).is_empty());
    }

    #[test]
    fn backspace_on_empty_slot_moves_back_without_changing_data() {
        let mut state = PinInputState::default();
        let value = PinValue::empty(4).unwrap().set_digit(0, "5").unwrap();
        state.sync(&value);
        state.focus_slot(&value, 2);
        assert!(state.backspace(&value).is_empty());
        assert_eq!(state.active_slot(), 1);
    }

    #[test]
    fn backspace_on_filled_slot_clears_in_place() {
        let mut state = PinInputState::default();
        let mut value = PinValue::from_code("123").unwrap();
        state.sync(&value);
        state.focus_slot(&value, 1);
        let effects = state.backspace(&value);
        apply(&mut state, &mut value, effects);
        assert_eq!(strings(&value), ["1", "", "3"]);
        assert_eq!(state.active_slot(), 1);
    }

    #[test]
    fn backspace_on_first_empty_slot_is_noop() {
        let mut state = PinInputState::default();
        let value = PinValue::empty(3).unwrap();
        state.sync(&value);
        assert!(state.backspace(&value).is_empty());
        assert!(state.keypad_backspace(&value).is_empty());
        assert_eq!(state.active_slot(), 0);
    }

    #[test]
    fn rejects_non_digit_and_multi_character_input() {
        let mut state = PinInputState::default();
        let value = PinValue::empty(4).unwrap();
        state.sync(&value);
        for input in ["ab", "12", "x", " "] {
            assert!(state.type_input(&value, input).is_empty());
        }
        assert_eq!(state.active_slot(), 0);
    }

    #[test]
    fn typing_overwrites_and_stops_at_last_slot() {
        let mut state = PinInputState::default();
        let mut value = PinValue::from_code("111").unwrap();
        state.sync(&value);
        state.focus_last(&value);
        let effects = state.type_input(&value, "9");
        apply(&mut state, &mut value, effects);
        assert_eq!(value.to_string(), "119");
        assert_eq!(state.active_slot(), 2);
    }

    #[test]
    fn blank_value_resets_cursor() {
        let mut state = PinInputState::default();
        let value = PinValue::from_code("1234").unwrap();
        state.sync(&value);
        state.focus_slot(&value, 3);
        state.sync(&value.cleared());
        assert_eq!(state.active_slot(), 0);
    }

    #[test]
    fn clearing_the_last_digit_resets_cursor() {
        let mut state = PinInputState::default();
        let mut value = PinValue::empty(4).unwrap().set_digit(2, "8").unwrap();
        state.sync(&value);
        state.focus_slot(&value, 2);
        let effects = state.delete(&value);
        apply(&mut state, &mut value, effects);
        assert!(value.is_blank());
        assert_eq!(state.active_slot(), 0);
    }

    #[test]
    fn cursor_moves_are_clamped() {
        let mut state = PinInputState::default();
        let value = PinValue::empty(3).unwrap();
        state.sync(&value);
        state.focus_prev(&value);
        assert_eq!(state.active_slot(), 0);
        state.focus_last(&value);
        state.focus_next(&value);
        assert_eq!(state.active_slot(), 2);
        state.focus_slot(&value, 99);
        assert_eq!(state.active_slot(), 2);
    }

    #[test]
    fn tapped_slot_receives_keypad_digit() {
        let mut state = PinInputState::default();
        let mut value = PinValue::empty(4).unwrap();
        state.sync(&value);
        state.tap_slot(&value, 2);
        let effects = state.keypad_digit(&value, digit('7'));
        apply(&mut state, &mut value, effects);
        assert_eq!(strings(&value), ["", "", "7", ""]);
        assert_eq!(state.active_slot(), 3);
    }

    #[test]
    fn sequential_addressing_fills_first_empty_and_clears_last_filled() {
        let mut state = PinInputState::new(CompletionPolicy::Confirm, KeypadAddressing::Sequential);
        let mut value = PinValue::empty(3).unwrap();
        state.sync(&value);
        state.tap_slot(&value, 2);
        assert_eq!(state.active_slot(), 0);

        for c in ['4', '5'] {
            let effects = state.keypad_digit(&value, digit(c));
            apply(&mut state, &mut value, effects);
        }
        assert_eq!(value.to_string(), "45_");

        let effects = state.keypad_backspace(&value);
        apply(&mut state, &mut value, effects);
        assert_eq!(value.to_string(), "4__");
    }

    #[test]
    fn sequential_addressing_ignores_digits_when_full() {
        let mut state = PinInputState::new(CompletionPolicy::Confirm, KeypadAddressing::Sequential);
        let value = PinValue::from_code("12").unwrap();
        state.sync(&value);
        assert!(state.keypad_digit(&value, digit('3')).is_empty());
    }

    #[test]
    fn disabled_widget_is_inert() {
        let mut state = PinInputState::default();
        let value = PinValue::from_code("12").unwrap().clear(1).unwrap();
        state.sync(&value);
        state.set_disabled(true);
        assert!(state.type_input(&value, "3").is_empty());
        assert!(state.keypad_digit(&value, digit('3')).is_empty());
        assert!(state.keypad_backspace(&value).is_empty());
        assert!(state.delete(&value).is_empty());
        state.tap_slot(&value, 1);
        assert_eq!(state.active_slot(), 0);
        assert!(state.confirm(&PinValue::from_code("12").unwrap()).is_empty());
    }

    #[test]
    fn value_never_exceeds_length() {
        let mut state = PinInputState::default();
        let mut value = PinValue::empty(3).unwrap();
        state.sync(&value);
        for input in ["1", "2", "3", "4", "5", "ab", "6"] {
            let effects = state.type_input(&value, input);
            apply(&mut state, &mut value, effects);
            assert_eq!(value.len(), 3);
        }
        assert_eq!(value.to_string(), "126");
    }

    #[test]
    fn slot_hit_testing_uses_rendered_areas() {
        let mut state = PinInputState::default();
        state.set_slot_areas(vec![Rect::new(0, 0, 5, 3), Rect::new(6, 0, 5, 3)]);
        assert_eq!(state.slot_at(7, 1), Some(1));
        assert_eq!(state.slot_at(5, 1), None);
    }

    #[test]
    fn resync_of_unchanged_blank_value_keeps_tapped_slot() {
        let mut state = PinInputState::default();
        let blank = PinValue::empty(4).unwrap();
        state.sync(&blank);
        state.tap_slot(&blank, 2);
        state.sync(&blank);
        assert_eq!(state.active_slot(), 2);

        let mut value = blank.clone();
        let effects = state.keypad_digit(&value, digit('7'));
        apply(&mut state, &mut value, effects);
        assert_eq!(value.to_string(), "__7_");
        assert_eq!(state.active_slot(), 3);
    }

    #[test]
    fn value_becoming_blank_resets_cursor() {
        let mut state = PinInputState::default();
        let filled = PinValue::from_code("12").unwrap();
        state.sync(&filled);
        state.focus_slot(&filled, 1);
        state.sync(&filled.cleared());
        assert_eq!(state.active_slot(), 0);
    }
}
