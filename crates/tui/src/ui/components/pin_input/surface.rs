//! Input surfaces: the two ways the PIN widget can be driven.
//!
//! Both surfaces translate terminal events into operations on the same
//! [`PinInputState`]. Neither validates digits itself; every write goes
//! through [`PinValue::set_digit`] or [`PinValue::with_slot`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use lockpick_types::{Digit, Effect, PinValue};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::Span,
};

use super::{slots_view::SLOT_HEIGHT, slots_view::render_slots, state::PinInputState};
use crate::ui::{
    components::keypad::{KEYPAD_HEIGHT, KeypadKey, KeypadState, render_keypad},
    theme::{Theme, theme_helpers as th},
    viewport::DeviceClass,
};

/// Borrowed widget state handed to a surface for one event or frame.
pub struct SurfaceContext<'a> {
    pub value: &'a PinValue,
    pub input: &'a mut PinInputState,
    pub keypad: &'a mut KeypadState,
}

pub trait InputSurface: Sync {
    fn handle_key(&self, ctx: SurfaceContext<'_>, key: KeyEvent) -> Vec<Effect>;

    fn handle_mouse(&self, ctx: SurfaceContext<'_>, mouse: MouseEvent) -> Vec<Effect>;

    fn render(&self, frame: &mut Frame, area: Rect, ctx: SurfaceContext<'_>, theme: &dyn Theme);

    /// Rows the surface needs below its title.
    fn preferred_height(&self) -> u16;

    fn hint_spans(&self, keypad_focused: bool, theme: &dyn Theme) -> Vec<Span<'static>>;
}

static KEYBOARD: KeyboardSurface = KeyboardSurface;
static TOUCH: TouchSurface = TouchSurface;

/// The surface used for a device class.
pub fn surface_for(class: DeviceClass) -> &'static dyn InputSurface {
    match class {
        DeviceClass::Desktop => &KEYBOARD,
        DeviceClass::Compact => &TOUCH,
    }
}

fn is_plain(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn left_click(mouse: &MouseEvent) -> bool {
    matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
}

/// One box per slot with a focus cursor; driven by the hardware keyboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyboardSurface;

impl InputSurface for KeyboardSurface {
    fn handle_key(&self, ctx: SurfaceContext<'_>, key: KeyEvent) -> Vec<Effect> {
        let SurfaceContext { value, input, .. } = ctx;
        match key.code {
            KeyCode::Char(c) if is_plain(&key) => input.type_input(value, &c.to_string()),
            KeyCode::Backspace => input.backspace(value),
            KeyCode::Delete => input.delete(value),
            KeyCode::Enter => input.confirm(value),
            KeyCode::Left | KeyCode::BackTab => {
                input.focus_prev(value);
                Vec::new()
            }
            KeyCode::Right | KeyCode::Tab => {
                input.focus_next(value);
                Vec::new()
            }
            KeyCode::Home => {
                input.focus_first(value);
                Vec::new()
            }
            KeyCode::End => {
                input.focus_last(value);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_mouse(&self, ctx: SurfaceContext<'_>, mouse: MouseEvent) -> Vec<Effect> {
        if left_click(&mouse)
            && let Some(index) = ctx.input.slot_at(mouse.column, mouse.row)
        {
            ctx.input.focus_slot(ctx.value, index);
        }
        Vec::new()
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: SurfaceContext<'_>, theme: &dyn Theme) {
        let focused = ctx.input.focus.get();
        render_slots(frame, area, ctx.value, ctx.input, focused, focused, theme);
    }

    fn preferred_height(&self) -> u16 {
        SLOT_HEIGHT
    }

    fn hint_spans(&self, _keypad_focused: bool, theme: &dyn Theme) -> Vec<Span<'static>> {
        th::build_hint_spans(
            theme,
            &[
                ("0-9", " type "),
                ("←/→", " move "),
                ("Bksp/Del", " clear "),
                ("Enter", " submit  "),
            ],
        )
    }
}

/// Tap-target slots above an on-screen keypad.
#[derive(Debug, Default, Clone, Copy)]
pub struct TouchSurface;

impl TouchSurface {
    fn press(ctx: SurfaceContext<'_>, key: KeypadKey) -> Vec<Effect> {
        let SurfaceContext { value, input, keypad } = ctx;
        if input.is_disabled() {
            return Vec::new();
        }
        keypad.mark_pressed(key);
        match key {
            KeypadKey::Digit(digit) => input.keypad_digit(value, digit),
            KeypadKey::Backspace => input.keypad_backspace(value),
            KeypadKey::Enter => input.confirm(value),
        }
    }
}

impl InputSurface for TouchSurface {
    fn handle_key(&self, ctx: SurfaceContext<'_>, key: KeyEvent) -> Vec<Effect> {
        ctx.keypad.clear_pressed();
        if let KeyCode::Char(c) = key.code
            && is_plain(&key)
            && let Ok(digit) = Digit::try_from(c)
        {
            return Self::press(ctx, KeypadKey::Digit(digit));
        }
        if key.code == KeyCode::Backspace {
            return Self::press(ctx, KeypadKey::Backspace);
        }

        if ctx.keypad.focus.get() {
            match key.code {
                KeyCode::Left => ctx.keypad.move_highlight(-1, 0),
                KeyCode::Right => ctx.keypad.move_highlight(1, 0),
                KeyCode::Up => ctx.keypad.move_highlight(0, -1),
                KeyCode::Down => ctx.keypad.move_highlight(0, 1),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let key = ctx.keypad.highlighted_key();
                    return Self::press(ctx, key);
                }
                _ => {}
            }
            return Vec::new();
        }

        let SurfaceContext { value, input, keypad } = ctx;
        match key.code {
            KeyCode::Left => {
                let target = input.active_slot().saturating_sub(1);
                input.tap_slot(value, target);
            }
            KeyCode::Right => {
                let target = input.active_slot() + 1;
                input.tap_slot(value, target);
            }
            KeyCode::Enter => return Self::press(SurfaceContext { value, input, keypad }, KeypadKey::Enter),
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse(&self, ctx: SurfaceContext<'_>, mouse: MouseEvent) -> Vec<Effect> {
        if !left_click(&mouse) {
            return Vec::new();
        }
        ctx.keypad.clear_pressed();
        if let Some(key) = ctx.keypad.key_at(mouse.column, mouse.row) {
            return Self::press(ctx, key);
        }
        if let Some(index) = ctx.input.slot_at(mouse.column, mouse.row) {
            ctx.input.tap_slot(ctx.value, index);
        }
        Vec::new()
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: SurfaceContext<'_>, theme: &dyn Theme) {
        let [slots_area, _, keypad_area] = Layout::vertical([
            Constraint::Length(SLOT_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(KEYPAD_HEIGHT),
        ])
        .areas(area);
        let SurfaceContext { value, input, keypad } = ctx;
        let enabled = !input.is_disabled();
        render_slots(frame, slots_area, value, input, true, false, theme);
        render_keypad(frame, keypad_area, keypad, enabled, theme);
    }

    fn preferred_height(&self) -> u16 {
        SLOT_HEIGHT + 1 + KEYPAD_HEIGHT
    }

    fn hint_spans(&self, keypad_focused: bool, theme: &dyn Theme) -> Vec<Span<'static>> {
        if keypad_focused {
            th::build_hint_spans(
                theme,
                &[
                    ("Arrows", " pick key "),
                    ("Enter", " press "),
                    ("Tab", " slots  "),
                ],
            )
        } else {
            th::build_hint_spans(
                theme,
                &[
                    ("←/→", " pick slot "),
                    ("Enter", " submit "),
                    ("Tab", " keypad  "),
                ],
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    struct Harness {
        value: PinValue,
        input: PinInputState,
        keypad: KeypadState,
    }

    impl Harness {
        fn new(len: usize) -> Self {
            let value = PinValue::empty(len).unwrap();
            let mut input = PinInputState::default();
            input.sync(&value);
            Self {
                value,
                input,
                keypad: KeypadState::default(),
            }
        }

        fn key(&mut self, surface: &dyn InputSurface, event: KeyEvent) -> Vec<PinValue> {
            let effects = surface.handle_key(
                SurfaceContext {
                    value: &self.value,
                    input: &mut self.input,
                    keypad: &mut self.keypad,
                },
                event,
            );
            self.apply(effects)
        }

        fn click(&mut self, surface: &dyn InputSurface, column: u16, row: u16) -> Vec<PinValue> {
            let effects = surface.handle_mouse(
                SurfaceContext {
                    value: &self.value,
                    input: &mut self.input,
                    keypad: &mut self.keypad,
                },
                click(column, row),
            );
            self.apply(effects)
        }

        fn apply(&mut self, effects: Vec<Effect>) -> Vec<PinValue> {
            let mut completed = Vec::new();
            for effect in effects {
                match effect {
                    Effect::PinChanged(next) => self.value = next,
                    Effect::PinCompleted(value) => completed.push(value),
                    _ => {}
                }
            }
            self.input.sync(&self.value);
            completed
        }
    }

    #[test]
    fn keyboard_typing_advances_and_enter_submits() {
        let surface = surface_for(DeviceClass::Desktop);
        let mut harness = Harness::new(4);
        for c in ['3', '1', 'x', '9', '2'] {
            assert!(harness.key(surface, key(KeyCode::Char(c))).is_empty());
        }
        assert_eq!(harness.value.to_string(), "3192");
        let completed = harness.key(surface, key(KeyCode::Enter));
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].code().as_deref(), Some("3192"));
    }

    #[test]
    fn keyboard_navigation_and_deletion() {
        let surface = surface_for(DeviceClass::Desktop);
        let mut harness = Harness::new(4);
        harness.key(surface, key(KeyCode::End));
        assert_eq!(harness.input.active_slot(), 3);
        harness.key(surface, key(KeyCode::Char('8')));
        harness.key(surface, key(KeyCode::BackTab));
        assert_eq!(harness.input.active_slot(), 2);
        harness.key(surface, key(KeyCode::Backspace));
        assert_eq!(harness.input.active_slot(), 1);
        assert_eq!(harness.value.to_string(), "___8");
        harness.key(surface, key(KeyCode::End));
        harness.key(surface, key(KeyCode::Delete));
        assert!(harness.value.is_blank());
        assert_eq!(harness.input.active_slot(), 0);
    }

    #[test]
    fn keyboard_ignores_control_chords() {
        let surface = surface_for(DeviceClass::Desktop);
        let mut harness = Harness::new(2);
        harness.key(surface, KeyEvent::new(KeyCode::Char('1'), KeyModifiers::CONTROL));
        assert!(harness.value.is_blank());
    }

    #[test]
    fn keyboard_click_focuses_slot() {
        let surface = surface_for(DeviceClass::Desktop);
        let mut harness = Harness::new(3);
        harness
            .input
            .set_slot_areas(vec![Rect::new(0, 0, 5, 3), Rect::new(6, 0, 5, 3), Rect::new(12, 0, 5, 3)]);
        harness.click(surface, 13, 1);
        assert_eq!(harness.input.active_slot(), 2);
    }

    #[test]
    fn touch_keypad_clicks_follow_active_slot() {
        let surface = surface_for(DeviceClass::Compact);
        let mut harness = Harness::new(4);
        harness.input.set_slot_areas((0..4).map(|i| Rect::new(i * 6, 0, 5, 3)).collect());
        let key_areas: Vec<Rect> = (0..12u16).map(|i| Rect::new((i % 3) * 8, 4 + (i / 3) * 3, 7, 3)).collect();
        harness.keypad.set_key_areas(key_areas);

        // tap slot 2, press "7" (row 2, col 0), press "0" (row 3, col 1)
        harness.click(surface, 13, 1);
        harness.click(surface, 1, 11);
        harness.click(surface, 9, 14);
        assert_eq!(harness.value.to_string(), "__70");
        assert_eq!(harness.input.active_slot(), 3);

        // ⌫ on a filled slot clears it in place
        harness.click(surface, 1, 14);
        assert_eq!(harness.value.to_string(), "__7_");
        assert_eq!(harness.input.active_slot(), 3);

        // ↵ is a no-op while incomplete
        assert!(harness.click(surface, 17, 14).is_empty());
    }

    #[test]
    fn touch_keys_press_matching_keypad_buttons() {
        let surface = surface_for(DeviceClass::Compact);
        let mut harness = Harness::new(3);
        for c in ['5', '5', '1'] {
            harness.key(surface, key(KeyCode::Char(c)));
        }
        assert_eq!(harness.keypad.pressed(), Some(0));
        harness.key(surface, key(KeyCode::Backspace));
        assert_eq!(harness.value.to_string(), "55_");
        harness.key(surface, key(KeyCode::Backspace));
        assert_eq!(harness.value.to_string(), "5__");
        assert_eq!(harness.input.active_slot(), 1);
    }

    #[test]
    fn touch_keypad_navigation_presses_highlighted_key() {
        let surface = surface_for(DeviceClass::Compact);
        let mut harness = Harness::new(1);
        harness.keypad.focus.set(true);
        harness.key(surface, key(KeyCode::Up));
        harness.key(surface, key(KeyCode::Enter));
        assert_eq!(harness.value.to_string(), "2");
        harness.key(surface, key(KeyCode::Down));
        harness.key(surface, key(KeyCode::Down));
        harness.key(surface, key(KeyCode::Down));
        harness.key(surface, key(KeyCode::Right));
        let completed = harness.key(surface, key(KeyCode::Char(' ')));
        assert_eq!(harness.keypad.highlighted_key(), KeypadKey::Enter);
        assert_eq!(completed.len(), 1);
    }

    #[test]
    fn touch_slot_row_arrows_tap_neighbours() {
        let surface = surface_for(DeviceClass::Compact);
        let mut harness = Harness::new(3);
        harness.key(surface, key(KeyCode::Right));
        harness.key(surface, key(KeyCode::Right));
        harness.key(surface, key(KeyCode::Right));
        assert_eq!(harness.input.active_slot(), 2);
        harness.key(surface, key(KeyCode::Left));
        assert_eq!(harness.input.active_slot(), 1);
    }

    #[test]
    fn disabled_touch_surface_is_inert() {
        let surface = surface_for(DeviceClass::Compact);
        let mut harness = Harness::new(2);
        harness.input.set_disabled(true);
        harness.key(surface, key(KeyCode::Char('4')));
        assert!(harness.value.is_blank());
        assert_eq!(harness.keypad.pressed(), None);
    }
}
