use ratatui::{Frame, layout::Rect, widgets::Borders};

use super::state::{KEYPAD_COLUMNS, KEYPAD_LAYOUT, KEYPAD_ROWS, KeypadState};
use crate::ui::{
    theme::{Theme, theme_helpers as th},
    utils::centered_row,
};

const KEY_WIDTH: u16 = 7;
const KEY_MIN_WIDTH: u16 = 3;
const KEY_HEIGHT: u16 = 3;

/// Rows needed to draw the full grid.
pub const KEYPAD_HEIGHT: u16 = KEY_HEIGHT * KEYPAD_ROWS as u16;

/// Draws the 3x4 keypad and records the key areas for mouse presses.
pub fn render_keypad(frame: &mut Frame, area: Rect, keypad: &mut KeypadState, enabled: bool, theme: &dyn Theme) {
    let focused = enabled && keypad.focus.get();
    let mut key_areas = Vec::with_capacity(KEYPAD_LAYOUT.len());

    for row in 0..KEYPAD_ROWS {
        let y = area.y.saturating_add(row as u16 * KEY_HEIGHT);
        let row_area = Rect::new(area.x, y, area.width, KEY_HEIGHT).intersection(area);
        key_areas.extend(centered_row(row_area, KEYPAD_COLUMNS, KEY_WIDTH, KEY_MIN_WIDTH, 1));
    }

    for (index, (key, key_area)) in KEYPAD_LAYOUT.iter().zip(&key_areas).enumerate() {
        let highlighted = focused && index == keypad.highlighted();
        let pressed = enabled && keypad.pressed() == Some(index);
        th::render_button(frame, *key_area, &key.label(), enabled, highlighted, pressed, theme, Borders::ALL);
    }

    keypad.set_key_areas(key_areas);
}
