use lockpick_types::Digit;
use rat_focus::FocusFlag;
use ratatui::layout::{Position, Rect};

/// One button on the on-screen keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadKey {
    Digit(Digit),
    Backspace,
    Enter,
}

impl KeypadKey {
    pub fn label(&self) -> String {
        match self {
            KeypadKey::Digit(digit) => digit.to_string(),
            KeypadKey::Backspace => "⌫".to_string(),
            KeypadKey::Enter => "↵".to_string(),
        }
    }
}

pub const KEYPAD_COLUMNS: usize = 3;
pub const KEYPAD_ROWS: usize = 4;

const fn digit_key(value: u8) -> KeypadKey {
    KeypadKey::Digit(Digit::ALL[value as usize])
}

/// Row-major layout: `1 2 3 / 4 5 6 / 7 8 9 / ⌫ 0 ↵`.
pub const KEYPAD_LAYOUT: [KeypadKey; KEYPAD_COLUMNS * KEYPAD_ROWS] = [
    digit_key(1),
    digit_key(2),
    digit_key(3),
    digit_key(4),
    digit_key(5),
    digit_key(6),
    digit_key(7),
    digit_key(8),
    digit_key(9),
    KeypadKey::Backspace,
    digit_key(0),
    KeypadKey::Enter,
];

/// Highlight and hit areas for the keypad grid.
#[derive(Debug, Clone)]
pub struct KeypadState {
    highlighted: usize,
    /// Key pressed most recently, shown as selected until the next input.
    pressed: Option<usize>,
    pub focus: FocusFlag,
    key_areas: Vec<Rect>,
}

impl Default for KeypadState {
    fn default() -> Self {
        Self {
            // "5" sits in the middle of the grid
            highlighted: 4,
            pressed: None,
            focus: FocusFlag::new().with_name("keypad"),
            key_areas: Vec::new(),
        }
    }
}

impl KeypadState {
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted_key(&self) -> KeypadKey {
        KEYPAD_LAYOUT[self.highlighted]
    }

    pub fn pressed(&self) -> Option<usize> {
        self.pressed
    }

    pub fn mark_pressed(&mut self, key: KeypadKey) {
        self.pressed = KEYPAD_LAYOUT.iter().position(|candidate| *candidate == key);
    }

    pub fn clear_pressed(&mut self) {
        self.pressed = None;
    }

    /// Move the highlight by a grid offset, clamped to the edges.
    pub fn move_highlight(&mut self, d_col: isize, d_row: isize) {
        let col = (self.highlighted % KEYPAD_COLUMNS) as isize;
        let row = (self.highlighted / KEYPAD_COLUMNS) as isize;
        let col = (col + d_col).clamp(0, KEYPAD_COLUMNS as isize - 1) as usize;
        let row = (row + d_row).clamp(0, KEYPAD_ROWS as isize - 1) as usize;
        self.highlighted = row * KEYPAD_COLUMNS + col;
    }

    pub fn set_key_areas(&mut self, key_areas: Vec<Rect>) {
        self.key_areas = key_areas;
    }

    /// The key under a mouse position, from the last render.
    pub fn key_at(&self, column: u16, row: u16) -> Option<KeypadKey> {
        let position = Position::new(column, row);
        self.key_areas
            .iter()
            .position(|area| area.contains(position))
            .and_then(|index| KEYPAD_LAYOUT.get(index).copied())
    }
}
