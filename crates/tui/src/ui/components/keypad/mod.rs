//! On-screen keypad used by the touch surface.

mod keypad_view;
mod state;

pub use keypad_view::{KEYPAD_HEIGHT, render_keypad};
pub use state::{KEYPAD_LAYOUT, KeypadKey, KeypadState};
