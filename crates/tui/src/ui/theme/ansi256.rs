//! ANSI 256-color fallback theme for terminals without truecolor support.
//!
//! Approximates the Slate palette with indexed colors so the slots and hints
//! stay legible inside macOS Terminal and other 8-bit color terminals.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

#[derive(Debug, Clone)]
pub struct Ansi256Theme {
    roles: ThemeRoles,
}

impl Ansi256Theme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: Color::Indexed(233),
                surface: Color::Indexed(234),
                surface_muted: Color::Indexed(236),
                border: Color::Indexed(240),

                text: Color::Indexed(255),
                text_secondary: Color::Indexed(252),
                text_muted: Color::Indexed(247),

                accent_primary: Color::Indexed(45),
                accent_secondary: Color::Indexed(204),

                focus: Color::Indexed(45),
                slot_filled_bg: Color::Indexed(236),
                slot_filled_border: Color::Indexed(31),
                slot_empty_bg: Color::Indexed(234),

                success: Color::Indexed(78),
                warning: Color::Indexed(214),
                error: Color::Indexed(203),
            },
        }
    }
}

impl Theme for Ansi256Theme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
