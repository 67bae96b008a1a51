//! Slate: the default palette, cool grey surfaces with cyan focus cues.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

pub const SLATE_950: Color = Color::Rgb(0x02, 0x06, 0x17); // #020617
pub const SLATE_900: Color = Color::Rgb(0x0F, 0x17, 0x2A); // #0f172a
pub const SLATE_800: Color = Color::Rgb(0x1E, 0x29, 0x3B); // #1e293b
pub const SLATE_600: Color = Color::Rgb(0x47, 0x55, 0x69); // #475569
pub const SLATE_400: Color = Color::Rgb(0x94, 0xA3, 0xB8); // #94a3b8
pub const SLATE_200: Color = Color::Rgb(0xE2, 0xE8, 0xF0); // #e2e8f0
pub const WHITE: Color = Color::Rgb(0xFF, 0xFF, 0xFF);

pub const CYAN_400: Color = Color::Rgb(0x22, 0xD3, 0xEE); // #22d3ee
pub const CYAN_700: Color = Color::Rgb(0x0E, 0x74, 0x90); // #0e7490, cyan-500 at half strength on slate
pub const EMERALD_400: Color = Color::Rgb(0x34, 0xD3, 0x99); // #34d399
pub const AMBER_400: Color = Color::Rgb(0xFB, 0xBF, 0x24); // #fbbf24
pub const ROSE_500: Color = Color::Rgb(0xF4, 0x3F, 0x5E); // #f43f5e

#[derive(Debug, Clone)]
pub struct SlateTheme {
    roles: ThemeRoles,
}

impl SlateTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: SLATE_950,
                surface: SLATE_900,
                surface_muted: SLATE_800,
                border: SLATE_600,

                text: WHITE,
                text_secondary: SLATE_200,
                text_muted: SLATE_400,

                accent_primary: CYAN_400,
                accent_secondary: ROSE_500,

                focus: CYAN_400,
                slot_filled_bg: SLATE_800,
                slot_filled_border: CYAN_700,
                slot_empty_bg: SLATE_900,

                success: EMERALD_400,
                warning: AMBER_400,
                error: ROSE_500,
            },
        }
    }
}

impl Theme for SlateTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
