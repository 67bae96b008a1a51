//! Device-class detection from the terminal width.
//!
//! Narrow terminals get the touch surface (tap targets plus on-screen keypad),
//! wide ones the keyboard surface. Configuration may force either.

use lockpick_types::LayoutMode;

/// Width below which a terminal counts as compact.
pub const DEFAULT_COMPACT_WIDTH: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Compact,
}

impl DeviceClass {
    pub fn from_width(width: u16, threshold: u16) -> Self {
        if width < threshold { DeviceClass::Compact } else { DeviceClass::Desktop }
    }

    /// Detection with an optional forced layout.
    pub fn resolve(mode: LayoutMode, width: u16, threshold: u16) -> Self {
        match mode {
            LayoutMode::Auto => Self::from_width(width, threshold),
            LayoutMode::Keyboard => DeviceClass::Desktop,
            LayoutMode::Touch => DeviceClass::Compact,
        }
    }

    pub fn is_compact(self) -> bool {
        self == DeviceClass::Compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(DeviceClass::from_width(79, 80), DeviceClass::Compact);
        assert_eq!(DeviceClass::from_width(80, 80), DeviceClass::Desktop);
        assert_eq!(DeviceClass::from_width(0, 80), DeviceClass::Compact);
    }

    #[test]
    fn forced_layouts_ignore_width() {
        assert_eq!(DeviceClass::resolve(LayoutMode::Touch, 200, 80), DeviceClass::Compact);
        assert_eq!(DeviceClass::resolve(LayoutMode::Keyboard, 20, 80), DeviceClass::Desktop);
        assert_eq!(DeviceClass::resolve(LayoutMode::Auto, 20, 80), DeviceClass::Compact);
    }
}
