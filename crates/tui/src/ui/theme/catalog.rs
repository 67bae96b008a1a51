use super::{Ansi256Theme, DraculaTheme, SlateTheme, Theme};

/// Describes a selectable theme.
#[derive(Clone, Copy, Debug)]
pub struct ThemeDefinition {
    /// Canonical identifier used for persistence.
    pub id: &'static str,
    /// Human-friendly display name.
    pub label: &'static str,
    /// Theme aliases (e.g., env overrides) that map back to this definition.
    pub aliases: &'static [&'static str],
    /// Whether the palette targets ANSI/8-bit terminals.
    pub is_ansi_fallback: bool,
    factory: fn() -> Box<dyn Theme>,
}

impl ThemeDefinition {
    /// Instantiate the theme represented by this definition.
    pub fn build(&self) -> Box<dyn Theme> {
        (self.factory)()
    }
}

/// Ordered list of selectable themes.
pub const THEME_DEFINITIONS: &[ThemeDefinition] = &[
    ThemeDefinition {
        id: "slate",
        label: "Slate",
        aliases: &["slate", "default"],
        is_ansi_fallback: false,
        factory: || Box::new(SlateTheme::new()),
    },
    ThemeDefinition {
        id: "dracula",
        label: "Dracula",
        aliases: &["dracula"],
        is_ansi_fallback: false,
        factory: || Box::new(DraculaTheme::new()),
    },
    ThemeDefinition {
        id: "ansi256",
        label: "ANSI 256",
        aliases: &["ansi256", "ansi", "256"],
        is_ansi_fallback: true,
        factory: || Box::new(Ansi256Theme::new()),
    },
];

/// Locate a definition by alias or canonical id (case-insensitive).
pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    THEME_DEFINITIONS.iter().find(|definition| {
        definition.id.eq_ignore_ascii_case(name) || definition.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    })
}

/// The definition following `id` in catalog order, wrapping around.
pub fn next_after(id: &str) -> &'static ThemeDefinition {
    let position = THEME_DEFINITIONS.iter().position(|definition| definition.id == id);
    let next = position.map_or(0, |index| (index + 1) % THEME_DEFINITIONS.len());
    &THEME_DEFINITIONS[next]
}

/// Preferred default for truecolor terminals.
pub fn default_truecolor() -> &'static ThemeDefinition {
    &THEME_DEFINITIONS[0]
}

/// Preferred default for ANSI-only terminals.
pub fn default_ansi() -> &'static ThemeDefinition {
    &THEME_DEFINITIONS[2]
}
