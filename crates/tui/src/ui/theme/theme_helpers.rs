use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use super::roles::Theme;
use crate::ui::theme::roles::ThemeRoles;

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Visual state of one PIN slot box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotVisual {
    pub filled: bool,
    /// The slot holds the cursor and the widget has focus.
    pub active: bool,
    pub enabled: bool,
}

/// Fill and text style for a slot box.
pub fn slot_style<T: Theme + ?Sized>(theme: &T, visual: SlotVisual) -> Style {
    let ThemeRoles {
        slot_filled_bg,
        slot_empty_bg,
        text,
        text_muted,
        ..
    } = *theme.roles();
    let bg = if visual.filled { slot_filled_bg } else { slot_empty_bg };
    let fg = if visual.enabled { text } else { text_muted };
    Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
}

/// Border for a slot box. The active slot uses the focus color and a thick border.
pub fn slot_block<T: Theme + ?Sized>(theme: &T, visual: SlotVisual) -> Block<'static> {
    let ThemeRoles {
        focus,
        slot_filled_border,
        border,
        text_muted,
        ..
    } = *theme.roles();
    let (color, border_type) = match visual {
        SlotVisual { enabled: false, .. } => (text_muted, BorderType::Plain),
        SlotVisual { active: true, .. } => (focus, BorderType::Thick),
        SlotVisual { filled: true, .. } => (slot_filled_border, BorderType::Plain),
        _ => (border, BorderType::Plain),
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(color))
}

/// Secondary button style (outline-like, rely on border color in Block).
pub fn button_secondary_style<T: Theme + ?Sized>(theme: &T, enabled: bool, selected: bool) -> Style {
    if !enabled {
        return theme.text_muted_style();
    }
    let ThemeRoles {
        accent_secondary,
        surface_muted,
        ..
    } = *theme.roles();
    let style = Style::default().fg(accent_secondary).add_modifier(Modifier::BOLD);
    if selected { style.bg(surface_muted) } else { style }
}

/// Renders a standard button
#[allow(clippy::too_many_arguments)]
pub fn render_button<T: Theme + ?Sized>(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_enabled: bool,
    is_focused: bool,
    is_selected: bool,
    theme: &T,
    borders: Borders,
) {
    let border_style = if is_enabled {
        theme.border_style(is_focused)
    } else {
        theme.text_muted_style()
    };

    let padding = if borders.is_empty() {
        Padding::vertical(1)
    } else {
        Padding::ZERO
    };

    frame.render_widget(
        Paragraph::new(label)
            .centered()
            .block(
                Block::bordered()
                    .borders(borders)
                    .border_type(if is_focused { BorderType::Thick } else { BorderType::Plain })
                    .border_style(border_style)
                    .padding(padding),
            )
            .style(button_secondary_style(theme, is_enabled, is_selected)),
        area,
    );
}

/// Builds `key description` span pairs for the hints bar.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    hints
        .iter()
        .flat_map(|(key, description)| {
            [
                Span::styled(*key, theme.accent_emphasis_style()),
                Span::styled(*description, theme.text_muted_style()),
            ]
        })
        .collect()
}
