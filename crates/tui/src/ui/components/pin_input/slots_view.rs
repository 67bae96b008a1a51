use lockpick_types::PinValue;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    widgets::Paragraph,
};

use super::state::PinInputState;
use crate::ui::{
    theme::{
        Theme,
        theme_helpers::{self as th, SlotVisual},
    },
    utils::centered_row,
};

pub const SLOT_HEIGHT: u16 = 3;
const SLOT_WIDTH: u16 = 7;
const SLOT_MIN_WIDTH: u16 = 3;
const SLOT_GAP: u16 = 1;

/// Draws one box per slot and records their areas for hit testing.
///
/// `highlight_active` marks the cursor slot. With `place_cursor` the terminal
/// cursor is parked inside it as well.
pub fn render_slots(
    frame: &mut Frame,
    area: Rect,
    value: &PinValue,
    state: &mut PinInputState,
    highlight_active: bool,
    place_cursor: bool,
    theme: &dyn Theme,
) {
    let row = Rect { height: SLOT_HEIGHT.min(area.height), ..area };
    let cells = centered_row(row, value.len(), SLOT_WIDTH, SLOT_MIN_WIDTH, SLOT_GAP);
    let enabled = !state.is_disabled();

    for (index, cell) in cells.iter().enumerate() {
        let digit = value.get(index);
        let active = enabled && highlight_active && index == state.active_slot();
        let visual = SlotVisual {
            filled: digit.is_some(),
            active,
            enabled,
        };
        let label = digit.map(|digit| digit.to_string()).unwrap_or_default();
        frame.render_widget(
            Paragraph::new(label)
                .centered()
                .block(th::slot_block(theme, visual))
                .style(th::slot_style(theme, visual)),
            *cell,
        );
        if active && place_cursor && cell.width > 2 && cell.height > 2 {
            frame.set_cursor_position(Position::new(cell.x + cell.width / 2, cell.y + 1));
        }
    }

    state.set_slot_areas(cells);
}
