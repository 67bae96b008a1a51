use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use lockpick_types::Effect;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    text::Span,
};

use super::surface::SurfaceContext;
use crate::{
    app::App,
    ui::{components::Component, theme::theme_helpers as th},
};

/// Hosts the PIN slots (and the keypad on compact terminals) inside a panel.
///
/// Events are forwarded to the surface selected by the current device class.
/// On the touch surface Tab moves focus between the slot row and the keypad.
#[derive(Debug, Default)]
pub struct PinInputComponent;

impl PinInputComponent {
    /// Rows the panel needs, borders included.
    pub fn preferred_height(app: &App) -> u16 {
        app.surface().preferred_height() + 2
    }
}

impl Component for PinInputComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.device_class.is_compact() && matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            if !app.pin_input.is_disabled() {
                if key.code == KeyCode::Tab {
                    app.focus.next();
                } else {
                    app.focus.prev();
                }
            }
            return Vec::new();
        }

        let surface = app.surface();
        surface.handle_key(
            SurfaceContext {
                value: &app.pin_value,
                input: &mut app.pin_input,
                keypad: &mut app.keypad,
            },
            key,
        )
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) && !app.pin_input.is_disabled() {
            if app.device_class.is_compact() && app.keypad.key_at(mouse.column, mouse.row).is_some() {
                app.focus.focus(&app.keypad.focus);
            } else if app.pin_input.slot_at(mouse.column, mouse.row).is_some() {
                app.focus.focus(&app.pin_input.focus);
            }
        }

        let surface = app.surface();
        surface.handle_mouse(
            SurfaceContext {
                value: &app.pin_value,
                input: &mut app.pin_input,
                keypad: &mut app.keypad,
            },
            mouse,
        )
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let enabled = !app.pin_input.is_disabled();
        let focused = enabled && (app.pin_input.focus.get() || app.keypad.focus.get());
        let title = format!("Enter the {}-digit PIN", app.pin_value.len());
        let block = th::block(&*app.ctx.theme, Some(title.as_str()), focused);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let surface = app.surface();
        let [content] = Layout::vertical([Constraint::Length(surface.preferred_height())])
            .flex(Flex::Center)
            .areas(inner);
        surface.render(
            frame,
            content,
            SurfaceContext {
                value: &app.pin_value,
                input: &mut app.pin_input,
                keypad: &mut app.keypad,
            },
            &*app.ctx.theme,
        );
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        if app.pin_input.is_disabled() {
            return Vec::new();
        }
        app.surface().hint_spans(app.keypad.focus.get(), &*app.ctx.theme)
    }
}
