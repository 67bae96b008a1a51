//! Component system for the Lockpick TUI.
//!
//! Components are self-contained UI elements. They keep their local UI state in
//! `App`, handle the events routed to them, render themselves into a provided
//! `Rect`, and report side effects back to the runtime as [`Effect`]s instead
//! of mutating shared state directly.

use crossterm::event::{KeyEvent, MouseEvent};
use lockpick_types::{Effect, Msg};
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::App;

/// A UI element with its own behavior.
///
/// # Lifecycle
///
/// 1. `handle_message` sees application messages (ticks, resizes).
/// 2. `handle_key_events` / `handle_mouse_events` receive input routed by the
///    parent view.
/// 3. `render` draws into the allotted area. Components may record hit areas
///    in their state while rendering.
pub(crate) trait Component {
    /// Handle an application-level message.
    fn handle_message(&mut self, _app: &mut App, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events. Components hit-test against their last render.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hints bar while this component is active.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    /// Split `area` into the regions this component draws into.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }
}
