use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use lockpick_types::{Effect, Msg};
use ratatui::{
    prelude::*,
    style::Style,
    widgets::Paragraph,
};

use super::components::{Component, HistoryComponent, PinInputComponent, ScoreboardComponent};
use super::theme::theme_helpers as th;
use crate::app::{App, Severity};

/// The single challenge screen: scoreboard, PIN panel, status line, attempt
/// history and the hints bar.
#[derive(Default, Debug)]
pub struct MainView {
    pub scoreboard_view: ScoreboardComponent,
    pub pin_input_view: PinInputComponent,
    pub history_view: HistoryComponent,
}

impl MainView {
    fn render_status(frame: &mut Frame, area: Rect, app: &App) {
        let Some(status) = app.status.as_ref() else {
            return;
        };
        let theme = &*app.ctx.theme;
        let style = match status.severity {
            Severity::Info => theme.text_secondary_style(),
            Severity::Success => theme.status_success(),
            Severity::Warning => theme.status_warning(),
            Severity::Error => theme.status_error(),
        };
        frame.render_widget(Paragraph::new(Span::styled(status.text.as_str(), style)), area);
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        app.update(&msg)
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return vec![Effect::Quit],
            KeyCode::Char('c') if ctrl => return vec![Effect::Quit],
            KeyCode::Char('n') if ctrl => return vec![Effect::NewMatchRequested],
            KeyCode::Char('t') if ctrl => {
                app.cycle_theme();
                return Vec::new();
            }
            _ => {}
        }
        self.pin_input_view.handle_key_events(app, key)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        self.pin_input_view.handle_mouse_events(app, mouse)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        self.scoreboard_view.render(frame, layout[0], app);
        self.pin_input_view.render(frame, layout[1], app);
        Self::render_status(frame, layout[2], app);
        self.history_view.render(frame, layout[3], app);

        let hint_spans: Vec<Span> = self.get_hint_spans(app);
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints_widget, layout[4]);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];
        hint_spans.extend(self.pin_input_view.get_hint_spans(app));
        hint_spans.extend(th::build_hint_spans(
            &*app.ctx.theme,
            &[(" Ctrl+N", " New match "), ("Ctrl+T", " Theme "), ("Esc", " Quit ")],
        ));
        hint_spans
    }

    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(1),                                      // Scoreboard
            Constraint::Length(PinInputComponent::preferred_height(app)), // PIN panel
            Constraint::Length(1),                                      // Status line
            Constraint::Min(0),                                         // Attempt history
            Constraint::Length(1),                                      // Hints bar
        ])
        .split(area)
        .to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn draw(view: &mut MainView, app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|frame| view.render(frame, frame.area(), app)).expect("draw");
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn global_shortcuts() {
        let mut view = MainView::default();
        let mut app = App::for_tests(&["12"], 120);
        assert_eq!(view.handle_key_events(&mut app, key(KeyCode::Esc, KeyModifiers::NONE)), vec![Effect::Quit]);
        assert_eq!(
            view.handle_key_events(&mut app, key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            vec![Effect::Quit]
        );
        assert_eq!(
            view.handle_key_events(&mut app, key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            vec![Effect::NewMatchRequested]
        );
        let before = app.ctx.active_theme_id;
        assert!(view.handle_key_events(&mut app, key(KeyCode::Char('t'), KeyModifiers::CONTROL)).is_empty());
        assert_ne!(app.ctx.active_theme_id, before);
    }

    #[test]
    fn digits_route_to_the_pin_input() {
        let mut view = MainView::default();
        let mut app = App::for_tests(&["12"], 120);
        let effects = view.handle_key_events(&mut app, key(KeyCode::Char('4'), KeyModifiers::NONE));
        let _ = app.apply_effects(effects);
        assert_eq!(app.pin_value.to_string(), "4_");
    }

    #[test]
    fn renders_every_region() {
        let mut view = MainView::default();
        let mut app = App::for_tests(&["1234", "5678"], 120);
        for c in ['1', '2', '4', '3'] {
            let effects = view.handle_key_events(&mut app, key(KeyCode::Char(c), KeyModifiers::NONE));
            let _ = app.apply_effects(effects);
        }
        let effects = view.handle_key_events(&mut app, key(KeyCode::Enter, KeyModifiers::NONE));
        let _ = app.apply_effects(effects);

        let screen = draw(&mut view, &mut app, 100, 20);
        assert!(screen.contains("Round 1/2"));
        assert!(screen.contains("Enter the 4-digit PIN"));
        assert!(screen.contains("Locked. 2 in place, 2 misplaced."));
        assert!(screen.contains("1243"));
        assert!(screen.contains("Hints: "));
        assert!(screen.contains("New match"));
    }

    #[test]
    fn compact_screen_shows_the_keypad() {
        let mut view = MainView::default();
        let mut app = App::for_tests(&["1234"], 50);
        let screen = draw(&mut view, &mut app, 50, 30);
        assert!(screen.contains('⌫'));
        assert!(screen.contains("Tab keypad"));
    }

    #[test]
    fn tick_messages_drive_the_round_timer() {
        let mut view = MainView::default();
        let mut app = App::for_tests(&["12", "34"], 120);
        app.config.game.timer_duration_secs = 2;
        app.new_match();
        assert!(view.handle_message(&mut app, Msg::Tick(2_500)).is_empty());
        assert_eq!(app.game.current_round(), 2);
    }

    #[test]
    fn resize_messages_route_through_effects() {
        let mut view = MainView::default();
        let mut app = App::for_tests(&["1234"], 120);
        let effects = view.handle_message(&mut app, Msg::Resize(50, 30));
        assert_eq!(app.apply_effects(effects), std::ops::ControlFlow::Continue(()));
        assert!(draw(&mut view, &mut app, 50, 30).contains("Tab keypad"));
    }
}
