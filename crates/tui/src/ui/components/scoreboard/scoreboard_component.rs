use std::time::Duration;

use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::App, ui::components::Component};

/// Seconds left under which the timer turns to the warning color.
const TIMER_WARNING_SECS: u64 = 10;

/// One-line header: round, score and the round timer.
#[derive(Debug, Default)]
pub struct ScoreboardComponent;

pub(crate) fn format_remaining(remaining: Duration) -> String {
    // round up so the display reads 0:00 only once time is out
    let secs = remaining.as_millis().div_ceil(1000) as u64;
    format!("{}:{:02}", secs / 60, secs % 60)
}

impl Component for ScoreboardComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let game = &app.game;
        let rounds = game.config().rounds;
        let separator = Span::styled(" · ", theme.text_muted_style());

        let mut spans = vec![
            Span::styled("Lockpick", theme.accent_emphasis_style()),
            separator.clone(),
        ];
        if game.is_finished() {
            spans.push(Span::styled("Match over", theme.text_secondary_style()));
        } else {
            spans.push(Span::styled(
                format!("Round {}/{}", game.current_round(), rounds),
                theme.text_primary_style(),
            ));
        }
        spans.push(separator.clone());
        spans.push(Span::styled(
            format!("Score {}/{}", game.score(), rounds),
            theme.text_primary_style().add_modifier(Modifier::BOLD),
        ));
        if let Some(remaining) = game.time_remaining() {
            let style = if remaining.as_secs() < TIMER_WARNING_SECS {
                theme.status_warning().add_modifier(Modifier::BOLD)
            } else {
                theme.text_secondary_style()
            };
            spans.push(separator);
            spans.push(Span::styled(format!("Time {}", format_remaining(remaining)), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.text_primary_style()), rect);
    }
}
