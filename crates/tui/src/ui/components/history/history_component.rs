use lockpick_engine::GuessRecord;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::{
    app::App,
    ui::{
        components::Component,
        theme::{Theme, theme_helpers as th},
    },
};

/// Guesses made in the current round, newest at the bottom.
#[derive(Debug, Default)]
pub struct HistoryComponent;

fn guess_line<'a>(theme: &dyn Theme, attempt: usize, record: &'a GuessRecord) -> Line<'a> {
    let mut spans = vec![Span::styled(format!("{attempt:>3}. "), theme.text_muted_style())];
    match &record.hints {
        Some(hints) => {
            for (digit, hint) in record.guess.chars().zip(hints) {
                spans.push(Span::styled(digit.to_string(), theme.hint_style(*hint)));
            }
            spans.push(Span::raw("  "));
            let symbols: String = hints.iter().map(|hint| hint.symbol()).collect();
            spans.push(Span::styled(symbols, theme.text_secondary_style()));
        }
        None => spans.push(Span::styled(record.guess.as_str(), theme.text_primary_style())),
    }
    Line::from(spans)
}

impl Component for HistoryComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let guesses = app.game.guesses();
        let title = format!("Attempts: round {}", app.game.current_round());
        let block = th::block(theme, Some(title.as_str()), false);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        if guesses.is_empty() {
            let placeholder = if app.game.is_finished() {
                "No round in progress."
            } else {
                "No attempts yet."
            };
            frame.render_widget(List::new([ListItem::new(Span::styled(placeholder, theme.text_muted_style()))]), inner);
            return;
        }

        // keep the newest attempts in view
        let visible = inner.height as usize;
        let skip = guesses.len().saturating_sub(visible);
        let items: Vec<ListItem> = guesses
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(index, record)| ListItem::new(guess_line(theme, index + 1, record)))
            .collect();
        frame.render_widget(List::new(items).style(theme.text_primary_style()), inner);
    }
}
