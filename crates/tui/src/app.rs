//! Application state for the challenge screen.
//!
//! `App` is the owner of the PIN value. Components never write it directly:
//! they return [`Effect`]s, and [`App::apply_effects`] adopts them in order,
//! scoring completed entries against the running [`Match`].

use std::{ops::ControlFlow, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use lockpick_engine::{GameConfig, GuessOutcome, Match, RoundResult, RoundSummary, Secrets};
use lockpick_types::{CompletionPolicy, Effect, Hint, KeypadAddressing, LayoutMode, Msg, PinValue};
use lockpick_util::UserPreferences;
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{info, warn};

use crate::ui::{
    components::{
        keypad::KeypadState,
        pin_input::{InputSurface, PinInputState, surface_for},
    },
    theme::{self, Theme, catalog},
    viewport::{DEFAULT_COMPACT_WIDTH, DeviceClass},
};

/// Settings the TUI is launched with, already merged from preferences and flags.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    pub game: GameConfig,
    /// Fixed secrets, one per round. Random secrets are drawn when absent.
    pub secrets: Option<Vec<String>>,
    pub completion: CompletionPolicy,
    pub addressing: KeypadAddressing,
    pub layout: LayoutMode,
    /// Terminal width below which the touch surface is used.
    pub compact_width: u16,
    pub theme: Option<String>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            secrets: None,
            completion: CompletionPolicy::default(),
            addressing: KeypadAddressing::default(),
            layout: LayoutMode::default(),
            compact_width: DEFAULT_COMPACT_WIDTH,
            theme: None,
        }
    }
}

/// Cross-cutting context shared by every component.
pub struct SharedCtx {
    pub theme: Box<dyn Theme>,
    pub active_theme_id: &'static str,
    pub preferences: Arc<UserPreferences>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// One line of feedback shown under the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

impl StatusMessage {
    fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }
}

pub struct App {
    pub ctx: SharedCtx,
    pub config: TuiConfig,
    pub game: Match,
    /// The value shown in the widget. Only `apply_effects` and match
    /// transitions replace it.
    pub pin_value: PinValue,
    pub pin_input: PinInputState,
    pub keypad: KeypadState,
    pub device_class: DeviceClass,
    pub status: Option<StatusMessage>,
    pub focus: Focus,
    container_focus: FocusFlag,
}

impl App {
    pub fn new(config: TuiConfig, preferences: Arc<UserPreferences>, width: u16) -> Result<Self> {
        let preferred_theme = config.theme.clone().or_else(|| preferences.preferred_theme());
        let loaded = theme::load(preferred_theme.as_deref());
        let game = start_match(&config)?;
        let pin_value = PinValue::empty(config.game.pin_length).context("invalid PIN length")?;
        let mut pin_input = PinInputState::new(config.completion, config.addressing);
        pin_input.sync(&pin_value);

        let mut app = Self {
            ctx: SharedCtx {
                theme: loaded.theme,
                active_theme_id: loaded.definition.id,
                preferences,
            },
            device_class: DeviceClass::resolve(config.layout, width, config.compact_width),
            config,
            game,
            pin_value,
            pin_input,
            keypad: KeypadState::default(),
            status: None,
            focus: Focus::default(),
            container_focus: FocusFlag::new().with_name("challenge"),
        };
        app.rebuild_focus();
        Ok(app)
    }

    /// Surface for the current device class.
    pub fn surface(&self) -> &'static dyn InputSurface {
        surface_for(self.device_class)
    }

    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick(elapsed_ms) => {
                if let Some(summary) = self.game.tick(Duration::from_millis(*elapsed_ms)) {
                    self.finish_round(&summary);
                }
            }
            Msg::Resize(width, _) => self.set_viewport_width(*width),
        }
        Vec::new()
    }

    /// Apply effects in the order they were produced.
    pub fn apply_effects(&mut self, effects: Vec<Effect>) -> ControlFlow<()> {
        for effect in effects {
            match effect {
                Effect::PinChanged(next) => self.set_pin_value(next),
                Effect::PinCompleted(value) => self.submit(&value),
                Effect::NewMatchRequested => self.new_match(),
                Effect::Quit => return ControlFlow::Break(()),
            }
        }
        ControlFlow::Continue(())
    }

    /// Whether the runtime must keep ticking to drive the round timer.
    pub fn timer_running(&self) -> bool {
        self.game.time_remaining().is_some()
    }

    pub fn set_viewport_width(&mut self, width: u16) {
        let class = DeviceClass::resolve(self.config.layout, width, self.config.compact_width);
        if class != self.device_class {
            info!(?class, width, "switching input surface");
            self.device_class = class;
            self.rebuild_focus();
        }
    }

    /// Rebuild the focus tree after the set of focusable regions changed.
    pub fn rebuild_focus(&mut self) {
        self.focus = FocusBuilder::build_for(&*self);
        self.focus.focus(&self.pin_input.focus);
    }

    /// Switch to the next theme in the catalog and remember it.
    pub fn cycle_theme(&mut self) {
        let next = catalog::next_after(self.ctx.active_theme_id);
        self.ctx.theme = next.build();
        self.ctx.active_theme_id = next.id;
        if let Err(error) = self.ctx.preferences.set_preferred_theme(Some(next.id.to_string())) {
            warn!(%error, "failed to persist theme preference");
        }
        self.status = Some(StatusMessage::new(Severity::Info, format!("Theme: {}", next.label)));
    }

    pub fn new_match(&mut self) {
        match start_match(&self.config) {
            Ok(game) => {
                self.game = game;
                self.reset_entry();
                self.status = Some(StatusMessage::new(Severity::Info, "New match started."));
            }
            Err(error) => {
                warn!(error = %format!("{error:#}"), "failed to start a new match");
                self.status = Some(StatusMessage::new(Severity::Error, format!("{error:#}")));
            }
        }
    }

    fn set_pin_value(&mut self, value: PinValue) {
        self.pin_value = value;
        self.pin_input.sync(&self.pin_value);
        self.pin_input.set_disabled(self.game.is_finished());
    }

    /// Clear the value for a fresh attempt with the cursor on the first slot.
    fn reset_entry(&mut self) {
        self.set_pin_value(self.pin_value.cleared());
        self.pin_input.focus_first(&self.pin_value);
    }

    fn submit(&mut self, value: &PinValue) {
        let Some(code) = value.code() else {
            return;
        };
        match self.game.submit_guess(&code) {
            Ok(outcome) => self.record_outcome(&outcome),
            Err(error) => {
                warn!(%error, "guess rejected");
                self.status = Some(StatusMessage::new(Severity::Error, error.to_string()));
            }
        }
        self.reset_entry();
    }

    fn record_outcome(&mut self, outcome: &GuessOutcome) {
        if let Some(summary) = &outcome.round_summary {
            self.finish_round(summary);
            return;
        }
        let text = match &outcome.hints {
            Some(hints) => {
                let exact = hints.iter().filter(|hint| **hint == Hint::Exact).count();
                let misplaced = hints.iter().filter(|hint| **hint == Hint::Misplaced).count();
                format!("Locked. {exact} in place, {misplaced} misplaced.")
            }
            None => "Locked. Try again.".to_string(),
        };
        self.status = Some(StatusMessage::new(Severity::Warning, text));
    }

    fn finish_round(&mut self, summary: &RoundSummary) {
        let mut text = match summary.result {
            RoundResult::Cracked { attempts } => format!(
                "Round {} cracked in {attempts} attempt{}!",
                summary.round,
                if attempts == 1 { "" } else { "s" }
            ),
            RoundResult::TimedOut => format!("Round {} timed out. The PIN was {}.", summary.round, summary.secret),
        };
        let severity = match summary.result {
            RoundResult::Cracked { .. } => Severity::Success,
            RoundResult::TimedOut => Severity::Error,
        };
        if self.game.is_finished() {
            text.push_str(&format!(
                " Match over: {}/{} cracked. Ctrl+N for a new match.",
                self.game.score(),
                self.game.config().rounds
            ));
        }
        self.status = Some(StatusMessage::new(severity, text));
        self.reset_entry();
    }
}

/// A fresh match using the configured secrets, or random ones.
fn start_match(config: &TuiConfig) -> Result<Match> {
    let game = match &config.secrets {
        Some(pins) => {
            let secrets = Secrets::new(&config.game, pins.clone()).context("invalid secrets")?;
            Match::new(config.game.clone(), secrets)?
        }
        None => Match::with_random_secrets(config.game.clone()).context("failed to draw secrets")?,
    };
    Ok(game)
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        builder.leaf_widget(&self.pin_input.focus);
        if self.device_class.is_compact() {
            builder.leaf_widget(&self.keypad.focus);
        }
        builder.end(start);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
impl App {
    /// An app with fixed secrets and an in-memory preferences store.
    pub(crate) fn for_tests(secrets: &[&str], width: u16) -> App {
        let config = TuiConfig {
            game: GameConfig {
                pin_length: secrets[0].len(),
                hints_enabled: true,
                timer_duration_secs: 0,
                rounds: secrets.len(),
            },
            secrets: Some(secrets.iter().map(|s| s.to_string()).collect()),
            ..TuiConfig::default()
        };
        App::new(config, Arc::new(UserPreferences::ephemeral()), width).expect("app")
    }
}
