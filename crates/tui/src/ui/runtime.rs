//! Runtime: event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode, mouse capture).
//! - Forward terminal input from a dedicated thread over a channel.
//! - Route events to `MainView` and apply the returned `Effect`s in order.
//! - Render only after something visible changed.
//!
//! Ticking
//! - Fast interval (250 ms) while a round timer is running so the countdown
//!   stays current; slow interval (5 s) otherwise.
//! - Each tick carries the wall-clock time elapsed since the previous one.
use std::{
    ops::ControlFlow,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lockpick_types::{Effect, Msg};
use lockpick_util::UserPreferences;
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::app::{App, TuiConfig};
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;

const FAST_TICK: Duration = Duration::from_millis(250);
const IDLE_TICK: Duration = Duration::from_millis(5000);

/// Tick cadence plus the wall-clock measurement each tick reports.
#[derive(Debug)]
struct TickClock {
    interval: Duration,
    last_tick: Instant,
}

impl TickClock {
    fn new(now: Instant) -> Self {
        Self {
            interval: IDLE_TICK,
            last_tick: now,
        }
    }

    /// Pick the cadence for the timer state. Returns `true` when it changed
    /// and the ticker must be rebuilt; the measurement restarts at `now` so a
    /// newly started round is not charged for idle time.
    fn retarget(&mut self, timer_running: bool, now: Instant) -> bool {
        let target = if timer_running { FAST_TICK } else { IDLE_TICK };
        if target == self.interval {
            return false;
        }
        self.interval = target;
        self.last_tick = now;
        true
    }

    /// Milliseconds since the previous tick (or restart).
    fn tick(&mut self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);

    std::thread::spawn(move || {
        let poll_interval = Duration::from_millis(50);
        loop {
            match event::poll(poll_interval) {
                Ok(false) => {
                    if sender.is_closed() {
                        break;
                    }
                }
                Ok(true) => match event::read() {
                    Ok(event) => {
                        // Mouse moves are never routed.
                        if event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved) {
                            continue;
                        }
                        if let Err(e) = sender.blocking_send(event) {
                            debug!("input channel closed: {}", e);
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read event: {}", e);
                        break;
                    }
                },
                Err(e) => {
                    warn!("Failed to poll events: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

/// Route one terminal event. Key releases and repeats reported by some
/// terminals are dropped so every physical press counts once.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => main_view.handle_key_events(app, key_event),
        Event::Key(_) => Vec::new(),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop and restores the terminal on exit.
pub async fn run_app(config: TuiConfig, preferences: Arc<UserPreferences>) -> Result<()> {
    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut app = App::new(config, preferences, width)?;
    let mut main_view = MainView::default();

    let mut input_receiver = spawn_input_thread();
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &mut main_view, &mut input_receiver, (width, height)).await;
    cleanup_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    main_view: &mut MainView,
    input_receiver: &mut mpsc::Receiver<Event>,
    initial_size: (u16, u16),
) -> Result<()> {
    let mut clock = TickClock::new(Instant::now());
    let mut ticker = time::interval(clock.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(terminal, app, main_view)?;

    // Track the last known terminal size to synthesize Resize messages when
    // a terminal fails to emit them.
    let mut last_size = Some(initial_size);

    loop {
        if clock.retarget(app.timer_running(), Instant::now()) {
            ticker = time::interval(clock.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut effects = Vec::new();
        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    info!("input channel closed; shutting down");
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
                        break;
                    }
                effects = handle_input_event(app, main_view, event);
                needs_render = true;
            }

            _ = ticker.tick() => {
                let elapsed_ms = clock.tick(Instant::now());
                let timer_visible = app.timer_running();
                effects = main_view.handle_message(app, Msg::Tick(elapsed_ms));
                needs_render = timer_visible || !effects.is_empty();
            }

            _ = signal::ctrl_c() => { break; }
        }

        if app.apply_effects(effects) == ControlFlow::Break(()) {
            break;
        }

        // Fallback: detect terminal size changes even if no explicit Resize
        // event was received.
        let mut resized = false;
        if let Ok((w, h)) = crossterm::terminal::size()
            && last_size != Some((w, h))
        {
            last_size = Some((w, h));
            let effects = main_view.handle_message(app, Msg::Resize(w, h));
            resized = true;
            if app.apply_effects(effects) == ControlFlow::Break(()) {
                break;
            }
        }

        if needs_render || resized {
            render(terminal, app, main_view)?;
        }
    }

    Ok(())
}
