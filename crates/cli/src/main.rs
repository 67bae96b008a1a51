use std::{fs::OpenOptions, path::Path, sync::Arc, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use lockpick_engine::GameConfig;
use lockpick_tui::{DEFAULT_COMPACT_WIDTH, TuiConfig};
use lockpick_types::{CompletionPolicy, KeypadAddressing, LayoutMode};
use lockpick_util::{PreferencesPayload, UserPreferences, default_log_path};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Crack a series of numeric PINs from the terminal.
///
/// Flags override the values saved in the preferences file.
#[derive(Debug, Parser)]
#[command(name = "lockpick", version, about)]
struct Args {
    /// Digits per PIN.
    #[arg(long, value_name = "N")]
    length: Option<usize>,

    /// Rounds in a match.
    #[arg(long)]
    rounds: Option<usize>,

    /// Round time limit in seconds; 0 disables the timer.
    #[arg(long, value_name = "SECS")]
    timer: Option<u64>,

    /// Do not report per-digit hints after a guess.
    #[arg(long)]
    no_hints: bool,

    /// Fixed secret for a round; repeat once per round.
    #[arg(long = "secret", value_name = "PIN")]
    secrets: Vec<String>,

    /// When an entry is reported: `confirm` or `last-digit`.
    #[arg(long)]
    completion: Option<CompletionPolicy>,

    /// Where keypad digits land: `active-slot` or `sequential`.
    #[arg(long)]
    addressing: Option<KeypadAddressing>,

    /// Input surface: `auto`, `keyboard` or `touch`.
    #[arg(long)]
    layout: Option<LayoutMode>,

    /// Terminal width below which `auto` picks the touch surface.
    #[arg(long, value_name = "COLUMNS")]
    compact_width: Option<u16>,

    /// Theme name (slate, dracula, ansi256).
    #[arg(long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&default_log_path());

    let preferences = match UserPreferences::new() {
        Ok(preferences) => preferences,
        Err(error) => {
            warn!(%error, "failed to load preferences; continuing with defaults");
            UserPreferences::ephemeral()
        }
    };
    let config = build_config(&args, &preferences.snapshot());
    info!(
        pin_length = config.game.pin_length,
        rounds = config.game.rounds,
        timer = config.game.timer_duration_secs,
        fixed_secrets = config.secrets.is_some(),
        "starting lockpick"
    );

    lockpick_tui::run(config, Arc::new(preferences)).await
}

/// Log to a file; the terminal belongs to the TUI.
fn init_tracing(log_path: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file = log_path
        .parent()
        .map(std::fs::create_dir_all)
        .transpose()
        .and_then(|_| OpenOptions::new().create(true).append(true).open(log_path))
        .with_context(|| format!("failed to open log file {}", log_path.display()));
    match file {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        Err(error) => eprintln!("logging disabled: {error:#}"),
    }
}

/// Merge defaults, saved preferences and flags, in increasing priority.
fn build_config(args: &Args, saved: &PreferencesPayload) -> TuiConfig {
    let defaults = GameConfig::default();
    let secrets = (!args.secrets.is_empty()).then(|| args.secrets.clone());

    // Fixed secrets imply the PIN length and round count unless given.
    let pin_length = args
        .length
        .or_else(|| secrets.as_ref().and_then(|pins| pins.first()).map(|pin| pin.chars().count()))
        .or(saved.pin_length)
        .unwrap_or(defaults.pin_length);
    let rounds = args
        .rounds
        .or_else(|| secrets.as_ref().map(Vec::len))
        .or(saved.rounds)
        .unwrap_or(defaults.rounds);
    let hints_enabled = if args.no_hints {
        false
    } else {
        saved.hints_enabled.unwrap_or(defaults.hints_enabled)
    };

    TuiConfig {
        game: GameConfig {
            pin_length,
            hints_enabled,
            timer_duration_secs: args
                .timer
                .or(saved.timer_duration_secs)
                .unwrap_or(defaults.timer_duration_secs),
            rounds,
        },
        secrets,
        completion: args.completion.or(saved.completion).unwrap_or_default(),
        addressing: args.addressing.or(saved.keypad_addressing).unwrap_or_default(),
        layout: args.layout.or(saved.layout).unwrap_or_default(),
        compact_width: args.compact_width.or(saved.compact_width).unwrap_or(DEFAULT_COMPACT_WIDTH),
        theme: args.theme.clone(),
    }
}
