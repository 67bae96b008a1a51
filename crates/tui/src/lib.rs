//! # Lockpick TUI
//!
//! A terminal front end for the PIN-cracking challenge. The screen hosts a
//! numeric PIN-entry widget that adapts to the terminal: separate digit slots
//! driven by the physical keyboard on wide terminals, and tap-target slots with
//! an on-screen keypad on narrow ones.
//!
//! ## Architecture
//!
//! `App` owns the PIN value and the running match. Components are controlled:
//! they receive the current value, handle input, and report the next value as
//! effects which the app adopts before anything else happens.

mod app;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use lockpick_util::UserPreferences;

pub use app::TuiConfig;
pub use ui::viewport::{DEFAULT_COMPACT_WIDTH, DeviceClass};

/// Runs the TUI until the user quits.
///
/// # Errors
///
/// Terminal setup failures and invalid game settings (for example fixed
/// secrets that do not match the configured PIN length).
pub async fn run(config: TuiConfig, preferences: Arc<UserPreferences>) -> Result<()> {
    ui::runtime::run_app(config, preferences).await
}
