//! UI rendering and input handling for the TUI application.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
pub mod viewport;
