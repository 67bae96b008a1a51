//! Configuration and filesystem helpers shared by the Lockpick binaries.

pub mod path_processing;
pub mod preferences;

pub use path_processing::*;
pub use preferences::{PREFERENCES_PATH_ENV, PreferencesError, PreferencesPayload, UserPreferences};
