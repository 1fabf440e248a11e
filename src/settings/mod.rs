// Settings module
// Preferences persisted in the app data directory

pub mod preferences;

pub use preferences::{Preferences, PreferencesStore, SettingsError, Tab};
