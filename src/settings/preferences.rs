// Persisted user preferences
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Screen selected in the tab bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    Settings,
}

/// Everything that survives a relaunch.
///
/// Serialized with the same keys the front end uses: `tab`, `isPause`
/// and `volume`. Keys missing from the file take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub tab: Tab,
    pub is_pause: bool,
    pub volume: f64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            tab: Tab::Home,
            is_pause: false,
            volume: 1.0,
        }
    }
}

impl Preferences {
    /// Bring values read from disk back inside their valid ranges
    fn sanitized(mut self) -> Self {
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            Self::default().volume
        };
        self
    }
}

/// File-backed preferences with an in-memory copy.
///
/// Clones share the same cache, so the playback controller and the tab
/// commands can each hold one. Every `update` writes the whole file
/// before returning.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
    current: Arc<Mutex<Preferences>>,
}

impl PreferencesStore {
    pub fn settings_path(app_dir: &Path) -> PathBuf {
        app_dir.join(SETTINGS_FILE)
    }

    /// Read preferences from `app_dir`, or defaults if nothing was saved yet
    pub fn load(app_dir: &Path) -> Result<Self, SettingsError> {
        let path = Self::settings_path(app_dir);
        let prefs = Self::read(&path)?;
        Ok(Self::with_preferences(path, prefs))
    }

    /// Like `load`, but an unreadable file falls back to defaults.
    /// The broken file is left in place until the next write replaces it.
    pub fn load_or_default(app_dir: &Path) -> Self {
        let path = Self::settings_path(app_dir);
        let prefs = Self::read(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "{}, using defaults", e);
            Preferences::default()
        });
        Self::with_preferences(path, prefs)
    }

    fn with_preferences(path: PathBuf, prefs: Preferences) -> Self {
        Self {
            path,
            current: Arc::new(Mutex::new(prefs)),
        }
    }

    fn read(path: &Path) -> Result<Preferences, SettingsError> {
        if !path.exists() {
            tracing::info!("No settings file found, using defaults");
            return Ok(Preferences::default());
        }

        let content = fs::read_to_string(path)?;
        let prefs: Preferences = serde_json::from_str(&content)?;

        tracing::debug!(path = %path.display(), "Loaded settings");
        Ok(prefs.sanitized())
    }

    fn write(&self, prefs: &Preferences) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, content)?;

        tracing::debug!(path = %self.path.display(), "Saved settings");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current values
    pub fn snapshot(&self) -> Preferences {
        self.current.lock().clone()
    }

    /// Mutate the preferences and write them out.
    ///
    /// The in-memory copy keeps the new values even when the write fails.
    pub fn update<F>(&self, mutate: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut Preferences),
    {
        let mut current = self.current.lock();
        mutate(&mut *current);
        self.write(&*current)
    }

    pub fn selected_tab(&self) -> Tab {
        self.current.lock().tab
    }

    pub fn select_tab(&self, tab: Tab) -> Result<(), SettingsError> {
        self.update(|prefs| prefs.tab = tab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fresh_install_defaults() {
        let dir = tempdir().unwrap();
        let store = PreferencesStore::load(dir.path()).unwrap();

        let prefs = store.snapshot();
        assert_eq!(prefs.tab, Tab::Home);
        assert!(!prefs.is_pause);
        assert_eq!(prefs.volume, 1.0);
        // Nothing is written until something changes
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_uses_front_end_keys() {
        let dir = tempdir().unwrap();
        let store = PreferencesStore::load(dir.path()).unwrap();
        store
            .update(|p| {
                p.tab = Tab::Settings;
                p.is_pause = true;
                p.volume = 0.25;
            })
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["tab"], "settings");
        assert_eq!(raw["isPause"], true);
        assert_eq!(raw["volume"], 0.25);
    }

    #[test]
    fn test_values_survive_reload() {
        let dir = tempdir().unwrap();
        let store = PreferencesStore::load(dir.path()).unwrap();
        store.select_tab(Tab::Settings).unwrap();
        store.update(|p| p.volume = 0.3).unwrap();

        let reloaded = PreferencesStore::load(dir.path()).unwrap();
        assert_eq!(reloaded.selected_tab(), Tab::Settings);
        assert_eq!(reloaded.snapshot().volume, 0.3);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            PreferencesStore::settings_path(dir.path()),
            r#"{ "isPause": true }"#,
        )
        .unwrap();

        let prefs = PreferencesStore::load(dir.path()).unwrap().snapshot();
        assert!(prefs.is_pause);
        assert_eq!(prefs.tab, Tab::Home);
        assert_eq!(prefs.volume, 1.0);
    }

    #[test]
    fn test_out_of_range_volume_is_clamped_on_load() {
        let dir = tempdir().unwrap();
        fs::write(
            PreferencesStore::settings_path(dir.path()),
            r#"{ "volume": 4.5 }"#,
        )
        .unwrap();
        assert_eq!(PreferencesStore::load(dir.path()).unwrap().snapshot().volume, 1.0);

        fs::write(
            PreferencesStore::settings_path(dir.path()),
            r#"{ "volume": -0.5 }"#,
        )
        .unwrap();
        assert_eq!(PreferencesStore::load(dir.path()).unwrap().snapshot().volume, 0.0);
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        fs::write(PreferencesStore::settings_path(dir.path()), "not json").unwrap();

        assert!(matches!(
            PreferencesStore::load(dir.path()),
            Err(SettingsError::Parse(_))
        ));
        assert_eq!(
            PreferencesStore::load_or_default(dir.path()).snapshot(),
            Preferences::default()
        );
    }

    #[test]
    fn test_clones_share_values() {
        let dir = tempdir().unwrap();
        let store = PreferencesStore::load(dir.path()).unwrap();
        let other = store.clone();

        other.select_tab(Tab::Settings).unwrap();
        store.update(|p| p.is_pause = true).unwrap();

        let reloaded = PreferencesStore::load(dir.path()).unwrap().snapshot();
        assert_eq!(reloaded.tab, Tab::Settings);
        assert!(reloaded.is_pause);
    }

    #[test]
    fn test_creates_missing_app_dir() {
        let dir = tempdir().unwrap();
        let app_dir = dir.path().join("nested").join("app");
        let store = PreferencesStore::load(&app_dir).unwrap();

        store.select_tab(Tab::Settings).unwrap();
        assert!(store.path().exists());
    }
}
