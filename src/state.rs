// Application state management
use parking_lot::Mutex;
use std::path::Path;

use crate::playback::{DeviceBackend, PlaybackController};
use crate::settings::PreferencesStore;

pub struct AppState {
    pub controller: Mutex<PlaybackController<DeviceBackend>>,
    pub preferences: PreferencesStore,
}

impl AppState {
    pub fn new(app_dir: &Path) -> Self {
        let preferences = PreferencesStore::load_or_default(app_dir);
        // Activates the audio session, once per launch
        let backend = DeviceBackend::new();
        let controller = PlaybackController::new(backend, preferences.clone());

        Self {
            controller: Mutex::new(controller),
            preferences,
        }
    }
}
