// Playback controller: pause/volume state, its persistence, and the tone source

use serde::Serialize;

use super::backend::{AudioBackend, ToneSource};
use crate::settings::PreferencesStore;

/// What the front end needs to draw the home screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub is_paused: bool,
    pub volume: f64,
    pub has_source: bool,
    pub is_producing: bool,
}

/// Single owner of the pause/volume state and the looping tone.
///
/// `is_paused` and `volume` are read from the preferences at
/// construction and written back synchronously on every change. Audio
/// failures never reach the caller: they are logged and the logical
/// state carries on without a source.
pub struct PlaybackController<B: AudioBackend> {
    backend: B,
    store: PreferencesStore,
    is_paused: bool,
    volume: f64,
    source: Option<B::Source>,
}

impl<B: AudioBackend> PlaybackController<B> {
    pub fn new(backend: B, store: PreferencesStore) -> Self {
        let prefs = store.snapshot();
        tracing::info!(
            is_paused = prefs.is_pause,
            volume = prefs.volume,
            "Playback state restored"
        );
        Self {
            backend,
            store,
            is_paused: prefs.is_pause,
            volume: prefs.volume,
            source: None,
        }
    }

    /// Start the tone looping at the current volume.
    ///
    /// The source is created on first use and reused afterwards, so there
    /// is never more than one.
    pub fn start(&mut self) {
        self.set_paused(false);

        if let Some(source) = self.source.as_mut() {
            source.set_volume(self.volume as f32);
            source.play();
            return;
        }

        match self.backend.open_tone(self.volume as f32) {
            Ok(source) => {
                tracing::info!(volume = self.volume, "Tone started");
                self.source = Some(source);
            }
            Err(e) => {
                tracing::warn!("Failed to start tone: {}", e);
            }
        }
    }

    /// Flip between playing and paused
    pub fn toggle_pause(&mut self) {
        if self.is_paused {
            // start() resumes the existing source or creates the first one
            self.start();
        } else {
            self.set_paused(true);
            if let Some(source) = self.source.as_mut() {
                source.pause();
            }
            tracing::info!("Tone paused");
        }
    }

    /// Change the gain, clamped to [0, 1]. Non-finite values are ignored.
    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            tracing::warn!(volume, "Ignoring non-finite volume");
            return;
        }

        let volume = volume.clamp(0.0, 1.0);
        self.volume = volume;
        if let Err(e) = self.store.update(|prefs| prefs.volume = volume) {
            tracing::warn!("Failed to save volume: {}", e);
        }

        if let Some(source) = self.source.as_mut() {
            source.set_volume(volume as f32);
        }
    }

    /// The home screen became visible. Plays unless the user left it paused.
    pub fn on_appear(&mut self) {
        if self.is_paused {
            tracing::debug!("Home appeared while paused, staying silent");
            return;
        }
        self.start();
    }

    fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
        if let Err(e) = self.store.update(|prefs| prefs.is_pause = paused) {
            tracing::warn!("Failed to save pause state: {}", e);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn source(&self) -> Option<&B::Source> {
        self.source.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn store(&self) -> &PreferencesStore {
        &self.store
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            is_paused: self.is_paused,
            volume: self.volume,
            has_source: self.source.is_some(),
            is_producing: self.source.as_ref().is_some_and(|s| s.is_producing()),
        }
    }
}
