// Preferences carried across simulated app launches

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tempfile::{tempdir, TempDir};
use tunera_lib::audio::AudioError;
use tunera_lib::playback::{AudioBackend, PlaybackController, ToneSource};
use tunera_lib::settings::{PreferencesStore, Tab};

struct RecordingTone {
    playing: bool,
    gain: f32,
}

impl ToneSource for RecordingTone {
    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.gain = volume;
    }

    fn is_producing(&self) -> bool {
        self.playing
    }
}

/// Counts tones opened across every launch sharing the counter
#[derive(Clone, Default)]
struct RecordingBackend {
    opened: Arc<AtomicUsize>,
}

impl AudioBackend for RecordingBackend {
    type Source = RecordingTone;

    fn open_tone(&mut self, volume: f32) -> Result<RecordingTone, AudioError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(RecordingTone {
            playing: true,
            gain: volume,
        })
    }
}

fn launch(dir: &TempDir, backend: &RecordingBackend) -> PlaybackController<RecordingBackend> {
    let store = PreferencesStore::load(dir.path()).unwrap();
    PlaybackController::new(backend.clone(), store)
}

#[test]
fn fresh_install_starts_playing() {
    let dir = tempdir().unwrap();
    let backend = RecordingBackend::default();

    let prefs = PreferencesStore::load(dir.path()).unwrap().snapshot();
    assert_eq!(prefs.tab, Tab::Home);
    assert!(!prefs.is_pause);
    assert_eq!(prefs.volume, 1.0);

    let mut app = launch(&dir, &backend);
    app.on_appear();

    assert!(!app.is_paused());
    assert!(app.source().unwrap().is_producing());
    assert_eq!(backend.opened.load(Ordering::SeqCst), 1);
}

#[test]
fn volume_survives_relaunch() {
    let dir = tempdir().unwrap();
    let backend = RecordingBackend::default();

    let mut first = launch(&dir, &backend);
    first.set_volume(0.3);
    drop(first);

    let mut second = launch(&dir, &backend);
    assert_eq!(second.volume(), 0.3);
    assert_eq!(second.store().snapshot().volume, 0.3);

    second.start();
    assert_eq!(second.source().unwrap().gain, 0.3);
}

#[test]
fn pause_survives_relaunch() {
    let dir = tempdir().unwrap();
    let backend = RecordingBackend::default();

    let mut first = launch(&dir, &backend);
    first.on_appear();
    first.toggle_pause();
    drop(first);

    let mut second = launch(&dir, &backend);
    second.on_appear();

    assert!(second.is_paused());
    assert!(second.source().is_none());
    // Only the first launch ever opened a tone
    assert_eq!(backend.opened.load(Ordering::SeqCst), 1);
}

#[test]
fn resume_after_paused_relaunch() {
    let dir = tempdir().unwrap();
    let backend = RecordingBackend::default();

    let mut first = launch(&dir, &backend);
    first.toggle_pause();
    drop(first);

    let mut second = launch(&dir, &backend);
    second.on_appear();
    second.toggle_pause();
    drop(second);

    let third = launch(&dir, &backend);
    assert!(!third.is_paused());
}

#[test]
fn selected_tab_survives_relaunch() {
    let dir = tempdir().unwrap();
    let backend = RecordingBackend::default();

    let mut first = launch(&dir, &backend);
    first.store().select_tab(Tab::Settings).unwrap();
    first.set_volume(0.8);
    drop(first);

    let second = launch(&dir, &backend);
    assert_eq!(second.store().selected_tab(), Tab::Settings);
    assert_eq!(second.volume(), 0.8);
}

#[test]
fn launch_on_settings_tab_waits_for_home() {
    let dir = tempdir().unwrap();
    let backend = RecordingBackend::default();

    let mut first = launch(&dir, &backend);
    first.store().select_tab(Tab::Settings).unwrap();
    drop(first);

    // Settings is showing: nothing plays until home appears
    let mut second = launch(&dir, &backend);
    assert_eq!(second.store().selected_tab(), Tab::Settings);
    assert!(second.source().is_none());
    assert!(!second.snapshot().is_producing);
    assert_eq!(backend.opened.load(Ordering::SeqCst), 0);

    // Switching to home, away, and back again keeps a single tone
    second.store().select_tab(Tab::Home).unwrap();
    second.on_appear();
    second.store().select_tab(Tab::Settings).unwrap();
    second.store().select_tab(Tab::Home).unwrap();
    second.on_appear();

    assert!(second.source().unwrap().is_producing());
    assert_eq!(backend.opened.load(Ordering::SeqCst), 1);
}
