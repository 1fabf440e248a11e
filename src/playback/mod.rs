// Playback module
// Pause/volume state machine driving the looping tone

pub mod backend;
pub mod controller;

pub use backend::{AudioBackend, ToneSource};
#[cfg(feature = "playback")]
pub use backend::{DeviceBackend, DeviceTone};
pub use controller::{PlaybackController, PlaybackSnapshot};
