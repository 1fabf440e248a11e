// Seams between the playback controller and the audio device

use crate::audio::AudioError;

/// One looping tone owned by the controller
pub trait ToneSource {
    /// Resume a suspended tone
    fn play(&mut self);

    /// Suspend the tone without releasing it
    fn pause(&mut self);

    /// Change the gain immediately, no fade
    fn set_volume(&mut self, volume: f32);

    /// Whether the tone is currently producing audio
    fn is_producing(&self) -> bool;
}

/// Creates tone sources
pub trait AudioBackend {
    type Source: ToneSource;

    /// Load the tone and start it looping at `volume`
    fn open_tone(&mut self, volume: f32) -> Result<Self::Source, AudioError>;
}

#[cfg(feature = "playback")]
pub use device::{DeviceBackend, DeviceTone};

#[cfg(feature = "playback")]
mod device {
    use super::{AudioBackend, ToneSource};
    use crate::audio::asset::TONE_ASSET;
    use crate::audio::output::ToneOutput;
    use crate::audio::session::AudioSession;
    use crate::audio::{AudioError, Tone};

    /// Plays the bundled tone on the default output device
    pub struct DeviceBackend {
        session: Option<AudioSession>,
        asset: &'static str,
    }

    impl DeviceBackend {
        /// Activate the playback session. A failure is logged and leaves
        /// the backend unable to open tones, it is not retried.
        pub fn new() -> Self {
            let session = match AudioSession::activate() {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!("Failed to set up audio session: {}", e);
                    None
                }
            };
            Self {
                session,
                asset: TONE_ASSET,
            }
        }
    }

    impl Default for DeviceBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioBackend for DeviceBackend {
        type Source = DeviceTone;

        fn open_tone(&mut self, volume: f32) -> Result<DeviceTone, AudioError> {
            let tone = Tone::load(self.asset)?;
            let session = self
                .session
                .as_ref()
                .ok_or_else(|| AudioError::SessionActivation("no active audio session".into()))?;
            let output = ToneOutput::open(session, tone, volume)?;
            Ok(DeviceTone { output, paused: false })
        }
    }

    /// Tone playing through a `ToneOutput`
    pub struct DeviceTone {
        output: ToneOutput,
        paused: bool,
    }

    impl ToneSource for DeviceTone {
        fn play(&mut self) {
            self.paused = false;
            self.output.play();
        }

        fn pause(&mut self) {
            self.paused = true;
            self.output.pause();
        }

        fn set_volume(&mut self, volume: f32) {
            self.output.set_volume(volume);
        }

        fn is_producing(&self) -> bool {
            // Commands are applied asynchronously; report the requested state
            !self.paused
        }
    }

}
