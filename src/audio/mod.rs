// Audio playback module
// Uses Symphonia for decoding and cpal for output

pub mod asset;
pub mod decoder;
pub mod source;

#[cfg(feature = "playback")]
pub mod output;
#[cfg(feature = "playback")]
pub mod session;

pub use decoder::Tone;
pub use source::LoopingSource;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AudioError {
    /// The bundled tone is missing or cannot be decoded
    #[error("tone asset `{name}` unavailable: {reason}")]
    AssetUnavailable { name: String, reason: String },

    /// No output device or config could be set up for playback
    #[error("audio session activation failed: {0}")]
    SessionActivation(String),

    /// The output stream could not be built or started
    #[error("audio output failed: {0}")]
    Output(String),
}

impl AudioError {
    pub(crate) fn asset(name: &str, reason: impl Into<String>) -> Self {
        Self::AssetUnavailable {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
