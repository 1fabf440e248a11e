// Tone decoder using Symphonia
// Decodes a bundled asset to interleaved f32 PCM held in memory

use std::io::Cursor;
use std::sync::Arc;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::asset;
use super::AudioError;

/// A fully decoded clip, small enough to keep in memory and loop
#[derive(Debug, Clone)]
pub struct Tone {
    samples: Arc<[f32]>,
    sample_rate: u32,
    channels: usize,
}

impl Tone {
    /// Decode the bundled asset called `name`
    pub fn load(name: &str) -> Result<Self, AudioError> {
        let bytes = asset::bundled(name)
            .ok_or_else(|| AudioError::asset(name, "not bundled"))?;
        Self::decode(name, bytes, asset::TONE_EXTENSION)
    }

    /// Decode an in-memory file. `name` only labels errors.
    pub fn decode(name: &str, bytes: &'static [u8], extension: &str) -> Result<Self, AudioError> {
        let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

        let mut hint = Hint::new();
        hint.with_extension(extension);

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| AudioError::asset(name, format!("failed to probe format: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::asset(name, "no audio track found"))?;

        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| AudioError::asset(name, "unknown sample rate"))?;
        let channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(1);
        if channels == 0 {
            return Err(AudioError::asset(name, "no channels"));
        }

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::asset(name, format!("failed to create decoder: {}", e)))?;

        let mut samples = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                Err(e) => {
                    return Err(AudioError::asset(name, format!("failed to read packet: {}", e)))
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
                    buf.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buf.samples());
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    tracing::warn!(asset = name, "Decode error (skipping packet): {}", e);
                }
                Err(e) => return Err(AudioError::asset(name, format!("decode failed: {}", e))),
            }
        }

        if samples.len() < channels {
            return Err(AudioError::asset(name, "no audio frames"));
        }
        // Drop a trailing partial frame so every frame has all channels
        samples.truncate(samples.len() - samples.len() % channels);

        tracing::debug!(
            asset = name,
            sample_rate,
            channels,
            frames = samples.len() / channels,
            "Decoded tone"
        );

        Ok(Self {
            samples: samples.into(),
            sample_rate,
            channels,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of frames (one sample per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample of `channel` at `frame`
    pub fn sample(&self, frame: usize, channel: usize) -> f32 {
        self.samples[frame * self.channels + channel]
    }

    #[cfg(test)]
    pub(crate) fn from_samples(samples: Vec<f32>, sample_rate: u32, channels: usize) -> Self {
        Self {
            samples: samples.into(),
            sample_rate,
            channels,
        }
    }
}
