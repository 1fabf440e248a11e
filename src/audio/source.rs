// Infinite-repeat reader over a decoded tone

use super::Tone;

/// Plays a `Tone` forever at any output sample rate.
///
/// The read position is fractional so the pitch does not shift when the
/// device runs at a different rate than the asset (a 44.1kHz tone on a
/// 48kHz device would otherwise sound at ~481Hz). Samples between two
/// frames are linearly interpolated, and the last frame interpolates
/// into the first so the loop has no seam.
#[derive(Debug, Clone)]
pub struct LoopingSource {
    tone: Tone,
    position: f64,
    step: f64,
}

impl LoopingSource {
    pub fn new(tone: Tone, output_rate: u32) -> Self {
        let step = tone.sample_rate() as f64 / output_rate.max(1) as f64;
        Self {
            tone,
            position: 0.0,
            step,
        }
    }

    /// Current read position in tone frames, always in `[0, frames)`
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Tone frames advanced per output frame
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Interpolated sample for one output channel at the current position.
    /// Output channels beyond the tone's channel count repeat its channels.
    pub fn sample(&self, output_channel: usize) -> f32 {
        let frames = self.tone.frames();
        let channel = output_channel % self.tone.channels();
        let index = self.position as usize;
        let frac = (self.position - index as f64) as f32;

        let current = self.tone.sample(index, channel);
        let next = self.tone.sample((index + 1) % frames, channel);
        current + (next - current) * frac
    }

    /// Move to the next output frame, wrapping back to the start
    pub fn advance(&mut self) {
        let frames = self.tone.frames() as f64;
        self.position += self.step;
        if self.position >= frames {
            self.position %= frames;
        }
    }

    /// Fill an interleaved buffer with `channels` channels, scaled by `gain`
    pub fn fill(&mut self, out: &mut [f32], channels: usize, gain: f32) {
        for frame in out.chunks_mut(channels.max(1)) {
            for (channel, sample) in frame.iter_mut().enumerate() {
                *sample = self.sample(channel) * gain;
            }
            self.advance();
        }
    }
}
