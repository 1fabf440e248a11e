// Audio output using cpal
// The stream lives on its own thread; this handle drives it over a channel

use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use parking_lot::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::session::AudioSession;
use super::{AudioError, LoopingSource, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputCommand {
    Play,
    Pause,
}

/// A looping tone playing on the session's output device.
///
/// cpal streams cannot move between threads, so a `tone-output` thread
/// builds and owns the stream. Dropping the handle stops the stream and
/// joins that thread.
pub struct ToneOutput {
    commands: Option<Sender<OutputCommand>>,
    thread: Option<JoinHandle<()>>,
    volume: Arc<Mutex<f32>>,
}

impl ToneOutput {
    /// Build the stream and start playing `tone` at `volume`.
    /// Returns once the stream is running, or with the reason it could not start.
    pub fn open(session: &AudioSession, tone: Tone, volume: f32) -> Result<Self, AudioError> {
        let volume = Arc::new(Mutex::new(volume.clamp(0.0, 1.0)));

        let (commands, command_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);

        let session = session.clone();
        let thread_volume = volume.clone();

        let thread = thread::Builder::new()
            .name("tone-output".into())
            .spawn(move || {
                let stream = match Self::start_stream(&session, tone, thread_volume) {
                    Ok(stream) => stream,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));

                Self::run(stream, command_rx);
            })
            .map_err(|e| AudioError::Output(format!("failed to spawn output thread: {}", e)))?;

        let ready = ready_rx
            .recv()
            .unwrap_or_else(|_| Err(AudioError::Output("output thread exited".into())));

        if let Err(e) = ready {
            let _ = thread.join();
            return Err(e);
        }

        Ok(Self {
            commands: Some(commands),
            thread: Some(thread),
            volume,
        })
    }

    fn start_stream(
        session: &AudioSession,
        tone: Tone,
        volume: Arc<Mutex<f32>>,
    ) -> Result<Stream, AudioError> {
        let device = session.device()?;
        let supported = session.config();
        let config: StreamConfig = supported.clone().into();
        let source = LoopingSource::new(tone, config.sample_rate.0);

        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, source, volume)?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, source, volume)?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, source, volume)?,
            format => {
                return Err(AudioError::Output(format!(
                    "unsupported sample format: {:?}",
                    format
                )))
            }
        };

        stream
            .play()
            .map_err(|e| AudioError::Output(format!("failed to start stream: {}", e)))?;

        tracing::debug!(sample_rate = config.sample_rate.0, "Tone stream started");
        Ok(stream)
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &StreamConfig,
        mut source: LoopingSource,
        volume: Arc<Mutex<f32>>,
    ) -> Result<Stream, AudioError> {
        let channels = config.channels as usize;
        let mut scratch: Vec<f32> = vec![0.0; 4096];

        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    if scratch.len() < data.len() {
                        scratch.resize(data.len(), 0.0);
                    }
                    let buffer = &mut scratch[..data.len()];
                    source.fill(buffer, channels, *volume.lock());

                    for (out, &sample) in data.iter_mut().zip(buffer.iter()) {
                        *out = T::from_sample(sample);
                    }
                },
                |err| tracing::error!("Audio output error: {}", err),
                None,
            )
            .map_err(|e| AudioError::Output(format!("failed to build output stream: {}", e)))
    }

    /// Apply play/pause commands until the handle is dropped
    fn run(stream: Stream, commands: Receiver<OutputCommand>) {
        while let Ok(command) = commands.recv() {
            let result = match command {
                OutputCommand::Play => stream.play().map_err(|e| e.to_string()),
                OutputCommand::Pause => stream.pause().map_err(|e| e.to_string()),
            };
            if let Err(e) = result {
                tracing::warn!(?command, "Tone stream command failed: {}", e);
            }
        }

        tracing::debug!("Tone output thread exiting");
    }

    fn send(&self, command: OutputCommand) {
        let Some(ref tx) = self.commands else {
            return;
        };
        if tx.send(command).is_err() {
            tracing::warn!(?command, "Tone output thread is gone");
        }
    }

    pub fn play(&self) {
        self.send(OutputCommand::Play);
    }

    pub fn pause(&self) {
        self.send(OutputCommand::Pause);
    }

    /// Set the output volume (0.0 to 1.0), effective from the next callback
    pub fn set_volume(&self, vol: f32) {
        *self.volume.lock() = vol.clamp(0.0, 1.0);
    }
}

impl Drop for ToneOutput {
    fn drop(&mut self) {
        // Closing the channel ends the thread's command loop
        drop(self.commands.take());

        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
