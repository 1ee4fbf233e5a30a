// SPDX-License-Identifier: MPL-2.0
//! Audio output through the default cpal device.

use super::audio::AudioOutputConfig;
use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Interleaved f32 samples normalized to [-1.0, 1.0].
pub type AudioSamples = Arc<Vec<f32>>;

#[derive(Debug)]
pub enum AudioOutputCommand {
    /// Queue samples for playback.
    Play(AudioSamples),
    Pause,
    Resume,
    /// Pause and drop queued samples.
    Stop,
    /// Drop queued samples without changing the pause state.
    ClearBuffer,
    SetVolume(f32),
    SetMuted(bool),
}

/// State read by the realtime audio callback.
struct SharedState {
    /// f32 bits, for lock-free access from the callback.
    volume_bits: AtomicU32,
    muted: AtomicBool,
    paused: AtomicBool,
}

impl SharedState {
    fn new(initial_volume: f32, muted: bool) -> Self {
        Self {
            volume_bits: AtomicU32::new(initial_volume.to_bits()),
            muted: AtomicBool::new(muted),
            paused: AtomicBool::new(false),
        }
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    fn set_volume(&self, volume: f32) {
        self.volume_bits
            .store(volume.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }
}

/// Appends as many samples as fit below `max_len`. Overflow is dropped.
fn push_bounded(buffer: &mut Vec<f32>, samples: &[f32], max_len: usize) {
    let available = max_len.saturating_sub(buffer.len());
    let take = available.min(samples.len());
    buffer.extend_from_slice(&samples[..take]);
}

/// Output stream on the system's default audio device.
pub struct AudioOutput {
    command_tx: mpsc::UnboundedSender<AudioOutputCommand>,
    shared_state: Arc<SharedState>,
    config: AudioOutputConfig,
    /// Kept alive for the lifetime of the output.
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Opens the default output device and starts a silent stream.
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no output device, its configuration
    /// cannot be read, or the stream fails to start.
    pub fn new(initial_volume: f32, muted: bool) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("no audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Audio(format!("failed to get audio config: {e}")))?;

        let config = AudioOutputConfig {
            sample_rate: supported_config.sample_rate().0,
            channels: supported_config.channels(),
        };

        let shared_state = Arc::new(SharedState::new(initial_volume.clamp(0.0, 1.0), muted));
        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<AudioOutputCommand>();

        // About one second of audio
        let max_buffer_size = config.sample_rate as usize * config.channels as usize;
        let buffer: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::with_capacity(max_buffer_size)));

        let buffer_for_task = Arc::clone(&buffer);
        let shared_for_task = Arc::clone(&shared_state);
        tokio::spawn(async move {
            while let Some(cmd) = command_rx.recv().await {
                match cmd {
                    AudioOutputCommand::Play(samples) => {
                        if let Ok(mut buf) = buffer_for_task.lock() {
                            push_bounded(&mut buf, &samples, max_buffer_size);
                        }
                    }
                    AudioOutputCommand::Pause => shared_for_task.set_paused(true),
                    AudioOutputCommand::Resume => shared_for_task.set_paused(false),
                    AudioOutputCommand::Stop => {
                        if let Ok(mut buf) = buffer_for_task.lock() {
                            buf.clear();
                        }
                        shared_for_task.set_paused(true);
                    }
                    AudioOutputCommand::ClearBuffer => {
                        if let Ok(mut buf) = buffer_for_task.lock() {
                            buf.clear();
                        }
                    }
                    AudioOutputCommand::SetVolume(volume) => shared_for_task.set_volume(volume),
                    AudioOutputCommand::SetMuted(muted) => shared_for_task.set_muted(muted),
                }
            }
        });

        let stream_config: cpal::StreamConfig = supported_config.config();
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &stream_config,
                Arc::clone(&buffer),
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &stream_config,
                Arc::clone(&buffer),
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &stream_config,
                Arc::clone(&buffer),
                Arc::clone(&shared_state),
            )?,
            other => {
                return Err(Error::Audio(format!(
                    "unsupported audio sample format: {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| Error::Audio(format!("failed to start audio stream: {e}")))?;

        tracing::debug!(
            sample_rate = config.sample_rate,
            channels = config.channels,
            "audio output started"
        );

        Ok(Self {
            command_tx,
            shared_state,
            config,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        buffer: Arc<Mutex<Vec<f32>>>,
        shared_state: Arc<SharedState>,
    ) -> Result<cpal::Stream> {
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let silence = T::from_sample(0.0f32);
                    if shared_state.is_paused() {
                        data.fill(silence);
                        return;
                    }

                    let Ok(mut buf) = buffer.lock() else {
                        data.fill(silence);
                        return;
                    };

                    // Muted output still drains the queue so playback keeps its pace
                    let gain = if shared_state.is_muted() {
                        0.0
                    } else {
                        let volume = shared_state.volume();
                        volume * volume
                    };

                    for (i, sample) in data.iter_mut().enumerate() {
                        *sample = match buf.get(i) {
                            // i16 conversion overflows at exactly 1.0
                            Some(value) => T::from_sample((value * gain).clamp(-1.0, 0.999_999_9)),
                            None => silence,
                        };
                    }

                    let consumed = data.len().min(buf.len());
                    buf.drain(..consumed);
                },
                |err| {
                    tracing::warn!(error = %err, "audio output error");
                },
                None,
            )
            .map_err(|e| Error::Audio(format!("failed to build audio stream: {e}")))
    }

    pub fn send_command(&self, command: AudioOutputCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Audio("audio output channel closed".into()))
    }

    pub fn play(&self, samples: AudioSamples) -> Result<()> {
        self.send_command(AudioOutputCommand::Play(samples))
    }

    pub fn pause(&self) -> Result<()> {
        self.send_command(AudioOutputCommand::Pause)
    }

    pub fn resume(&self) -> Result<()> {
        self.send_command(AudioOutputCommand::Resume)
    }

    pub fn stop(&self) -> Result<()> {
        self.send_command(AudioOutputCommand::Stop)
    }

    pub fn clear_buffer(&self) -> Result<()> {
        self.send_command(AudioOutputCommand::ClearBuffer)
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        self.send_command(AudioOutputCommand::SetVolume(volume))
    }

    pub fn set_muted(&self, muted: bool) -> Result<()> {
        self.send_command(AudioOutputCommand::SetMuted(muted))
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.shared_state.volume()
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.shared_state.is_muted()
    }

    /// Format the decoders must resample to.
    #[must_use]
    pub fn config(&self) -> AudioOutputConfig {
        self.config
    }
}
