// SPDX-License-Identifier: MPL-2.0
//! Audio decoding with FFmpeg, resampled for the output device.
//!
//! Used for music files and for the soundtrack of videos.

use super::decoder::{pace, seek_timestamp, DecoderCommand};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Audio is queued this far ahead of its timestamp to avoid underruns.
const AUDIO_LOOKAHEAD_SECS: f64 = 0.2;

/// Sample rate and channel count the decoder must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioOutputConfig {
    pub sample_rate: u32,
    pub channels: u16,
}

/// Decoded interleaved samples, normalized to [-1.0, 1.0].
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub samples: Arc<Vec<f32>>,
    pub pts_secs: f64,
}

#[derive(Debug, Clone)]
pub enum AudioDecoderEvent {
    BufferReady(DecodedAudio),
    EndOfStream,
    Error(String),
}

#[derive(Debug, Default)]
struct AudioDecoderState {
    is_playing: bool,
    playback_start_time: Option<Instant>,
    first_pts: Option<f64>,
}

impl AudioDecoderState {
    fn reset_timing(&mut self) {
        self.playback_start_time = Some(Instant::now());
        self.first_pts = None;
    }
}

/// Applies one command. Returns `false` when the loop must exit.
fn handle_audio_command(
    command: DecoderCommand,
    state: &mut AudioDecoderState,
    ictx: &mut ffmpeg_next::format::context::Input,
    decoder: &mut ffmpeg_next::decoder::Audio,
    event_tx: &mpsc::Sender<AudioDecoderEvent>,
) -> bool {
    match command {
        DecoderCommand::Play => {
            state.is_playing = true;
            state.reset_timing();
        }
        DecoderCommand::Pause => {
            state.is_playing = false;
            state.playback_start_time = None;
            state.first_pts = None;
        }
        DecoderCommand::Seek { target_secs } => {
            let timestamp = seek_timestamp(target_secs);
            if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                let _ = event_tx
                    .blocking_send(AudioDecoderEvent::Error(format!("audio seek failed: {e}")));
            } else {
                decoder.flush();
                state.reset_timing();
            }
        }
        DecoderCommand::Stop => return false,
    }
    true
}

/// Async audio decoder running on a blocking thread.
pub struct AudioDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    event_rx: mpsc::Receiver<AudioDecoderEvent>,
}

impl AudioDecoder {
    /// Spawns a decoder for the best audio stream of `path`.
    ///
    /// Returns `Ok(None)` if the file has no audio stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn new<P: AsRef<Path>>(path: P, output_config: AudioOutputConfig) -> Result<Option<Self>> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::Audio(format!(
                "file not found: {}",
                path.display()
            )));
        }

        if !has_audio_stream(&path)? {
            return Ok(None);
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(4);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = decoder_loop(&path, command_rx, &event_tx, output_config) {
                tracing::warn!(path = %path.display(), error = %e, "audio decoder failed");
                let _ = event_tx.blocking_send(AudioDecoderEvent::Error(e.detail()));
            }
        });

        Ok(Some(Self {
            command_tx,
            event_rx,
        }))
    }

    pub fn send_command(&self, command: DecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Audio("audio decoder is not running".into()))
    }

    pub async fn recv_event(&mut self) -> Option<AudioDecoderEvent> {
        self.event_rx.recv().await
    }
}

/// Checks whether FFmpeg finds an audio stream in `path`.
pub fn has_audio_stream(path: &Path) -> Result<bool> {
    crate::media::init_ffmpeg()?;

    let ictx = ffmpeg_next::format::input(path)
        .map_err(|e| Error::Audio(format!("failed to open {}: {e}", path.display())))?;

    Ok(ictx
        .streams()
        .best(ffmpeg_next::media::Type::Audio)
        .is_some())
}

fn decoder_loop(
    path: &PathBuf,
    mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
    event_tx: &mpsc::Sender<AudioDecoderEvent>,
    output_config: AudioOutputConfig,
) -> Result<()> {
    crate::media::init_ffmpeg()?;

    let mut ictx = ffmpeg_next::format::input(path)
        .map_err(|e| Error::Audio(format!("failed to open audio: {e}")))?;

    let input = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Audio)
        .ok_or_else(|| Error::Audio("no audio stream found".to_string()))?;
    let audio_stream_index = input.index();

    let time_base = input.time_base();
    let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

    let context_decoder = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
        .map_err(|e| Error::Audio(format!("failed to create codec context: {e}")))?;
    let mut decoder = context_decoder
        .decoder()
        .audio()
        .map_err(|e| Error::Audio(format!("failed to create audio decoder: {e}")))?;

    // Anything above two channels is downmixed to stereo.
    let output_channel_layout = match output_config.channels {
        1 => ffmpeg_next::ChannelLayout::MONO,
        _ => ffmpeg_next::ChannelLayout::STEREO,
    };
    let output_channels = if output_config.channels == 1 { 1 } else { 2 };

    let mut resampler = ffmpeg_next::software::resampling::Context::get(
        decoder.format(),
        decoder.channel_layout(),
        decoder.rate(),
        ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
        output_channel_layout,
        output_config.sample_rate,
    )
    .map_err(|e| Error::Audio(format!("failed to create resampler: {e}")))?;

    let mut state = AudioDecoderState::default();

    loop {
        match command_rx.try_recv() {
            Ok(command) => {
                if !handle_audio_command(command, &mut state, &mut ictx, &mut decoder, event_tx) {
                    break;
                }
            }
            Err(mpsc::error::TryRecvError::Disconnected) => break,
            Err(mpsc::error::TryRecvError::Empty) => {}
        }

        if !state.is_playing {
            std::thread::sleep(Duration::from_millis(10));
            continue;
        }

        let mut frame_decoded = false;
        let mut receiver_gone = false;
        for (stream, packet) in ictx.packets() {
            if stream.index() != audio_stream_index {
                continue;
            }

            if let Err(e) = decoder.send_packet(&packet) {
                tracing::debug!(error = %e, "skipping undecodable audio packet");
                continue;
            }

            let mut decoded_frame = ffmpeg_next::frame::Audio::empty();
            if decoder.receive_frame(&mut decoded_frame).is_err() {
                continue;
            }

            let mut output_audio = ffmpeg_next::frame::Audio::empty();
            if let Err(e) = resampler.run(&decoded_frame, &mut output_audio) {
                let _ = event_tx
                    .blocking_send(AudioDecoderEvent::Error(format!("resampling failed: {e}")));
                continue;
            }

            let samples = extract_samples(output_audio.data(0), output_audio.samples(), output_channels);
            let samples = spread_channels(samples, output_channels, output_config.channels);
            let pts_secs = decoded_frame
                .timestamp()
                .map_or(0.0, |pts| pts as f64 * time_base_f64);

            if let Some(start_time) = state.playback_start_time {
                let first = *state.first_pts.get_or_insert(pts_secs);
                pace(start_time, first, pts_secs, AUDIO_LOOKAHEAD_SECS);
            }

            let audio = DecodedAudio {
                samples: Arc::new(samples),
                pts_secs,
            };
            if event_tx
                .blocking_send(AudioDecoderEvent::BufferReady(audio))
                .is_err()
            {
                receiver_gone = true;
            }

            frame_decoded = true;
            break;
        }

        if receiver_gone {
            break;
        }

        if !frame_decoded {
            let _ = event_tx.blocking_send(AudioDecoderEvent::EndOfStream);
            state.is_playing = false;
        }
    }

    tracing::debug!(path = %path.display(), "audio decoder stopped");
    Ok(())
}

/// Reads `frames * channels` little-endian f32 samples from packed audio data.
fn extract_samples(data: &[u8], frames: usize, channels: u16) -> Vec<f32> {
    data.chunks_exact(4)
        .take(frames * channels as usize)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}

/// Widens interleaved frames from `from` to `to` channels, leaving the extra
/// channels silent. Devices with more than two channels still get stereo.
fn spread_channels(samples: Vec<f32>, from: u16, to: u16) -> Vec<f32> {
    if to <= from || from == 0 {
        return samples;
    }
    let (from, to) = (from as usize, to as usize);
    let mut widened = Vec::with_capacity(samples.len() / from * to);
    for frame in samples.chunks_exact(from) {
        widened.extend_from_slice(frame);
        widened.resize(widened.len() + (to - from), 0.0);
    }
    widened
}
