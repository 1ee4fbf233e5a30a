// SPDX-License-Identifier: MPL-2.0
//! Async video frame decoder using FFmpeg.
//!
//! Decoding runs on a blocking thread and delivers RGBA frames through a
//! bounded channel, paced to their presentation timestamps.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Represents a decoded video frame ready for display.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba_data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

/// Commands sent to a decoder thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecoderCommand {
    /// Start or resume decoding.
    Play,

    /// Stop sending frames, keeping the position.
    Pause,

    /// Jump to a timestamp. While paused, one frame is decoded to show it.
    Seek { target_secs: f64 },

    /// Shut the decoder thread down.
    Stop,
}

/// Events sent from the decoder to the UI.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    FrameReady(DecodedFrame),
    Buffering,
    EndOfStream,
    Error(String),
}

/// Converts seconds to FFmpeg's `AV_TIME_BASE` (microseconds).
pub(crate) fn seek_timestamp(secs: f64) -> i64 {
    (secs.max(0.0) * 1_000_000.0) as i64
}

/// Sleeps until `pts_secs` is due, relative to `start` and `first_pts`.
pub(crate) fn pace(start: Instant, first_pts: f64, pts_secs: f64, lead_secs: f64) {
    let delay = pts_secs - first_pts - lead_secs;
    if delay <= 0.0 {
        return;
    }
    let target = start + Duration::from_secs_f64(delay);
    let now = Instant::now();
    if target > now {
        std::thread::sleep(target - now);
    }
}

/// Async video decoder that runs on a blocking thread.
pub struct AsyncDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    /// Bounded so a paused UI applies backpressure instead of buffering frames.
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl AsyncDecoder {
    /// Spawns a decoder for `video_path`.
    ///
    /// Fails only if the file does not exist; open and codec errors arrive
    /// later as [`DecoderEvent::Error`].
    pub fn new<P: AsRef<Path>>(video_path: P) -> Result<Self> {
        let path = video_path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::Video(format!(
                "video file not found: {}",
                path.display()
            )));
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(2);

        // FFmpeg contexts are not Send, so the whole loop lives on one thread.
        tokio::task::spawn_blocking(move || {
            if let Err(e) = Self::decoder_loop_blocking(&path, command_rx, &event_tx) {
                tracing::warn!(path = %path.display(), error = %e, "video decoder failed");
                let _ = event_tx.blocking_send(DecoderEvent::Error(e.detail()));
            }
        });

        Ok(Self {
            command_tx,
            event_rx,
        })
    }

    pub fn send_command(&self, command: DecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Video("decoder is not running".into()))
    }

    /// Receives the next event. Returns `None` once the decoder thread exited.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }

    fn decoder_loop_blocking(
        video_path: &PathBuf,
        mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
        event_tx: &mpsc::Sender<DecoderEvent>,
    ) -> Result<()> {
        crate::media::init_ffmpeg()?;

        let mut ictx = ffmpeg_next::format::input(video_path)
            .map_err(|e| Error::Video(format!("failed to open video: {e}")))?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| Error::Video("no video stream found".to_string()))?;
        let video_stream_index = input.index();

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| Error::Video(format!("failed to create codec context: {e}")))?;
        let mut decoder = context_decoder
            .decoder()
            .video()
            .map_err(|e| Error::Video(format!("failed to create video decoder: {e}")))?;

        let width = decoder.width();
        let height = decoder.height();

        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| Error::Video(format!("failed to create scaler: {e}")))?;

        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let mut is_playing = false;
        let mut playback_start_time: Option<Instant> = None;
        let mut first_pts: Option<f64> = None;
        let mut current_pts_secs: f64 = 0.0;
        let mut decode_single_frame = false;

        loop {
            match command_rx.try_recv() {
                Ok(DecoderCommand::Play) => {
                    if !is_playing && current_pts_secs > 0.0 {
                        let timestamp = seek_timestamp(current_pts_secs);
                        // RangeTo lets FFmpeg land on the preceding keyframe
                        if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                            let _ = event_tx.blocking_send(DecoderEvent::Error(format!(
                                "resume seek failed: {e}"
                            )));
                        } else {
                            decoder.flush();
                        }
                    }
                    is_playing = true;
                    playback_start_time = Some(Instant::now());
                    first_pts = None;
                    let _ = event_tx.blocking_send(DecoderEvent::Buffering);
                }
                Ok(DecoderCommand::Pause) => {
                    is_playing = false;
                    playback_start_time = None;
                    first_pts = None;
                }
                Ok(DecoderCommand::Seek { target_secs }) => {
                    let timestamp = seek_timestamp(target_secs);
                    if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                        let _ = event_tx
                            .blocking_send(DecoderEvent::Error(format!("seek failed: {e}")));
                    } else {
                        decoder.flush();
                        current_pts_secs = target_secs;
                        playback_start_time = Some(Instant::now());
                        first_pts = None;
                        if !is_playing {
                            decode_single_frame = true;
                        }
                    }
                }
                Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => break,
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !is_playing && !decode_single_frame {
                std::thread::sleep(Duration::from_millis(10));
                continue;
            }

            let mut frame_decoded = false;
            let mut receiver_gone = false;
            for (stream, packet) in ictx.packets() {
                if stream.index() != video_stream_index {
                    continue;
                }

                if let Err(e) = decoder.send_packet(&packet) {
                    tracing::debug!(error = %e, "skipping undecodable video packet");
                    continue;
                }

                let mut decoded_frame = ffmpeg_next::frame::Video::empty();
                if decoder.receive_frame(&mut decoded_frame).is_err() {
                    continue;
                }

                let mut rgb_frame = ffmpeg_next::frame::Video::empty();
                if let Err(e) = scaler.run(&decoded_frame, &mut rgb_frame) {
                    let _ = event_tx
                        .blocking_send(DecoderEvent::Error(format!("scaling failed: {e}")));
                    continue;
                }

                let pts_secs = decoded_frame
                    .timestamp()
                    .map_or(current_pts_secs, |pts| pts as f64 * time_base_f64);

                if let Some(start_time) = playback_start_time.filter(|_| is_playing) {
                    let first = *first_pts.get_or_insert(pts_secs);
                    pace(start_time, first, pts_secs, 0.0);
                }
                current_pts_secs = pts_secs;

                let frame = DecodedFrame {
                    rgba_data: Arc::new(extract_rgba_data(&rgb_frame)),
                    width,
                    height,
                    pts_secs,
                };
                if event_tx
                    .blocking_send(DecoderEvent::FrameReady(frame))
                    .is_err()
                {
                    receiver_gone = true;
                }

                frame_decoded = true;
                decode_single_frame = false;
                break;
            }

            if receiver_gone {
                break;
            }

            if !frame_decoded {
                let _ = event_tx.blocking_send(DecoderEvent::EndOfStream);
                is_playing = false;
                playback_start_time = None;
                first_pts = None;
                decode_single_frame = false;
            }
        }

        tracing::debug!(path = %video_path.display(), "video decoder stopped");
        Ok(())
    }
}

/// Extracts packed RGBA rows from a frame, skipping line padding.
pub(crate) fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    copy_rows(
        frame.data(0),
        frame.stride(0),
        frame.width() as usize * 4,
        frame.height() as usize,
    )
}

fn copy_rows(data: &[u8], stride: usize, row_bytes: usize, rows: usize) -> Vec<u8> {
    let mut packed = Vec::with_capacity(row_bytes * rows);
    for y in 0..rows {
        let row_start = y * stride;
        let Some(row) = data.get(row_start..row_start + row_bytes) else {
            break;
        };
        packed.extend_from_slice(row);
    }
    packed
}
