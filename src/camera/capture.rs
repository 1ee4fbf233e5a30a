// SPDX-License-Identifier: MPL-2.0
//! Blocking camera read loop.

use super::CameraSource;
use crate::config::CAMERA_FRAME_INTERVAL;
use crate::error::{Error, Result};
use std::ffi::CString;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Events produced by the capture thread.
#[derive(Debug, Clone)]
pub enum CameraEvent {
    /// The device is open; frames will arrive at this size, the device's own.
    Opened { width: u32, height: u32 },
    Frame {
        rgba_data: Arc<Vec<u8>>,
        width: u32,
        height: u32,
    },
    /// The device could not be opened or stopped delivering frames.
    Failed(String),
}

/// Handle to a running capture thread.
///
/// The thread stops on its own once this handle is dropped.
pub struct CameraCapture {
    event_rx: mpsc::Receiver<CameraEvent>,
}

impl CameraCapture {
    pub fn start(source: CameraSource) -> Self {
        let (event_tx, event_rx) = mpsc::channel(2);

        // FFmpeg contexts are not Send, so the device is opened on the thread
        // that reads it.
        tokio::task::spawn_blocking(move || {
            if let Err(e) = capture_loop(&source, &event_tx) {
                tracing::warn!(device = %source.device, format = %source.format, error = %e, "camera capture failed");
                let _ = event_tx.blocking_send(CameraEvent::Failed(e.detail()));
            }
            tracing::debug!(device = %source.device, "camera released");
        });

        Self { event_rx }
    }

    /// Next event, or `None` once the capture thread exited.
    pub async fn recv(&mut self) -> Option<CameraEvent> {
        self.event_rx.recv().await
    }
}

fn open_device(source: &CameraSource) -> Result<ffmpeg_next::format::context::Input> {
    crate::media::init_ffmpeg().map_err(|e| Error::Camera(e.detail()))?;

    let format_name = CString::new(source.format.as_str())
        .map_err(|_| Error::Camera(format!("invalid input format {:?}", source.format)))?;

    // SAFETY: the name is a valid C string; the returned pointer refers to a
    // static demuxer description owned by libavdevice.
    let raw_format = unsafe { ffmpeg_next::ffi::av_find_input_format(format_name.as_ptr()) };
    if raw_format.is_null() {
        return Err(Error::Camera(format!(
            "input format {} is not available in this FFmpeg build",
            source.format
        )));
    }
    // SAFETY: checked non-null above.
    let format = unsafe { ffmpeg_next::format::Input::wrap(raw_format as *mut _) };

    let mut options = ffmpeg_next::Dictionary::new();
    options.set("framerate", &source.framerate.to_string());
    if let Some(size) = &source.video_size {
        options.set("video_size", size);
    }

    let context = ffmpeg_next::format::open_with(
        &source.device,
        &ffmpeg_next::format::Format::Input(format),
        options,
    )
    .map_err(|e| Error::Camera(format!("failed to open {}: {e}", source.device)))?;

    Ok(context.input())
}

fn native_frame_size(width: u32, height: u32) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(Error::Camera("device reported an empty frame size".into()));
    }
    Ok((width, height))
}

fn capture_loop(source: &CameraSource, event_tx: &mpsc::Sender<CameraEvent>) -> Result<()> {
    let mut ictx = open_device(source)?;

    let input = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or_else(|| Error::Camera("device has no video stream".into()))?;
    let stream_index = input.index();

    let mut decoder = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
        .and_then(|ctx| ctx.decoder().video())
        .map_err(|e| Error::Camera(format!("failed to create decoder: {e}")))?;

    // Frames keep the device resolution so captures are full size; the
    // preview letterboxes them.
    let (width, height) = native_frame_size(decoder.width(), decoder.height())?;

    let mut scaler = ffmpeg_next::software::scaling::Context::get(
        decoder.format(),
        decoder.width(),
        decoder.height(),
        ffmpeg_next::format::Pixel::RGBA,
        width,
        height,
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )
    .map_err(|e| Error::Camera(format!("failed to create scaler: {e}")))?;

    tracing::info!(device = %source.device, width, height, "camera opened");
    if event_tx
        .blocking_send(CameraEvent::Opened { width, height })
        .is_err()
    {
        return Ok(());
    }

    let mut last_sent: Option<Instant> = None;
    let mut decoded = ffmpeg_next::frame::Video::empty();
    let mut rgba = ffmpeg_next::frame::Video::empty();

    for (stream, packet) in ictx.packets() {
        if stream.index() != stream_index {
            continue;
        }
        if let Err(e) = decoder.send_packet(&packet) {
            tracing::debug!(error = %e, "skipping undecodable camera packet");
            continue;
        }

        while decoder.receive_frame(&mut decoded).is_ok() {
            if last_sent.is_some_and(|t| t.elapsed() < CAMERA_FRAME_INTERVAL) {
                continue;
            }
            scaler
                .run(&decoded, &mut rgba)
                .map_err(|e| Error::Camera(format!("scaling failed: {e}")))?;

            let event = CameraEvent::Frame {
                rgba_data: Arc::new(crate::player::extract_rgba_data(&rgba)),
                width,
                height,
            };
            match event_tx.try_send(event) {
                Ok(()) => last_sent = Some(Instant::now()),
                // UI is behind; drop this frame
                Err(mpsc::error::TrySendError::Full(_)) => {}
                Err(mpsc::error::TrySendError::Closed(_)) => return Ok(()),
            }
        }
    }

    Err(Error::Camera("camera stopped delivering frames".into()))
}
