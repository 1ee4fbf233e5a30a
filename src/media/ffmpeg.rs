// SPDX-License-Identifier: MPL-2.0
//! One-time FFmpeg initialization shared by the players and the camera.

use crate::error::{Error, Result};
use std::sync::OnceLock;

static FFMPEG_INIT: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Initialize FFmpeg, including libavdevice, with its log level set to ERROR.
///
/// Safe to call from any thread and any number of times; a failed first
/// attempt is reported on every call.
pub fn init_ffmpeg() -> Result<()> {
    FFMPEG_INIT
        .get_or_init(|| {
            ffmpeg_next::init().map_err(|e| format!("FFmpeg initialization failed: {e}"))?;
            ffmpeg_next::device::register_all();

            // SAFETY: av_log_set_level only stores the global log threshold.
            unsafe {
                ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
            }
            tracing::debug!("FFmpeg initialized");
            Ok(())
        })
        .clone()
        .map_err(Error::Video)
}
