// SPDX-License-Identifier: MPL-2.0
//! Image and media helpers shared by the gallery, camera and players.

pub mod ffmpeg;
pub mod frame_export;
pub mod gallery;

pub use ffmpeg::init_ffmpeg;
pub use frame_export::ExportableFrame;
pub use gallery::{GalleryList, ImageData};

/// Extensions offered by the "Load Video" dialog.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv"];

/// Extensions offered by the "Load Music" dialog.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac"];

/// Largest size fitting in `max_width` x `max_height` with the same aspect ratio.
///
/// Scales up as well as down. Zero-sized input yields `(0, 0)`.
#[must_use]
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let scale = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );
    let fitted_width = (f64::from(width) * scale).round().max(1.0) as u32;
    let fitted_height = (f64::from(height) * scale).round().max(1.0) as u32;
    (fitted_width.min(max_width), fitted_height.min(max_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_within_keeps_aspect_ratio() {
        assert_eq!(fit_within(1200, 400, 600, 400), (600, 200));
        assert_eq!(fit_within(400, 800, 600, 400), (200, 400));
    }

    #[test]
    fn fit_within_scales_up_small_images() {
        assert_eq!(fit_within(60, 40, 600, 400), (600, 400));
    }

    #[test]
    fn fit_within_handles_empty_images() {
        assert_eq!(fit_within(0, 10, 600, 400), (0, 0));
    }
}
