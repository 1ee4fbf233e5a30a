// SPDX-License-Identifier: MPL-2.0
//! Webcam capture through FFmpeg's libavdevice.
//!
//! [`CameraSource`] names the device, [`capture`] reads it on a blocking
//! thread, and [`subscription`] feeds scaled frames to the camera page.

pub mod capture;
pub mod subscription;

pub use capture::{CameraCapture, CameraEvent};
pub use subscription::{camera_feed, CameraMessage, CameraRequest};

use crate::config::{CameraConfig, DEFAULT_CAMERA_FRAMERATE};

/// An FFmpeg input device plus the options passed when opening it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CameraSource {
    /// libavdevice demuxer, e.g. `v4l2`, `dshow`, `avfoundation`.
    pub format: String,
    /// Device URL understood by `format`.
    pub device: String,
    pub framerate: u32,
    /// `WIDTHxHEIGHT` requested from the device, if any.
    pub video_size: Option<String>,
}

impl CameraSource {
    /// First camera of the platform's default capture API.
    #[must_use]
    pub fn platform_default() -> Self {
        let (format, device) = if cfg!(target_os = "windows") {
            ("dshow", "video=Integrated Camera")
        } else if cfg!(target_os = "macos") {
            ("avfoundation", "0")
        } else {
            ("v4l2", "/dev/video0")
        };

        Self {
            format: format.to_string(),
            device: device.to_string(),
            framerate: DEFAULT_CAMERA_FRAMERATE,
            video_size: None,
        }
    }

    /// Platform default with the `[camera]` settings applied on top.
    #[must_use]
    pub fn from_config(config: &CameraConfig) -> Self {
        let default = Self::platform_default();
        Self {
            format: non_empty(config.format.as_deref()).unwrap_or(default.format),
            device: non_empty(config.device.as_deref()).unwrap_or(default.device),
            framerate: config
                .framerate
                .filter(|fps| *fps > 0)
                .unwrap_or(default.framerate),
            video_size: non_empty(config.video_size.as_deref()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_source_matches_platform() {
        let source = CameraSource::platform_default();
        assert_eq!(source.framerate, DEFAULT_CAMERA_FRAMERATE);
        #[cfg(target_os = "linux")]
        {
            assert_eq!(source.format, "v4l2");
            assert_eq!(source.device, "/dev/video0");
        }
    }

    #[test]
    fn config_overrides_defaults() {
        let config = CameraConfig {
            format: Some("v4l2".into()),
            device: Some("/dev/video2".into()),
            framerate: Some(15),
            video_size: Some("1280x720".into()),
        };
        let source = CameraSource::from_config(&config);
        assert_eq!(source.device, "/dev/video2");
        assert_eq!(source.framerate, 15);
        assert_eq!(source.video_size.as_deref(), Some("1280x720"));
    }

    #[test]
    fn blank_and_zero_values_are_ignored() {
        let config = CameraConfig {
            format: Some("  ".into()),
            device: None,
            framerate: Some(0),
            video_size: Some(String::new()),
        };
        let source = CameraSource::from_config(&config);
        let default = CameraSource::platform_default();
        assert_eq!(source.format, default.format);
        assert_eq!(source.device, default.device);
        assert_eq!(source.framerate, default.framerate);
        assert_eq!(source.video_size, None);
    }
}
