// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Window**: Initial and minimum window size
//! - **Gallery**: Display box and load delay
//! - **Camera**: Frame box, pacing and open delay
//! - **Volume**: Audio playback volume settings
//! - **Tools**: Subprocess targets and timeouts

use std::time::Duration;

// ==========================================================================
// Window Defaults
// ==========================================================================

pub const WINDOW_DEFAULT_WIDTH: f32 = 1100.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 750.0;
pub const MIN_WINDOW_WIDTH: f32 = 800.0;
pub const MIN_WINDOW_HEIGHT: f32 = 600.0;

// ==========================================================================
// Loading Overlay Defaults
// ==========================================================================

/// Interval between spinner glyph changes.
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(150);

/// Delay before the overlay closes once an operation reports 100%.
pub const LOADING_HIDE_DELAY: Duration = Duration::from_millis(300);

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Bounding box images are scaled into (aspect ratio preserved).
pub const GALLERY_MAX_WIDTH: u32 = 600;
pub const GALLERY_MAX_HEIGHT: u32 = 400;

/// Delay between granting access and scanning the folder.
pub const GALLERY_LOAD_DELAY: Duration = Duration::from_millis(300);

/// Extensions listed by the gallery (compared case-insensitively).
pub const GALLERY_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

// ==========================================================================
// Camera Defaults
// ==========================================================================

/// Bounding box camera frames are scaled into.
pub const CAMERA_FRAME_WIDTH: u32 = 640;
pub const CAMERA_FRAME_HEIGHT: u32 = 480;

/// Minimum spacing between frames forwarded to the UI.
pub const CAMERA_FRAME_INTERVAL: Duration = Duration::from_millis(30);

/// Delay between granting access and opening the device.
pub const CAMERA_OPEN_DELAY: Duration = Duration::from_millis(500);

/// Default capture framerate requested from the device.
pub const DEFAULT_CAMERA_FRAMERATE: u32 = 30;

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 0.8;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Display box video frames are letterboxed into.
pub const VIDEO_BOX_WIDTH: u32 = 800;
pub const VIDEO_BOX_HEIGHT: u32 = 450;

/// Delay between picking a song and starting playback.
pub const MUSIC_PLAY_DELAY: Duration = Duration::from_millis(500);

// ==========================================================================
// Tools Defaults
// ==========================================================================

/// Host pinged by the "Ping Google" action.
pub const DEFAULT_PING_HOST: &str = "8.8.8.8";

/// Number of echo requests sent.
pub const PING_COUNT: u32 = 4;

/// Deadline for the ping subprocess.
pub const DEFAULT_PING_TIMEOUT_SECS: u64 = 10;

/// Deadline for the ip configuration subprocess.
pub const DEFAULT_IP_CONFIG_TIMEOUT_SECS: u64 = 5;

/// Progress bar step and interval while pinging.
pub const PING_PROGRESS_STEP: f32 = 25.0;
pub const PING_PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

/// Progress bar step and interval while reading the network configuration.
pub const IP_CONFIG_PROGRESS_STEP: f32 = 20.0;
pub const IP_CONFIG_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Characters shown by "Read File" before truncating.
pub const READ_PREVIEW_CHARS: usize = 1000;

/// Entries of each kind shown by "List Directory".
pub const LIST_DIRECTORY_LIMIT: usize = 20;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_VOLUME < MAX_VOLUME);
    assert!(DEFAULT_VOLUME >= MIN_VOLUME && DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(GALLERY_MAX_WIDTH > 0 && GALLERY_MAX_HEIGHT > 0);
    assert!(CAMERA_FRAME_WIDTH > 0 && CAMERA_FRAME_HEIGHT > 0);
    assert!(VIDEO_BOX_WIDTH > 0 && VIDEO_BOX_HEIGHT > 0);
    assert!(DEFAULT_IP_CONFIG_TIMEOUT_SECS < DEFAULT_PING_TIMEOUT_SECS);
    assert!(MIN_WINDOW_WIDTH <= WINDOW_DEFAULT_WIDTH);
    assert!(MIN_WINDOW_HEIGHT <= WINDOW_DEFAULT_HEIGHT);
};
