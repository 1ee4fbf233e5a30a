// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and launch flags.

use super::Page;
use crate::ui::notifications::NotificationMessage;
use crate::ui::pages::{camera, gallery, music, settings, tools, video};
use iced::window;

#[derive(Debug, Clone)]
pub enum Message {
    /// Sidebar selection.
    Navigate(Page),
    Gallery(gallery::Message),
    Camera(camera::Message),
    Video(video::Message),
    Music(music::Message),
    Tools(tools::Message),
    Settings(settings::Message),
    Notification(NotificationMessage),
    /// Advances the loading spinner.
    SpinnerTick,
    /// Advances a time-driven loading progress bar.
    ProgressTick,
    WindowCloseRequested(window::Id),
}

/// Runtime flags passed from the command line into the application.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP 47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional configuration directory override.
    pub config_dir: Option<String>,
    /// Optional gallery folder override.
    pub img_dir: Option<String>,
}
