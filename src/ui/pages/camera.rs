// SPDX-License-Identifier: MPL-2.0
//! Camera page: live preview and photo capture.
//!
//! The device is opened by the page subscription, so leaving the page (or
//! closing the window) drops the stream and releases the camera.

use super::{next_session_id, UpdateContext};
use crate::camera::{camera_feed, CameraMessage, CameraRequest, CameraSource};
use crate::config::{CAMERA_FRAME_HEIGHT, CAMERA_FRAME_WIDTH, CAMERA_OPEN_DELAY};
use crate::error::Result;
use crate::i18n::I18n;
use crate::media::frame_export;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::dialogs::{self, Tone};
use crate::ui::notifications::Notification;
use crate::ui::styles;
use crate::ui::widgets::VideoCanvas;
use crate::worker;
use iced::widget::{button, column, text};
use iced::{Alignment, Element, Length, Subscription, Task};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    AccessAnswered(bool),
    Open,
    Feed(CameraMessage),
    Capture,
    Saved(Result<PathBuf>),
}

enum Phase {
    AwaitingAccess,
    Denied,
    Opening,
    Live {
        request: CameraRequest,
        /// Set once the device reported it cannot be used.
        unavailable: bool,
    },
}

pub struct State {
    phase: Phase,
    canvas: VideoCanvas,
    saving: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            phase: Phase::AwaitingAccess,
            canvas: VideoCanvas::new(CAMERA_FRAME_WIDTH, CAMERA_FRAME_HEIGHT),
            saving: false,
        }
    }
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks for camera access.
    pub fn enter(&mut self, ctx: &UpdateContext<'_>) -> Task<Message> {
        Task::perform(
            dialogs::confirm(
                Tone::Question,
                ctx.i18n.tr("camera-access-title"),
                ctx.i18n.tr("camera-access-body"),
            ),
            Message::AccessAnswered,
        )
    }

    /// `true` while the device is (being) held.
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        matches!(
            self.phase,
            Phase::Live {
                unavailable: false,
                ..
            }
        )
    }

    /// Stops the preview and releases the device. Returns `true` if it was held.
    pub fn release(&mut self) -> bool {
        let was_live = matches!(self.phase, Phase::Live { .. });
        self.phase = Phase::AwaitingAccess;
        self.canvas.clear();
        was_live
    }

    pub fn update(&mut self, message: Message, ctx: &mut UpdateContext<'_>) -> Task<Message> {
        match message {
            Message::AccessAnswered(false) => {
                tracing::info!("camera access denied");
                self.phase = Phase::Denied;
                Task::none()
            }
            Message::AccessAnswered(true) => {
                self.phase = Phase::Opening;
                ctx.loading.show(ctx.i18n.tr("camera-loading"));
                worker::after(CAMERA_OPEN_DELAY, Message::Open)
            }
            Message::Open => {
                // Page was left or re-entered while waiting.
                if !matches!(self.phase, Phase::Opening) {
                    return Task::none();
                }
                // The device opens in the background behind "Starting camera...".
                ctx.loading.hide();
                self.phase = Phase::Live {
                    request: CameraRequest {
                        session_id: next_session_id(),
                        source: CameraSource::from_config(&ctx.config.camera),
                    },
                    unavailable: false,
                };
                Task::none()
            }
            Message::Feed(event) => {
                self.handle_feed(event, ctx);
                Task::none()
            }
            Message::Capture => {
                if self.saving {
                    return Task::none();
                }
                let frame = match (&self.phase, self.canvas.exportable_frame()) {
                    (Phase::Live { unavailable: false, .. }, Some(frame)) => frame,
                    _ => {
                        ctx.notify(Notification::warning("camera-not-available-warning"));
                        return Task::none();
                    }
                };
                self.saving = true;
                let path = frame_export::capture_path(ctx.img_dir, chrono::Local::now());
                worker::spawn(
                    move || frame.save_png(&path).map(|()| path),
                    Message::Saved,
                )
            }
            Message::Saved(result) => {
                self.saving = false;
                match result {
                    Ok(path) => {
                        tracing::info!(path = %path.display(), "photo captured");
                        ctx.notify(Notification::success("camera-photo-saved"));
                    }
                    Err(e) => {
                        ctx.notify(
                            Notification::error("camera-capture-failed")
                                .with_arg("error", e.detail()),
                        );
                    }
                }
                Task::none()
            }
        }
    }

    fn handle_feed(&mut self, event: CameraMessage, ctx: &mut UpdateContext<'_>) {
        let Phase::Live { unavailable, .. } = &mut self.phase else {
            return;
        };
        match event {
            CameraMessage::Opened { width, height } => {
                tracing::info!(width, height, "camera opened");
                ctx.loading.hide();
            }
            CameraMessage::Frame {
                rgba_data,
                width,
                height,
            } => {
                if !*unavailable {
                    self.canvas.set_frame(rgba_data, width, height);
                }
            }
            CameraMessage::Failed(reason) => {
                tracing::warn!(%reason, "camera not available");
                *unavailable = true;
                self.canvas.clear();
                ctx.loading.hide();
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        match &self.phase {
            Phase::Live {
                request,
                unavailable: false,
            } => camera_feed(request.clone()).map(Message::Feed),
            _ => Subscription::none(),
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let heading = text(i18n.tr("camera-title")).size(typography::TITLE_MD);

        let preview: Element<'a, Message> = match &self.phase {
            Phase::AwaitingAccess | Phase::Opening => {
                self.canvas.view(i18n.tr("camera-starting"))
            }
            Phase::Denied => text(i18n.tr("camera-access-denied"))
                .size(typography::TITLE_SM)
                .into(),
            Phase::Live {
                unavailable: true, ..
            } => text(i18n.tr("camera-unavailable"))
                .size(typography::TITLE_SM)
                .into(),
            Phase::Live { .. } => self.canvas.view(i18n.tr("camera-starting")),
        };

        let capture = button(text(i18n.tr("camera-capture")))
            .padding(spacing::SM)
            .style(styles::button::primary)
            .on_press_maybe((!self.saving).then_some(Message::Capture));

        column![heading, preview, capture]
            .spacing(spacing::LG)
            .align_x(Alignment::Center)
            .width(Length::Fill)
            .into()
    }
}
