// SPDX-License-Identifier: MPL-2.0
//! Gallery page: browses the images of the capture folder.
//!
//! Access is asked first. Once granted the folder is scanned on a worker
//! and images are decoded one at a time, scaled to fit the display box.

use super::UpdateContext;
use crate::app::paths;
use crate::config::{GALLERY_LOAD_DELAY, GALLERY_MAX_HEIGHT, GALLERY_MAX_WIDTH};
use crate::error::{Error, Result};
use crate::i18n::I18n;
use crate::media::gallery::{self, GalleryList, ImageData};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::dialogs::{self, Tone};
use crate::ui::styles;
use crate::worker;
use iced::widget::{button, center, column, container, image, row, text};
use iced::{Alignment, ContentFit, Element, Length, Task};

#[derive(Debug, Clone)]
pub enum Message {
    AccessAnswered(bool),
    Scan,
    Scanned(Result<GalleryList>),
    ImageLoaded {
        /// Position the image was requested for; stale results are dropped.
        position: usize,
        result: Result<ImageData>,
    },
    Previous,
    Next,
}

#[derive(Debug, Clone)]
enum Slot {
    Loading,
    Ready(ImageData),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    AwaitingAccess,
    Denied,
    Scanning,
    Empty,
    Browsing {
        list: GalleryList,
        slot: Slot,
    },
    ScanFailed(String),
}

#[derive(Debug, Clone, Default)]
pub struct State {
    phase: Phase,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks for gallery access.
    pub fn enter(&mut self, ctx: &UpdateContext<'_>) -> Task<Message> {
        self.phase = Phase::AwaitingAccess;
        Task::perform(
            dialogs::confirm(
                Tone::Question,
                ctx.i18n.tr("gallery-access-title"),
                ctx.i18n.tr("gallery-access-body"),
            ),
            Message::AccessAnswered,
        )
    }

    pub fn update(&mut self, message: Message, ctx: &mut UpdateContext<'_>) -> Task<Message> {
        match message {
            Message::AccessAnswered(false) => {
                tracing::info!("gallery access denied");
                self.phase = Phase::Denied;
                Task::none()
            }
            Message::AccessAnswered(true) => {
                self.phase = Phase::Scanning;
                ctx.loading.show(ctx.i18n.tr("gallery-loading"));
                worker::after(GALLERY_LOAD_DELAY, Message::Scan)
            }
            Message::Scan => {
                let folder = ctx.img_dir.to_path_buf();
                worker::spawn(
                    move || {
                        paths::ensure_img_dir(&folder).map_err(|e| Error::io_at(&folder, &e))?;
                        GalleryList::scan(&folder)
                    },
                    Message::Scanned,
                )
            }
            Message::Scanned(result) => {
                ctx.loading.hide();
                match result {
                    Ok(list) if list.is_empty() => {
                        self.phase = Phase::Empty;
                        Task::none()
                    }
                    Ok(list) => {
                        let task = load_current(&list);
                        self.phase = Phase::Browsing {
                            list,
                            slot: Slot::Loading,
                        };
                        task
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "gallery scan failed");
                        self.phase = Phase::ScanFailed(e.detail());
                        Task::none()
                    }
                }
            }
            Message::ImageLoaded { position, result } => {
                if let Phase::Browsing { list, slot } = &mut self.phase {
                    if list.position() == position {
                        *slot = match result {
                            Ok(data) => Slot::Ready(data),
                            Err(e) => {
                                tracing::warn!(error = %e, "gallery image failed to decode");
                                Slot::Failed(e.detail())
                            }
                        };
                    }
                }
                Task::none()
            }
            Message::Previous | Message::Next => {
                let Phase::Browsing { list, slot } = &mut self.phase else {
                    return Task::none();
                };
                if matches!(message, Message::Next) {
                    list.next();
                } else {
                    list.previous();
                }
                *slot = Slot::Loading;
                load_current(list)
            }
        }
    }

    /// `(position, total)` of the image on screen.
    #[must_use]
    pub fn counter(&self) -> Option<(usize, usize)> {
        match &self.phase {
            Phase::Browsing { list, .. } => Some((list.position(), list.len())),
            _ => None,
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let heading = text(i18n.tr("gallery-title")).size(typography::TITLE_MD);

        let body: Element<'a, Message> = match &self.phase {
            Phase::AwaitingAccess | Phase::Scanning => Element::from(text("")),
            Phase::Denied => status(i18n.tr("gallery-access-denied")),
            Phase::Empty => status(i18n.tr("gallery-empty")),
            Phase::ScanFailed(detail) => {
                error_block(i18n.tr_with_args("gallery-scan-failed", &[("error", detail.as_str())]))
            }
            Phase::Browsing { list, slot } => {
                let frame: Element<'a, Message> = match slot {
                    Slot::Loading => text("").into(),
                    Slot::Ready(data) => image(data.handle.clone())
                        .width(Length::Fixed(data.width as f32))
                        .height(Length::Fixed(data.height as f32))
                        .content_fit(ContentFit::Contain)
                        .into(),
                    Slot::Failed(detail) => error_block(
                        i18n.tr_with_args("gallery-image-failed", &[("error", detail.as_str())]),
                    ),
                };

                let framed = container(frame)
                    .center_x(Length::Fixed(GALLERY_MAX_WIDTH as f32))
                    .center_y(Length::Fixed(GALLERY_MAX_HEIGHT as f32));

                let position = list.position().to_string();
                let total = list.len().to_string();
                let counter = text(i18n.tr_with_args(
                    "gallery-counter",
                    &[("index", position.as_str()), ("total", total.as_str())],
                ))
                .size(typography::BODY);

                let navigation = row![
                    button(text(i18n.tr("gallery-previous")))
                        .style(styles::button::primary)
                        .on_press(Message::Previous),
                    counter,
                    button(text(i18n.tr("gallery-next")))
                        .style(styles::button::primary)
                        .on_press(Message::Next),
                ]
                .spacing(spacing::MD)
                .align_y(Alignment::Center);

                column![framed, navigation]
                    .spacing(spacing::MD)
                    .align_x(Alignment::Center)
                    .into()
            }
        };

        column![heading, center(body)]
            .spacing(spacing::LG)
            .align_x(Alignment::Center)
            .width(Length::Fill)
            .into()
    }
}

fn load_current(list: &GalleryList) -> Task<Message> {
    let Some(path) = list.current().map(std::path::Path::to_path_buf) else {
        return Task::none();
    };
    let position = list.position();
    worker::spawn(
        move || gallery::load_fitted(&path),
        move |result| Message::ImageLoaded { position, result },
    )
}

fn status<'a>(message: String) -> Element<'a, Message> {
    text(message).size(typography::TITLE_SM).into()
}

fn error_block<'a>(message: String) -> Element<'a, Message> {
    container(text(message).size(typography::BODY))
        .padding(spacing::SM)
        .style(styles::container::error_text)
        .into()
}
