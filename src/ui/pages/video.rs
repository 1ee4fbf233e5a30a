// SPDX-License-Identifier: MPL-2.0
//! Video player page.

use super::transport::{self, Actions};
use super::{next_session_id, UpdateContext};
use crate::config::{VIDEO_BOX_HEIGHT, VIDEO_BOX_WIDTH};
use crate::i18n::I18n;
use crate::media::VIDEO_EXTENSIONS;
use crate::player::{request_for, MediaKind, MediaPlayer, PlaybackMessage};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::dialogs::{self, Filter};
use crate::ui::styles;
use iced::widget::{button, column, container, image, text};
use iced::{Alignment, Color, ContentFit, Element, Length, Subscription, Task, Theme};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    Load,
    Picked(Option<PathBuf>),
    Play,
    Pause,
    Stop,
    Playback(PlaybackMessage),
}

#[derive(Debug, Default)]
pub struct State {
    player: Option<MediaPlayer>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn player(&self) -> Option<&MediaPlayer> {
        self.player.as_ref()
    }

    /// Stops playback and unloads the video. Returns `true` if one was loaded.
    pub fn release(&mut self) -> bool {
        self.player.take().is_some()
    }

    pub fn update(&mut self, message: Message, ctx: &mut UpdateContext<'_>) -> Task<Message> {
        match message {
            Message::Load => Task::perform(
                dialogs::pick_file(
                    ctx.i18n.tr("video-pick-title"),
                    vec![Filter::new(ctx.i18n.tr("video-filter"), VIDEO_EXTENSIONS)],
                ),
                Message::Picked,
            ),
            Message::Picked(None) => Task::none(),
            Message::Picked(Some(path)) => {
                tracing::info!(path = %path.display(), "loading video");
                self.player = Some(MediaPlayer::new(request_for(
                    path,
                    MediaKind::Video,
                    next_session_id(),
                    ctx.config,
                )));
                Task::none()
            }
            Message::Play => {
                if let Some(player) = &mut self.player {
                    player.play();
                }
                Task::none()
            }
            Message::Pause => {
                if let Some(player) = &mut self.player {
                    player.pause();
                }
                Task::none()
            }
            Message::Stop => {
                if let Some(player) = &mut self.player {
                    player.stop();
                }
                Task::none()
            }
            Message::Playback(event) => {
                if let Some(player) = &mut self.player {
                    if let PlaybackMessage::Error(reason) = &event {
                        tracing::warn!(%reason, path = %player.path().display(), "video playback failed");
                    }
                    player.handle_message(event);
                }
                Task::none()
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        match &self.player {
            Some(player) => player.subscription().map(Message::Playback),
            None => Subscription::none(),
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let heading = text(i18n.tr("video-title")).size(typography::TITLE_MD);

        let screen: Element<'a, Message> = match self.player.as_ref().and_then(MediaPlayer::frame) {
            Some(handle) => image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => text(i18n.tr("video-empty")).into(),
        };
        let screen = container(screen)
            .center_x(Length::Fixed(VIDEO_BOX_WIDTH as f32))
            .center_y(Length::Fixed(VIDEO_BOX_HEIGHT as f32))
            .style(|theme: &Theme| container::Style {
                background: Some(Color::BLACK.into()),
                text_color: Some(theme.extended_palette().background.weak.text),
                ..Default::default()
            });

        let load = button(text(i18n.tr("video-load")))
            .padding(spacing::SM)
            .style(styles::button::primary)
            .on_press(Message::Load);

        let name = self
            .player
            .as_ref()
            .map(MediaPlayer::file_name)
            .unwrap_or_default();

        let controls = transport::view(
            self.player.as_ref(),
            i18n,
            Actions {
                play: Message::Play,
                pause: Message::Pause,
                stop: Message::Stop,
            },
        );

        column![
            heading,
            screen,
            text(name).size(typography::BODY),
            load,
            controls
        ]
        .spacing(spacing::MD)
        .align_x(Alignment::Center)
        .width(Length::Fill)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlaybackState;
    use crate::ui::pages::test_support::Harness;

    #[test]
    fn cancelled_picker_keeps_previous_video() {
        let mut harness = Harness::new(PathBuf::from("/img"));
        let mut state = State::new();
        let _ = state.update(
            Message::Picked(Some(PathBuf::from("/videos/clip.mp4"))),
            &mut harness.ctx(),
        );
        let _ = state.update(Message::Picked(None), &mut harness.ctx());
        assert_eq!(
            state.player().map(MediaPlayer::file_name).as_deref(),
            Some("clip.mp4")
        );
    }

    #[test]
    fn picked_video_starts_loading() {
        let mut harness = Harness::new(PathBuf::from("/img"));
        let mut state = State::new();
        let _ = state.update(
            Message::Picked(Some(PathBuf::from("/videos/clip.mp4"))),
            &mut harness.ctx(),
        );
        let player = state.player().expect("player created");
        assert_eq!(player.kind(), MediaKind::Video);
        assert_eq!(player.state(), &PlaybackState::Loading);
    }

    #[test]
    fn controls_without_video_are_ignored() {
        let mut harness = Harness::new(PathBuf::from("/img"));
        let mut state = State::new();
        let _ = state.update(Message::Play, &mut harness.ctx());
        let _ = state.update(Message::Stop, &mut harness.ctx());
        assert!(state.player().is_none());
    }

    #[test]
    fn playback_error_is_kept_on_player() {
        let mut harness = Harness::new(PathBuf::from("/img"));
        let mut state = State::new();
        let _ = state.update(
            Message::Picked(Some(PathBuf::from("/videos/broken.mkv"))),
            &mut harness.ctx(),
        );
        let _ = state.update(
            Message::Playback(PlaybackMessage::Error("no video stream".into())),
            &mut harness.ctx(),
        );
        assert_eq!(
            state.player().and_then(|p| p.state().error_message()),
            Some("no video stream")
        );
    }
}
