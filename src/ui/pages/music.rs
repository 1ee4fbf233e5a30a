// SPDX-License-Identifier: MPL-2.0
//! Music player page.

use super::transport::{self, Actions};
use super::{next_session_id, UpdateContext};
use crate::config::MUSIC_PLAY_DELAY;
use crate::i18n::I18n;
use crate::media::AUDIO_EXTENSIONS;
use crate::player::{request_for, MediaKind, MediaPlayer, PlaybackMessage};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::dialogs::{self, Filter, Tone};
use crate::ui::notifications::Notification;
use crate::ui::styles;
use crate::worker;
use iced::widget::{button, column, text};
use iced::{Alignment, Element, Length, Subscription, Task};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    Load,
    AccessAnswered(bool),
    Picked(Option<PathBuf>),
    /// Delayed start of the picked song.
    Start(PathBuf),
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

    /// Stops playback and unloads the song. Returns `true` if one was loaded.
    pub fn release(&mut self) -> bool {
        self.player.take().is_some()
    }

    pub fn update(&mut self, message: Message, ctx: &mut UpdateContext<'_>) -> Task<Message> {
        match message {
            Message::Load => Task::perform(
                dialogs::confirm(
                    Tone::Question,
                    ctx.i18n.tr("music-access-title"),
                    ctx.i18n.tr("music-access-body"),
                ),
                Message::AccessAnswered,
            ),
            Message::AccessAnswered(false) => {
                ctx.notify(Notification::info("music-access-denied"));
                Task::none()
            }
            Message::AccessAnswered(true) => Task::perform(
                dialogs::pick_file(
                    ctx.i18n.tr("music-pick-title"),
                    vec![Filter::new(ctx.i18n.tr("music-filter"), AUDIO_EXTENSIONS)],
                ),
                Message::Picked,
            ),
            Message::Picked(None) => Task::none(),
            Message::Picked(Some(path)) => {
                ctx.loading.show(ctx.i18n.tr("music-loading"));
                worker::after(MUSIC_PLAY_DELAY, Message::Start(path))
            }
            Message::Start(path) => {
                ctx.loading.hide();
                tracing::info!(path = %path.display(), "loading song");
                self.player = Some(MediaPlayer::new(request_for(
                    path,
                    MediaKind::Audio,
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
            Message::Playback(PlaybackMessage::Error(reason)) => {
                // A song that cannot be decoded is dropped; the label goes back to idle.
                if self.player.take().is_some() {
                    ctx.notify(Notification::error("music-load-failed").with_arg("error", reason));
                }
                Task::none()
            }
            Message::Playback(event) => {
                if let Some(player) = &mut self.player {
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

    /// "No song loaded" or the file name of the current song.
    pub fn song_label(&self, i18n: &I18n) -> String {
        match &self.player {
            Some(player) => {
                let name = player.file_name();
                i18n.tr_with_args("music-now-playing", &[("name", name.as_str())])
            }
            None => i18n.tr("music-no-song"),
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let load = button(text(i18n.tr("music-load")))
            .padding(spacing::SM)
            .style(styles::button::primary)
            .on_press(Message::Load);

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
            text(i18n.tr("music-title")).size(typography::TITLE_MD),
            text(self.song_label(i18n)).size(typography::BODY_LG),
            load,
            controls,
        ]
        .spacing(spacing::LG)
        .align_x(Alignment::Center)
        .width(Length::Fill)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notifications::Severity;
    use crate::ui::pages::test_support::Harness;

    #[test]
    fn label_shows_song_name() {
        let mut harness = Harness::new(PathBuf::from("/img"));
        let mut state = State::new();
        assert_eq!(state.song_label(&harness.i18n), "No song loaded");

        let _ = state.update(
            Message::Picked(Some(PathBuf::from("/music/track.ogg"))),
            &mut harness.ctx(),
        );
        assert!(harness.loading.is_visible());

        let _ = state.update(
            Message::Start(PathBuf::from("/music/track.ogg")),
            &mut harness.ctx(),
        );
        assert!(!harness.loading.is_visible());
        assert_eq!(state.song_label(&harness.i18n), "🎵 track.ogg");
        assert_eq!(state.player().map(MediaPlayer::kind), Some(MediaKind::Audio));
    }

    #[test]
    fn denied_access_informs() {
        let mut harness = Harness::new(PathBuf::from("/img"));
        let mut state = State::new();
        let _ = state.update(Message::AccessAnswered(false), &mut harness.ctx());
        let shown: Vec<_> = harness.notifications.visible().collect();
        assert_eq!(shown[0].severity(), Severity::Info);
        assert_eq!(shown[0].message_key(), "music-access-denied");
        assert!(state.player().is_none());
    }

    #[test]
    fn decode_failure_unloads_song() {
        let mut harness = Harness::new(PathBuf::from("/img"));
        let mut state = State::new();
        let _ = state.update(
            Message::Start(PathBuf::from("/music/broken.mp3")),
            &mut harness.ctx(),
        );
        let _ = state.update(
            Message::Playback(PlaybackMessage::Error("no audio stream".into())),
            &mut harness.ctx(),
        );
        assert!(state.player().is_none());
        let shown: Vec<_> = harness.notifications.visible().collect();
        assert_eq!(shown[0].message_key(), "music-load-failed");
        assert_eq!(
            shown[0].text(&harness.i18n),
            "Failed to load audio: no audio stream"
        );
    }
}
