// SPDX-License-Identifier: MPL-2.0
//! UI-side playback state for the video and music pages.

use super::subscription::{
    playback, MediaKind, PlaybackCommandSender, PlaybackMessage, PlaybackRequest, PlayerCommand,
};
use iced::widget::image;
use iced::Subscription;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    /// Waiting for the session to start.
    Loading,
    Playing { position_secs: f64 },
    Paused { position_secs: f64 },
    /// Rewound to the start by Stop.
    Stopped,
    /// Reached the end of the stream.
    Ended,
    Error { message: String },
}

impl PlaybackState {
    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }

    #[must_use]
    pub fn position(&self) -> Option<f64> {
        match self {
            Self::Playing { position_secs } | Self::Paused { position_secs } => {
                Some(*position_secs)
            }
            Self::Stopped => Some(0.0),
            _ => None,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// One loaded media file and the controls of its playback session.
#[derive(Debug)]
pub struct MediaPlayer {
    request: PlaybackRequest,
    state: PlaybackState,
    sender: Option<PlaybackCommandSender>,
    /// Commands issued before the session reported `Started`.
    pending: Vec<PlayerCommand>,
    frame: Option<image::Handle>,
}

impl MediaPlayer {
    #[must_use]
    pub fn new(request: PlaybackRequest) -> Self {
        Self {
            request,
            state: PlaybackState::Loading,
            sender: None,
            pending: Vec::new(),
            frame: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.request.path
    }

    /// File name shown next to the controls.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.request
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.request.path.display().to_string())
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.request.kind
    }

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Latest video frame, if any.
    #[must_use]
    pub fn frame(&self) -> Option<&image::Handle> {
        self.frame.as_ref()
    }

    pub fn subscription(&self) -> Subscription<PlaybackMessage> {
        playback(self.request.clone())
    }

    pub fn play(&mut self) {
        if matches!(self.state, PlaybackState::Error { .. }) {
            return;
        }
        if self.state == PlaybackState::Ended {
            self.send(PlayerCommand::Stop);
        }
        self.send(PlayerCommand::Play);
        let position_secs = self.state.position().unwrap_or(0.0);
        self.state = PlaybackState::Playing { position_secs };
    }

    pub fn pause(&mut self) {
        if let PlaybackState::Playing { position_secs } = self.state {
            self.send(PlayerCommand::Pause);
            self.state = PlaybackState::Paused { position_secs };
        }
    }

    pub fn stop(&mut self) {
        if matches!(self.state, PlaybackState::Error { .. }) {
            return;
        }
        self.send(PlayerCommand::Stop);
        self.state = PlaybackState::Stopped;
    }

    /// Applies a message from the playback subscription.
    pub fn handle_message(&mut self, message: PlaybackMessage) {
        match message {
            PlaybackMessage::Started(sender) => {
                for command in self.pending.drain(..) {
                    let _ = sender.send(command);
                }
                self.sender = Some(sender);
                if self.state == PlaybackState::Loading {
                    self.state = if self.request.autoplay {
                        PlaybackState::Playing { position_secs: 0.0 }
                    } else {
                        PlaybackState::Stopped
                    };
                }
            }
            PlaybackMessage::FrameReady {
                rgba_data,
                width,
                height,
                pts_secs,
            } => {
                let pixels = std::sync::Arc::try_unwrap(rgba_data).unwrap_or_else(|arc| (*arc).clone());
                self.frame = Some(image::Handle::from_rgba(width, height, pixels));
                self.update_position(pts_secs);
            }
            PlaybackMessage::Position(pts_secs) => self.update_position(pts_secs),
            PlaybackMessage::Buffering => {}
            PlaybackMessage::EndOfStream => {
                if self.state.is_playing() {
                    self.state = PlaybackState::Ended;
                }
            }
            PlaybackMessage::Error(message) => {
                self.state = PlaybackState::Error { message };
            }
        }
    }

    fn update_position(&mut self, pts_secs: f64) {
        if let PlaybackState::Playing { position_secs } | PlaybackState::Paused { position_secs } =
            &mut self.state
        {
            *position_secs = pts_secs;
        }
    }

    fn send(&mut self, command: PlayerCommand) {
        match &self.sender {
            Some(sender) => {
                if let Err(e) = sender.send(command) {
                    tracing::debug!(error = %e, ?command, "player command dropped");
                }
            }
            None => self.pending.push(command),
        }
    }
}

/// Builds a request for `path` with the player settings.
#[must_use]
pub fn request_for(
    path: PathBuf,
    kind: MediaKind,
    session_id: u64,
    config: &crate::config::Config,
) -> PlaybackRequest {
    PlaybackRequest {
        session_id,
        path,
        kind,
        autoplay: match kind {
            MediaKind::Video => config.player.autoplay.unwrap_or(true),
            MediaKind::Audio => true,
        },
        volume_percent: (config.volume() * 100.0).round() as u8,
        muted: config.player.muted.unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::sync::Arc;

    fn player(autoplay: bool) -> MediaPlayer {
        let mut request = request_for(
            PathBuf::from("/music/song.mp3"),
            MediaKind::Audio,
            7,
            &Config::default(),
        );
        request.autoplay = autoplay;
        MediaPlayer::new(request)
    }

    #[test]
    fn request_uses_player_settings() {
        let request = request_for(
            PathBuf::from("clip.mkv"),
            MediaKind::Video,
            3,
            &Config::default(),
        );
        assert!(request.autoplay);
        assert_eq!(request.volume_percent, 80);
        assert!(!request.muted);
        assert_eq!(request.session_id, 3);
    }

    #[test]
    fn file_name_is_last_component() {
        assert_eq!(player(true).file_name(), "song.mp3");
    }

    #[test]
    fn started_with_autoplay_is_playing() {
        let mut player = player(true);
        assert_eq!(player.state(), &PlaybackState::Loading);

        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        player.handle_message(PlaybackMessage::Started(test_sender(tx)));
        assert!(player.state().is_playing());
    }

    #[test]
    fn commands_before_start_are_queued() {
        let mut player = player(false);
        player.play();

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        player.handle_message(PlaybackMessage::Started(test_sender(tx)));

        assert_eq!(rx.try_recv().ok(), Some(PlayerCommand::Play));
        assert!(player.state().is_playing());
    }

    #[test]
    fn pause_and_stop_transitions() {
        let mut player = player(true);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        player.handle_message(PlaybackMessage::Started(test_sender(tx)));

        player.handle_message(PlaybackMessage::Position(12.5));
        player.pause();
        assert_eq!(
            player.state(),
            &PlaybackState::Paused {
                position_secs: 12.5
            }
        );
        assert_eq!(rx.try_recv().ok(), Some(PlayerCommand::Pause));

        player.stop();
        assert_eq!(player.state(), &PlaybackState::Stopped);
        assert_eq!(rx.try_recv().ok(), Some(PlayerCommand::Stop));
    }

    #[test]
    fn play_after_end_rewinds_first() {
        let mut player = player(true);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        player.handle_message(PlaybackMessage::Started(test_sender(tx)));
        player.handle_message(PlaybackMessage::EndOfStream);
        assert_eq!(player.state(), &PlaybackState::Ended);

        player.play();
        assert_eq!(rx.try_recv().ok(), Some(PlayerCommand::Stop));
        assert_eq!(rx.try_recv().ok(), Some(PlayerCommand::Play));
    }

    #[test]
    fn errors_are_sticky() {
        let mut player = player(true);
        player.handle_message(PlaybackMessage::Error("bad codec".into()));
        player.play();
        assert_eq!(player.state().error_message(), Some("bad codec"));
    }

    #[test]
    fn frames_update_handle() {
        let mut player = player(true);
        player.handle_message(PlaybackMessage::FrameReady {
            rgba_data: Arc::new(vec![0u8; 4 * 6]),
            width: 3,
            height: 2,
            pts_secs: 0.04,
        });
        assert!(player.frame().is_some());
    }

    fn test_sender(
        tx: tokio::sync::mpsc::UnboundedSender<PlayerCommand>,
    ) -> PlaybackCommandSender {
        PlaybackCommandSender::from_sender(tx)
    }
}
