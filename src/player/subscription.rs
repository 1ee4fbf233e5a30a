// SPDX-License-Identifier: MPL-2.0
//! Iced subscription driving one playback session.
//!
//! The subscription owns the decoders and the audio output. Dropping it (by
//! no longer returning it from `App::subscription`) closes every channel,
//! which stops the decoder threads and releases the audio device.

use super::audio::{AudioDecoder, AudioDecoderEvent};
use super::audio_output::AudioOutput;
use super::decoder::{AsyncDecoder, DecoderCommand, DecoderEvent};
use iced::futures::{SinkExt, Stream};
use iced::stream;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// What the session plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Frames plus the soundtrack when there is one.
    Video,
    /// Audio only; a missing audio stream is an error.
    Audio,
}

/// Everything needed to start a session. A new `session_id` restarts it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaybackRequest {
    pub session_id: u64,
    pub path: PathBuf,
    pub kind: MediaKind,
    pub autoplay: bool,
    pub volume_percent: u8,
    pub muted: bool,
}

/// User-level transport commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Play,
    Pause,
    /// Pause and rewind to the start.
    Stop,
}

impl PlayerCommand {
    /// Decoder commands implementing this transport command, in order.
    #[must_use]
    pub fn decoder_commands(self) -> &'static [DecoderCommand] {
        match self {
            PlayerCommand::Play => &[DecoderCommand::Play],
            PlayerCommand::Pause => &[DecoderCommand::Pause],
            PlayerCommand::Stop => &[
                DecoderCommand::Pause,
                DecoderCommand::Seek { target_secs: 0.0 },
            ],
        }
    }
}

/// Handle the UI uses to control a running session.
#[derive(Clone)]
pub struct PlaybackCommandSender {
    tx: mpsc::UnboundedSender<PlayerCommand>,
}

impl PlaybackCommandSender {
    pub(crate) fn from_sender(tx: mpsc::UnboundedSender<PlayerCommand>) -> Self {
        Self { tx }
    }

    pub fn send(&self, command: PlayerCommand) -> crate::error::Result<()> {
        self.tx
            .send(command)
            .map_err(|_| crate::error::Error::Video("player is not running".into()))
    }
}

impl std::fmt::Debug for PlaybackCommandSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackCommandSender")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum PlaybackMessage {
    /// The session is ready to take commands.
    Started(PlaybackCommandSender),

    FrameReady {
        rgba_data: Arc<Vec<u8>>,
        width: u32,
        height: u32,
        pts_secs: f64,
    },

    /// Audio position of an audio-only session.
    Position(f64),

    Buffering,

    EndOfStream,

    Error(String),
}

/// Creates the playback subscription for `request`.
pub fn playback(request: PlaybackRequest) -> iced::Subscription<PlaybackMessage> {
    iced::Subscription::run_with(request, playback_stream)
}

struct Session {
    kind: MediaKind,
    video_decoder: Option<AsyncDecoder>,
    audio_decoder: Option<AudioDecoder>,
    audio_output: Option<AudioOutput>,
}

impl Session {
    /// Opens the audio output and decoders. Errors are user-facing messages.
    fn open(request: &PlaybackRequest) -> Result<Self, String> {
        let volume = f32::from(request.volume_percent.min(100)) / 100.0;

        let audio_output = match AudioOutput::new(volume, request.muted) {
            Ok(output) => Some(output),
            Err(e) if request.kind == MediaKind::Audio => return Err(e.detail()),
            Err(e) => {
                tracing::warn!(error = %e, "playing video without sound");
                None
            }
        };

        let audio_decoder = match &audio_output {
            Some(output) => match AudioDecoder::new(&request.path, output.config()) {
                Ok(Some(decoder)) => Some(decoder),
                Ok(None) if request.kind == MediaKind::Audio => {
                    return Err("no audio stream found".to_string());
                }
                Ok(None) => None,
                Err(e) if request.kind == MediaKind::Audio => return Err(e.detail()),
                Err(e) => {
                    tracing::warn!(error = %e, "audio decoder failed");
                    None
                }
            },
            None => None,
        };

        let video_decoder = match request.kind {
            MediaKind::Video => Some(AsyncDecoder::new(&request.path).map_err(|e| e.detail())?),
            MediaKind::Audio => None,
        };

        Ok(Self {
            kind: request.kind,
            video_decoder,
            audio_decoder,
            audio_output,
        })
    }
}

/// Forwards a transport command to the device and both decoders.
fn apply(
    command: PlayerCommand,
    audio_output: Option<&AudioOutput>,
    video_decoder: Option<&AsyncDecoder>,
    audio_decoder: Option<&AudioDecoder>,
) -> Result<(), String> {
    if let Some(audio_out) = audio_output {
        let _ = match command {
            PlayerCommand::Play => audio_out.resume(),
            PlayerCommand::Pause => audio_out.pause(),
            PlayerCommand::Stop => audio_out.stop(),
        };
    }

    for decoder_command in command.decoder_commands() {
        if let Some(audio_dec) = audio_decoder {
            let _ = audio_dec.send_command(*decoder_command);
        }
        if let Some(video_dec) = video_decoder {
            video_dec
                .send_command(*decoder_command)
                .map_err(|e| e.detail())?;
        }
    }
    Ok(())
}

/// Translates an audio event, feeding samples to the device.
fn on_audio_event(
    event: AudioDecoderEvent,
    kind: MediaKind,
    audio_output: Option<&AudioOutput>,
) -> Option<PlaybackMessage> {
    let audio_only = kind == MediaKind::Audio;
    match event {
        AudioDecoderEvent::BufferReady(audio) => {
            if let Some(audio_out) = audio_output {
                let _ = audio_out.play(audio.samples);
            }
            audio_only.then_some(PlaybackMessage::Position(audio.pts_secs))
        }
        AudioDecoderEvent::EndOfStream => audio_only.then_some(PlaybackMessage::EndOfStream),
        AudioDecoderEvent::Error(msg) => {
            tracing::warn!(error = %msg, "audio decoding error");
            audio_only.then_some(PlaybackMessage::Error(msg))
        }
    }
}

fn on_video_event(event: DecoderEvent) -> PlaybackMessage {
    match event {
        DecoderEvent::FrameReady(frame) => PlaybackMessage::FrameReady {
            rgba_data: frame.rgba_data,
            width: frame.width,
            height: frame.height,
            pts_secs: frame.pts_secs,
        },
        DecoderEvent::Buffering => PlaybackMessage::Buffering,
        DecoderEvent::EndOfStream => PlaybackMessage::EndOfStream,
        DecoderEvent::Error(msg) => PlaybackMessage::Error(msg),
    }
}

fn playback_stream(request: &PlaybackRequest) -> impl Stream<Item = PlaybackMessage> {
    let request = request.clone();

    stream::channel(100, async move |mut output| {
        tracing::info!(path = %request.path.display(), kind = ?request.kind, "starting playback");

        let Session {
            kind,
            mut video_decoder,
            mut audio_decoder,
            audio_output,
        } = match Session::open(&request) {
            Ok(session) => session,
            Err(msg) => {
                tracing::warn!(path = %request.path.display(), error = %msg, "cannot start playback");
                let _ = output.send(PlaybackMessage::Error(msg)).await;
                std::future::pending::<()>().await;
                return;
            }
        };

        let (command_tx, mut command_rx) = mpsc::unbounded_channel();
        let _ = output
            .send(PlaybackMessage::Started(PlaybackCommandSender { tx: command_tx }))
            .await;

        if request.autoplay {
            let started = apply(
                PlayerCommand::Play,
                audio_output.as_ref(),
                video_decoder.as_ref(),
                audio_decoder.as_ref(),
            );
            if let Err(msg) = started {
                let _ = output.send(PlaybackMessage::Error(msg)).await;
            }
        }

        loop {
            tokio::select! {
                command = command_rx.recv() => {
                    let Some(command) = command else { break };
                    let applied = apply(
                        command,
                        audio_output.as_ref(),
                        video_decoder.as_ref(),
                        audio_decoder.as_ref(),
                    );
                    if let Err(msg) = applied {
                        let _ = output.send(PlaybackMessage::Error(msg)).await;
                    }
                }

                event = async {
                    match video_decoder.as_mut() {
                        Some(dec) => dec.recv_event().await,
                        None => std::future::pending().await,
                    }
                } => {
                    let Some(event) = event else { break };
                    let _ = output.send(on_video_event(event)).await;
                }

                event = async {
                    match audio_decoder.as_mut() {
                        Some(dec) => dec.recv_event().await,
                        None => std::future::pending().await,
                    }
                } => {
                    match event {
                        Some(event) => {
                            if let Some(message) = on_audio_event(event, kind, audio_output.as_ref()) {
                                let _ = output.send(message).await;
                            }
                        }
                        None if kind == MediaKind::Audio => break,
                        None => audio_decoder = None,
                    }
                }
            }
        }

        tracing::debug!(path = %request.path.display(), "playback session ended");
        std::future::pending::<()>().await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_pauses_then_rewinds() {
        assert_eq!(
            PlayerCommand::Stop.decoder_commands(),
            &[
                DecoderCommand::Pause,
                DecoderCommand::Seek { target_secs: 0.0 }
            ]
        );
        assert_eq!(
            PlayerCommand::Play.decoder_commands(),
            &[DecoderCommand::Play]
        );
    }

    #[test]
    fn requests_with_new_session_differ() {
        let first = PlaybackRequest {
            session_id: 1,
            path: PathBuf::from("clip.mp4"),
            kind: MediaKind::Video,
            autoplay: true,
            volume_percent: 80,
            muted: false,
        };
        let second = PlaybackRequest {
            session_id: 2,
            ..first.clone()
        };
        assert_ne!(first, second);
    }

    #[test]
    fn sender_reports_closed_session() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sender = PlaybackCommandSender { tx };
        drop(rx);
        assert!(sender.send(PlayerCommand::Play).is_err());
    }
}
