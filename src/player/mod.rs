// SPDX-License-Identifier: MPL-2.0
//! Media playback engine shared by the video and music pages.
//!
//! FFmpeg decodes on blocking threads, cpal plays the sound, and an Iced
//! subscription connects both to the UI event loop.

pub mod audio;
pub mod audio_output;
mod decoder;
mod state;
pub mod subscription;

pub(crate) use decoder::extract_rgba_data;
pub use decoder::{AsyncDecoder, DecodedFrame, DecoderCommand, DecoderEvent};
pub use state::{request_for, MediaPlayer, PlaybackState};
pub use subscription::{
    playback, MediaKind, PlaybackCommandSender, PlaybackMessage, PlaybackRequest, PlayerCommand,
};
