// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Errors travel inside UI messages, so every variant carries owned strings
//! and the type stays `Clone`.

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Image Error: {0}")]
    Image(String),

    #[error("Video Error: {0}")]
    Video(String),

    #[error("Audio Error: {0}")]
    Audio(String),

    #[error("Camera Error: {0}")]
    Camera(String),

    /// A subprocess could not be spawned or waited on.
    #[error("Command Error: {0}")]
    Command(String),

    /// A subprocess did not finish within its deadline.
    #[error("timed out after {secs}s")]
    Timeout { secs: u64 },

    /// A user-supplied file or folder name is empty or contains separators.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// The destination of a rename/copy/move already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),
}

impl Error {
    /// Wraps an I/O error with the path it happened on.
    pub fn io_at(path: &Path, err: &std::io::Error) -> Self {
        Error::Io(format!("{}: {err}", path.display()))
    }

    /// Returns the message without the category prefix, for log panes and dialogs.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Error::Io(msg)
            | Error::Config(msg)
            | Error::Image(msg)
            | Error::Video(msg)
            | Error::Audio(msg)
            | Error::Camera(msg)
            | Error::Command(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
