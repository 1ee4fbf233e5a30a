// SPDX-License-Identifier: MPL-2.0
//! Saving camera frames to disk.

use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use image_rs::{ImageBuffer, ImageFormat, Rgba};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// RGBA frame ready to be written as an image file.
///
/// Uses `Arc<Vec<u8>>` so frames can be shared with the UI without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportableFrame {
    pub rgba_data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
}

impl ExportableFrame {
    #[must_use]
    pub fn new(rgba_data: Arc<Vec<u8>>, width: u32, height: u32) -> Self {
        Self {
            rgba_data,
            width,
            height,
        }
    }

    /// Writes the frame as PNG, creating the parent folder if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer size does not match the dimensions or
    /// the file cannot be encoded or written.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let img: ImageBuffer<Rgba<u8>, _> =
            ImageBuffer::from_raw(self.width, self.height, (*self.rgba_data).clone())
                .ok_or_else(|| {
                    Error::Image("frame data does not match its dimensions".to_string())
                })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io_at(parent, &e))?;
        }

        img.save_with_format(path, ImageFormat::Png)
            .map_err(|e| Error::Image(format!("{}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), "saved captured frame");
        Ok(())
    }
}

/// `captured_%Y%m%d_%H%M%S.png` inside `folder`.
pub fn capture_path(folder: &Path, now: DateTime<Local>) -> PathBuf {
    folder.join(format!("captured_{}.png", now.format("%Y%m%d_%H%M%S")))
}
