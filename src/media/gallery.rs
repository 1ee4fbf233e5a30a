// SPDX-License-Identifier: MPL-2.0
//! Gallery folder scanning, wrap-around navigation and image loading.

use crate::config::{GALLERY_EXTENSIONS, GALLERY_MAX_HEIGHT, GALLERY_MAX_WIDTH};
use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::imageops::FilterType;
use image_rs::GenericImageView;
use std::path::{Path, PathBuf};

/// Returns `true` if `path` has one of the gallery extensions (any case).
pub fn is_gallery_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            GALLERY_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Images of the gallery folder with a current position.
///
/// Files keep the order the filesystem lists them in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GalleryList {
    images: Vec<PathBuf>,
    current_index: usize,
}

impl GalleryList {
    /// Lists the images of `directory`. A missing folder is an empty gallery.
    pub fn scan(directory: &Path) -> Result<Self> {
        let entries = match std::fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(Error::io_at(directory, &err)),
        };

        let mut images = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::io_at(directory, &e))?.path();
            if path.is_file() && is_gallery_image(&path) {
                images.push(path);
            }
        }

        tracing::debug!(folder = %directory.display(), count = images.len(), "scanned gallery");
        Ok(Self::from_paths(images))
    }

    #[must_use]
    pub fn from_paths(images: Vec<PathBuf>) -> Self {
        Self {
            images,
            current_index: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Path> {
        self.images.get(self.current_index).map(PathBuf::as_path)
    }

    /// 1-based position of the current image, for the "Image i / n" counter.
    #[must_use]
    pub fn position(&self) -> usize {
        self.current_index + 1
    }

    /// Advances to the next image, wrapping to the first.
    pub fn next(&mut self) -> Option<&Path> {
        if self.images.is_empty() {
            return None;
        }
        self.current_index = (self.current_index + 1) % self.images.len();
        self.current()
    }

    /// Steps back to the previous image, wrapping to the last.
    pub fn previous(&mut self) -> Option<&Path> {
        if self.images.is_empty() {
            return None;
        }
        let len = self.images.len();
        self.current_index = (self.current_index + len - 1) % len;
        self.current()
    }
}

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }
}

/// Decodes `path` and scales it to fit the gallery frame.
pub fn load_fitted(path: &Path) -> Result<ImageData> {
    load_fitted_within(path, GALLERY_MAX_WIDTH, GALLERY_MAX_HEIGHT)
}

pub fn load_fitted_within(path: &Path, max_width: u32, max_height: u32) -> Result<ImageData> {
    let decoded = image_rs::open(path)
        .map_err(|e| Error::Image(format!("{}: {e}", path.display())))?;

    let (width, height) = decoded.dimensions();
    let (target_width, target_height) = super::fit_within(width, height, max_width, max_height);
    if target_width == 0 || target_height == 0 {
        return Err(Error::Image(format!("{}: empty image", path.display())));
    }

    let resized = if (target_width, target_height) == (width, height) {
        decoded
    } else {
        decoded.resize_exact(target_width, target_height, FilterType::Triangle)
    };

    let rgba = resized.to_rgba8();
    Ok(ImageData::from_rgba(
        rgba.width(),
        rgba.height(),
        rgba.into_raw(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]))
            .save(path)
            .expect("write png");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(is_gallery_image(Path::new("a.PNG")));
        assert!(is_gallery_image(Path::new("b.JpEg")));
        assert!(is_gallery_image(Path::new("c.bmp")));
        assert!(!is_gallery_image(Path::new("d.gif")));
        assert!(!is_gallery_image(Path::new("noext")));
    }

    #[test]
    fn scan_filters_non_images() {
        let dir = tempdir().expect("temp dir");
        std::fs::write(dir.path().join("a.jpg"), b"x").expect("write");
        std::fs::write(dir.path().join("b.TXT"), b"x").expect("write");
        std::fs::write(dir.path().join("c.Png"), b"x").expect("write");
        std::fs::create_dir(dir.path().join("folder.png")).expect("mkdir");

        let list = GalleryList::scan(dir.path()).expect("scan");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn scan_missing_folder_is_empty() {
        let dir = tempdir().expect("temp dir");
        let list = GalleryList::scan(&dir.path().join("img")).expect("scan");
        assert!(list.is_empty());
        assert!(list.current().is_none());
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut list = GalleryList::from_paths(vec![
            PathBuf::from("1.png"),
            PathBuf::from("2.png"),
            PathBuf::from("3.png"),
        ]);
        assert_eq!(list.position(), 1);

        assert_eq!(list.previous(), Some(Path::new("3.png")));
        assert_eq!(list.position(), 3);
        assert_eq!(list.next(), Some(Path::new("1.png")));
        assert_eq!(list.next(), Some(Path::new("2.png")));
        assert_eq!(list.position(), 2);
    }

    #[test]
    fn navigation_on_empty_list_is_noop() {
        let mut list = GalleryList::default();
        assert_eq!(list.next(), None);
        assert_eq!(list.previous(), None);
    }

    #[test]
    fn load_fitted_scales_into_box() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("wide.png");
        write_png(&path, 1200, 300);

        let data = load_fitted(&path).expect("load");
        assert_eq!((data.width, data.height), (600, 150));
    }

    #[test]
    fn load_fitted_reports_corrupt_files() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").expect("write");

        match load_fitted(&path) {
            Err(Error::Image(msg)) => assert!(msg.contains("broken.png")),
            other => panic!("expected image error, got {other:?}"),
        }
    }
}
