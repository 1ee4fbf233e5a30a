// SPDX-License-Identifier: MPL-2.0
//! Live frame display for the camera page.
//!
//! Keeps the latest RGBA frame both as an image handle for rendering and as
//! raw pixels so "Capture Photo" saves the full frame, not the letterboxed
//! preview.

use crate::media::frame_export::ExportableFrame;
use iced::widget::{container, image, text, Container};
use iced::{ContentFit, Element, Length, Theme};
use std::sync::Arc;

pub struct VideoCanvas {
    frame_handle: Option<image::Handle>,
    raw_rgba_data: Option<Arc<Vec<u8>>>,
    width: u32,
    height: u32,
    /// Display box; frames are letterboxed into it.
    box_width: f32,
    box_height: f32,
}

impl VideoCanvas {
    #[must_use]
    pub fn new(box_width: u32, box_height: u32) -> Self {
        Self {
            frame_handle: None,
            raw_rgba_data: None,
            width: 0,
            height: 0,
            box_width: box_width as f32,
            box_height: box_height as f32,
        }
    }

    /// Replaces the displayed frame.
    pub fn set_frame(&mut self, rgba_data: Arc<Vec<u8>>, width: u32, height: u32) {
        self.raw_rgba_data = Some(Arc::clone(&rgba_data));

        // The handle needs owned pixels; the Arc above keeps a copy for export
        let data = Arc::try_unwrap(rgba_data).unwrap_or_else(|arc| (*arc).clone());
        self.frame_handle = Some(image::Handle::from_rgba(width, height, data));
        self.width = width;
        self.height = height;
    }

    pub fn clear(&mut self) {
        self.frame_handle = None;
        self.raw_rgba_data = None;
        self.width = 0;
        self.height = 0;
    }

    #[must_use]
    pub fn has_frame(&self) -> bool {
        self.frame_handle.is_some()
    }

    /// The frame currently on screen at its own resolution, ready to be written to disk.
    #[must_use]
    pub fn exportable_frame(&self) -> Option<ExportableFrame> {
        self.raw_rgba_data
            .as_ref()
            .map(|data| ExportableFrame::new(Arc::clone(data), self.width, self.height))
    }

    /// Renders the frame, or `placeholder` on a dark box when empty.
    pub fn view<'a, Message: 'a>(&'a self, placeholder: String) -> Element<'a, Message> {
        let content: Element<'a, Message> = match &self.frame_handle {
            Some(handle) => image::Image::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => text(placeholder).into(),
        };

        Container::new(content)
            .center_x(Length::Fixed(self.box_width))
            .center_y(Length::Fixed(self.box_height))
            .style(|theme: &Theme| container::Style {
                background: Some(iced::Color::BLACK.into()),
                text_color: Some(theme.extended_palette().background.weak.text),
                ..Default::default()
            })
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_starts_empty() {
        let canvas = VideoCanvas::new(640, 480);
        assert!(!canvas.has_frame());
        assert!(canvas.exportable_frame().is_none());
    }

    #[test]
    fn set_frame_updates_dimensions() {
        let mut canvas = VideoCanvas::new(640, 480);
        canvas.set_frame(Arc::new(vec![0u8; 640 * 480 * 4]), 640, 480);

        assert!(canvas.has_frame());
        assert_eq!((canvas.width, canvas.height), (640, 480));
    }

    #[test]
    fn exportable_frame_matches_last_frame() {
        let mut canvas = VideoCanvas::new(640, 480);
        canvas.set_frame(Arc::new(vec![255u8; 10 * 10 * 4]), 10, 10);

        let frame = canvas.exportable_frame().expect("frame available");
        assert_eq!((frame.width, frame.height), (10, 10));
        assert_eq!(frame.rgba_data.len(), 400);
    }

    #[test]
    fn large_frames_are_exported_unscaled() {
        let mut canvas = VideoCanvas::new(640, 480);
        canvas.set_frame(Arc::new(vec![0u8; 1280 * 720 * 4]), 1280, 720);

        let frame = canvas.exportable_frame().expect("frame available");
        assert_eq!((frame.width, frame.height), (1280, 720));
    }

    #[test]
    fn clear_removes_exportable_frame() {
        let mut canvas = VideoCanvas::new(640, 480);
        canvas.set_frame(Arc::new(vec![255u8; 10 * 10 * 4]), 10, 10);
        canvas.clear();
        assert!(canvas.exportable_frame().is_none());
    }
}
