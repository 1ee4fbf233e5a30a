// SPDX-License-Identifier: MPL-2.0
//! Iced subscription streaming camera frames.
//!
//! The capture thread lives as long as the subscription: when the camera
//! page stops returning it, the stream is dropped, the channel closes and the
//! device is released.

use super::capture::{CameraCapture, CameraEvent};
use super::CameraSource;
use iced::futures::{SinkExt, Stream};
use iced::stream;
use std::sync::Arc;

/// Identifies one camera session. A new `session_id` reopens the device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CameraRequest {
    pub session_id: u64,
    pub source: CameraSource,
}

#[derive(Debug, Clone)]
pub enum CameraMessage {
    Opened {
        width: u32,
        height: u32,
    },
    Frame {
        rgba_data: Arc<Vec<u8>>,
        width: u32,
        height: u32,
    },
    Failed(String),
}

impl From<CameraEvent> for CameraMessage {
    fn from(event: CameraEvent) -> Self {
        match event {
            CameraEvent::Opened { width, height } => CameraMessage::Opened { width, height },
            CameraEvent::Frame {
                rgba_data,
                width,
                height,
            } => CameraMessage::Frame {
                rgba_data,
                width,
                height,
            },
            CameraEvent::Failed(msg) => CameraMessage::Failed(msg),
        }
    }
}

pub fn camera_feed(request: CameraRequest) -> iced::Subscription<CameraMessage> {
    iced::Subscription::run_with(request, feed_stream)
}

fn feed_stream(request: &CameraRequest) -> impl Stream<Item = CameraMessage> {
    let source = request.source.clone();

    stream::channel(4, async move |mut output| {
        tracing::info!(device = %source.device, format = %source.format, "opening camera");
        let mut capture = CameraCapture::start(source);

        while let Some(event) = capture.recv().await {
            if output.send(CameraMessage::from(event)).await.is_err() {
                break;
            }
        }

        std::future::pending::<()>().await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_map_to_messages() {
        let message = CameraMessage::from(CameraEvent::Opened {
            width: 640,
            height: 480,
        });
        assert!(matches!(
            message,
            CameraMessage::Opened {
                width: 640,
                height: 480
            }
        ));

        let message = CameraMessage::from(CameraEvent::Failed("busy".into()));
        assert!(matches!(message, CameraMessage::Failed(msg) if msg == "busy"));
    }

    #[test]
    fn sessions_with_different_ids_are_distinct() {
        let source = CameraSource::platform_default();
        let a = CameraRequest {
            session_id: 1,
            source: source.clone(),
        };
        let b = CameraRequest {
            session_id: 2,
            source,
        };
        assert_ne!(a, b);
    }
}
