// SPDX-License-Identifier: MPL-2.0
//! Page components shown to the right of the sidebar.
//!
//! Each page owns its `State` and `Message` and is rebuilt from scratch every
//! time it is selected. Devices and players live inside page state, so
//! dropping the state on page switch also drops their subscriptions and
//! releases the underlying resources.

pub mod camera;
pub mod gallery;
pub mod home;
pub mod music;
pub mod settings;
pub mod tools;
mod transport;
pub mod video;

use crate::config::Config;
use crate::i18n::I18n;
use crate::ui::loading::LoadingOverlay;
use crate::ui::notifications;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a process-wide unique id for a device or playback session.
///
/// Subscriptions are keyed by their request, so a fresh id guarantees a
/// rebuilt page restarts its stream even for the same device or file.
pub fn next_session_id() -> u64 {
    NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed)
}

/// Shared application state a page may read or drive while handling a message.
pub struct UpdateContext<'a> {
    pub i18n: &'a I18n,
    pub config: &'a Config,
    /// Folder scanned by the gallery and written to by photo capture.
    pub img_dir: &'a Path,
    pub loading: &'a mut LoadingOverlay,
    pub notifications: &'a mut notifications::Manager,
}

impl UpdateContext<'_> {
    pub fn notify(&mut self, notification: notifications::Notification) {
        self.notifications.push(notification);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::path::PathBuf;

    /// Owns everything an [`UpdateContext`] borrows.
    pub struct Harness {
        pub i18n: I18n,
        pub config: Config,
        pub img_dir: PathBuf,
        pub loading: LoadingOverlay,
        pub notifications: notifications::Manager,
    }

    impl Harness {
        pub fn new(img_dir: PathBuf) -> Self {
            Self {
                i18n: I18n::new(Some("en-US".into()), &Config::default()),
                config: Config::default(),
                img_dir,
                loading: LoadingOverlay::new(),
                notifications: notifications::Manager::new(),
            }
        }

        pub fn ctx(&mut self) -> UpdateContext<'_> {
            UpdateContext {
                i18n: &self.i18n,
                config: &self.config,
                img_dir: &self.img_dir,
                loading: &mut self.loading,
                notifications: &mut self.notifications,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        let first = next_session_id();
        let second = next_session_id();
        assert_ne!(first, second);
        assert!(second > first);
    }
}
