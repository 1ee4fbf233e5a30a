// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! Short confirmations and failures are pushed onto a [`Manager`] and shown
//! in the bottom-right corner without blocking the page.
//!
//! ```ignore
//! manager.push(Notification::info("notify-file-created").with_arg("path", path));
//! let overlay = Toast::view_overlay(&manager, &i18n).map(Message::Notification);
//! ```
//!
//! Success and info toasts close after 3s, warnings after 5s, and errors stay
//! until dismissed. At most three are visible; the rest wait in a queue.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
