// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Timers only run while something needs them: the spinner while the loading
//! overlay is up, the progress ticker while an operation drives it, and the
//! toast clock while notifications are shown.

use super::{ActivePage, Message};
use crate::config::SPINNER_INTERVAL;
use crate::ui::loading::LoadingOverlay;
use crate::ui::notifications::{self, NotificationMessage};
use iced::{event, time, Subscription};
use std::time::Duration;

/// Interval at which toast auto-dismiss timers are checked.
const NOTIFICATION_TICK: Duration = Duration::from_millis(100);

pub(super) struct SubscriptionContext<'a> {
    pub active: &'a ActivePage,
    pub loading: &'a LoadingOverlay,
    pub notifications: &'a notifications::Manager,
}

pub(super) fn subscription(ctx: SubscriptionContext<'_>) -> Subscription<Message> {
    let mut subscriptions = vec![window_events(), page_subscription(ctx.active)];

    if ctx.loading.is_visible() {
        subscriptions.push(time::every(SPINNER_INTERVAL).map(|_| Message::SpinnerTick));
    }
    if let Some(interval) = ctx.loading.ticker_interval() {
        subscriptions.push(time::every(interval).map(|_| Message::ProgressTick));
    }
    if ctx.notifications.has_notifications() {
        subscriptions.push(
            time::every(NOTIFICATION_TICK).map(|_| Message::Notification(NotificationMessage::Tick)),
        );
    }

    Subscription::batch(subscriptions)
}

/// Routes window close requests so resources are released first.
fn window_events() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| match event {
        event::Event::Window(iced::window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        _ => None,
    })
}

fn page_subscription(active: &ActivePage) -> Subscription<Message> {
    match active {
        ActivePage::Camera(state) => state.subscription().map(Message::Camera),
        ActivePage::Video(state) => state.subscription().map(Message::Video),
        ActivePage::Music(state) => state.subscription().map(Message::Music),
        ActivePage::Home | ActivePage::Gallery(_) | ActivePage::Tools(_) | ActivePage::Settings => {
            Subscription::none()
        }
    }
}
