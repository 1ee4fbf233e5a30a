// SPDX-License-Identifier: MPL-2.0
//! Message handling for the application root.

use super::{config, ActivePage, App, Message, Page};
use crate::ui::notifications::Notification;
use crate::ui::pages::settings::{self, Effect};
use crate::ui::pages::{camera, gallery, music, tools, video, UpdateContext};
use iced::{window, Task};

pub(super) fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Navigate(page) => switch_page(app, page),
        Message::Settings(message) => apply_settings(app, settings::update(message)),
        Message::Notification(message) => {
            app.notifications.handle_message(&message);
            Task::none()
        }
        Message::SpinnerTick => {
            app.loading.tick();
            Task::none()
        }
        Message::ProgressTick => {
            app.loading.tick_progress();
            Task::none()
        }
        Message::WindowCloseRequested(id) => {
            tracing::info!("window close requested");
            cleanup_resources(app);
            window::close(id)
        }
        message => forward_to_page(app, message),
    }
}

/// Releases the current page's devices and players, then builds `page`.
///
/// Pages are always rebuilt, so selecting the current page again restarts it.
pub(super) fn switch_page(app: &mut App, page: Page) -> Task<Message> {
    cleanup_resources(app);
    tracing::debug!(from = ?app.active.page(), to = ?page, "switching page");

    let App {
        i18n,
        config,
        img_dir,
        active,
        loading,
        notifications,
        ..
    } = app;
    let ctx = UpdateContext {
        i18n,
        config,
        img_dir: img_dir.as_path(),
        loading,
        notifications,
    };

    let (next, task) = match page {
        Page::Home => (ActivePage::Home, Task::none()),
        Page::Gallery => {
            let mut state = gallery::State::new();
            let task = state.enter(&ctx).map(Message::Gallery);
            (ActivePage::Gallery(state), task)
        }
        Page::Camera => {
            let mut state = camera::State::new();
            let task = state.enter(&ctx).map(Message::Camera);
            (ActivePage::Camera(state), task)
        }
        Page::Video => (ActivePage::Video(video::State::new()), Task::none()),
        Page::Music => (ActivePage::Music(music::State::new()), Task::none()),
        Page::Tools => (ActivePage::Tools(tools::State::new(ctx.i18n)), Task::none()),
        Page::Settings => (ActivePage::Settings, Task::none()),
    };
    *active = next;
    task
}

/// Stops the camera and players held by the current page and hides the
/// loading overlay. Safe to call any number of times.
pub(super) fn cleanup_resources(app: &mut App) {
    let released = match &mut app.active {
        ActivePage::Camera(state) => state.release(),
        ActivePage::Video(state) => state.release(),
        ActivePage::Music(state) => state.release(),
        ActivePage::Home | ActivePage::Gallery(_) | ActivePage::Tools(_) | ActivePage::Settings => {
            false
        }
    };
    if released {
        tracing::info!(page = ?app.active.page(), "released page resources");
    }
    app.loading.hide();
}

fn forward_to_page(app: &mut App, message: Message) -> Task<Message> {
    let App {
        i18n,
        config,
        img_dir,
        active,
        loading,
        notifications,
        ..
    } = app;
    let mut ctx = UpdateContext {
        i18n,
        config,
        img_dir: img_dir.as_path(),
        loading,
        notifications,
    };

    match (active, message) {
        (ActivePage::Gallery(state), Message::Gallery(message)) => {
            state.update(message, &mut ctx).map(Message::Gallery)
        }
        (ActivePage::Camera(state), Message::Camera(message)) => {
            state.update(message, &mut ctx).map(Message::Camera)
        }
        (ActivePage::Video(state), Message::Video(message)) => {
            state.update(message, &mut ctx).map(Message::Video)
        }
        (ActivePage::Music(state), Message::Music(message)) => {
            state.update(message, &mut ctx).map(Message::Music)
        }
        (ActivePage::Tools(state), Message::Tools(message)) => {
            state.update(message, &mut ctx).map(Message::Tools)
        }
        // Late results from a page that has since been left.
        (active, message) => {
            tracing::debug!(page = ?active.page(), ?message, "dropping message for inactive page");
            Task::none()
        }
    }
}

fn apply_settings(app: &mut App, effect: Effect) -> Task<Message> {
    match effect {
        Effect::ThemeChanged(mode) => {
            app.theme_mode = mode;
            app.config.general.theme_mode = mode;
        }
        Effect::LanguageChanged(locale) => {
            app.config.general.language = Some(locale.to_string());
            app.i18n.set_locale(locale);
        }
    }
    if let Err(err) = config::save_with_override(&app.config, app.config_dir.clone()) {
        tracing::error!(%err, "failed to save settings");
        app.notifications.push(
            Notification::error("notification-config-save-error").with_arg("error", err.detail()),
        );
    }
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::ui::pages::camera::Message as CameraMessage;
    use crate::ui::theming::ThemeMode;

    #[test]
    fn navigation_builds_requested_page() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = test_app(&dir);
        for page in Page::ALL {
            let _ = update(&mut app, Message::Navigate(page));
            assert_eq!(app.current_page(), page);
        }
    }

    #[test]
    fn leaving_camera_releases_it_and_hides_loading() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = test_app(&dir);
        let _ = update(&mut app, Message::Navigate(Page::Camera));
        let _ = update(&mut app, Message::Camera(CameraMessage::AccessAnswered(true)));
        assert!(app.loading.is_visible());

        let _ = update(&mut app, Message::Navigate(Page::Home));
        assert_eq!(app.current_page(), Page::Home);
        assert!(!app.loading.is_visible());
    }

    #[test]
    fn close_request_releases_live_camera() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = test_app(&dir);
        let _ = update(&mut app, Message::Navigate(Page::Camera));
        let _ = update(&mut app, Message::Camera(CameraMessage::AccessAnswered(true)));
        let _ = update(&mut app, Message::Camera(CameraMessage::Open));
        match &app.active {
            ActivePage::Camera(state) => assert!(state.is_streaming()),
            _ => panic!("camera page expected"),
        }
        app.loading.show("Capturing...");

        let _ = update(&mut app, Message::WindowCloseRequested(window::Id::unique()));
        match &app.active {
            ActivePage::Camera(state) => assert!(!state.is_streaming()),
            _ => panic!("camera page expected"),
        }
        assert!(!app.loading.is_visible());
    }

    #[test]
    fn cleanup_is_idempotent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = test_app(&dir);
        let _ = update(&mut app, Message::Navigate(Page::Music));
        cleanup_resources(&mut app);
        cleanup_resources(&mut app);
        assert_eq!(app.current_page(), Page::Music);
        assert!(!app.loading.is_visible());
    }

    #[test]
    fn messages_for_other_pages_are_dropped() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = test_app(&dir);
        let _ = update(&mut app, Message::Camera(CameraMessage::AccessAnswered(true)));
        assert_eq!(app.current_page(), Page::Home);
        assert!(!app.loading.is_visible());
    }

    #[test]
    fn theme_choice_is_applied_and_saved() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = test_app(&dir);
        let _ = update(
            &mut app,
            Message::Settings(settings::Message::ThemeSelected(ThemeMode::Dark)),
        );
        assert_eq!(app.theme_mode, ThemeMode::Dark);

        let saved = config::load_from_path(&dir.path().join("config").join("settings.toml"))
            .expect("settings written");
        assert_eq!(saved.general.theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn language_choice_retranslates() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = test_app(&dir);
        let fr = "fr".parse().expect("valid tag");
        let _ = update(
            &mut app,
            Message::Settings(settings::Message::LanguageSelected(fr)),
        );
        assert_eq!(app.i18n.current_locale().to_string(), "fr");
        assert_eq!(app.config.general.language.as_deref(), Some("fr"));
    }
}
