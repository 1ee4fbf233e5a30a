// SPDX-License-Identifier: MPL-2.0
//! Application root state: the sidebar, the active page and the overlays
//! shared by every page.
//!
//! Only one page is alive at a time. Switching pages releases whatever the
//! previous page held (camera, players) and builds the new page from scratch.

pub mod config;
mod message;
pub mod page;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use page::Page;

use crate::i18n::I18n;
use crate::ui::loading::LoadingOverlay;
use crate::ui::notifications::{self, Notification};
use crate::ui::pages::{camera, gallery, music, tools, video};
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

/// State of the page currently shown.
pub(crate) enum ActivePage {
    Home,
    Gallery(gallery::State),
    Camera(camera::State),
    Video(video::State),
    Music(music::State),
    Tools(tools::State),
    Settings,
}

impl ActivePage {
    fn page(&self) -> Page {
        match self {
            ActivePage::Home => Page::Home,
            ActivePage::Gallery(_) => Page::Gallery,
            ActivePage::Camera(_) => Page::Camera,
            ActivePage::Video(_) => Page::Video,
            ActivePage::Music(_) => Page::Music,
            ActivePage::Tools(_) => Page::Tools,
            ActivePage::Settings => Page::Settings,
        }
    }
}

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: config::Config,
    /// Directory settings are written to; `None` uses the platform default.
    config_dir: Option<PathBuf>,
    img_dir: PathBuf,
    active: ActivePage,
    loading: LoadingOverlay,
    notifications: notifications::Manager,
    theme_mode: ThemeMode,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("page", &self.active.page())
            .field("img_dir", &self.img_dir)
            .field("loading", &self.loading.is_visible())
            .finish()
    }
}

/// Builds the main window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(config::WINDOW_DEFAULT_WIDTH, config::WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(
            config::MIN_WINDOW_WIDTH,
            config::MIN_WINDOW_HEIGHT,
        )),
        position: window::Position::Centered,
        // Close requests go through `Message::WindowCloseRequested` so devices
        // are released before the window goes away.
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot; the flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads settings and translations and opens on the home page.
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let config_dir = flags.config_dir.map(PathBuf::from);
        let (config, warning) = config::load_with_override(config_dir.clone());
        let i18n = I18n::new(flags.lang, &config);
        let img_dir = match flags.img_dir {
            Some(dir) => PathBuf::from(dir),
            None => paths::get_img_dir(config.gallery.folder.as_deref()),
        };
        tracing::info!(
            locale = %i18n.current_locale(),
            img_dir = %img_dir.display(),
            "starting"
        );

        let mut notifications = notifications::Manager::new();
        if let Some(key) = warning {
            notifications.push(Notification::warning(key));
        }

        let app = App {
            i18n,
            theme_mode: config.general.theme_mode,
            config,
            config_dir,
            img_dir,
            active: ActivePage::Home,
            loading: LoadingOverlay::new(),
            notifications,
        };
        (app, Task::none())
    }

    fn title(&self) -> String {
        self.i18n.tr("app-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    /// The page currently shown.
    #[must_use]
    pub fn current_page(&self) -> Page {
        self.active.page()
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::subscription(subscription::SubscriptionContext {
            active: &self.active,
            loading: &self.loading,
            notifications: &self.notifications,
        })
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            active: &self.active,
            loading: &self.loading,
            notifications: &self.notifications,
            theme_mode: self.theme_mode,
        })
    }
}
