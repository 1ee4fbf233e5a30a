// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Layers, bottom to top: sidebar and page, toasts, loading overlay.

use super::{ActivePage, Message};
use crate::i18n::I18n;
use crate::ui::design_tokens::spacing;
use crate::ui::loading::LoadingOverlay;
use crate::ui::notifications::{self, Toast};
use crate::ui::pages::{home, settings};
use crate::ui::sidebar;
use crate::ui::theming::ThemeMode;
use iced::widget::{container, row, stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub active: &'a ActivePage,
    pub loading: &'a LoadingOverlay,
    pub notifications: &'a notifications::Manager,
    pub theme_mode: ThemeMode,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let page = view_page(ctx.active, ctx.i18n, ctx.theme_mode);

    let nav = sidebar::view(
        sidebar::ViewContext {
            i18n: ctx.i18n,
            current: ctx.active.page(),
        },
        Message::Navigate,
    );

    let content = container(page)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::LG);

    let base: Element<'_, Message> = row![nav, content].into();

    let base: Element<'_, Message> = if ctx.notifications.has_notifications() {
        stack![
            base,
            Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification)
        ]
        .into()
    } else {
        base
    };

    ctx.loading.view(base)
}

fn view_page<'a>(active: &'a ActivePage, i18n: &'a I18n, theme_mode: ThemeMode) -> Element<'a, Message> {
    match active {
        ActivePage::Home => home::view(i18n),
        ActivePage::Gallery(state) => state.view(i18n).map(Message::Gallery),
        ActivePage::Camera(state) => state.view(i18n).map(Message::Camera),
        ActivePage::Video(state) => state.view(i18n).map(Message::Video),
        ActivePage::Music(state) => state.view(i18n).map(Message::Music),
        ActivePage::Tools(state) => state.view(i18n).map(Message::Tools),
        ActivePage::Settings => settings::view(i18n, theme_mode).map(Message::Settings),
    }
}
