// SPDX-License-Identifier: MPL-2.0
//! Left navigation column listing every page.

use crate::app::Page;
use crate::i18n::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, text, Column};
use iced::{Element, Length, Theme};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub current: Page,
}

/// Renders the sidebar; `on_select` maps a clicked page to a message.
pub fn view<'a, Message: Clone + 'a>(
    ctx: ViewContext<'a>,
    on_select: impl Fn(Page) -> Message,
) -> Element<'a, Message> {
    let title = text(ctx.i18n.tr("app-title")).size(typography::TITLE_MD);

    let mut entries = Column::new().spacing(spacing::XXS).push(title);
    for page in Page::ALL {
        let style: fn(&Theme, button::Status) -> button::Style = if page == ctx.current {
            styles::button::nav_selected
        } else {
            styles::button::nav_unselected
        };
        let entry = button(text(ctx.i18n.tr(page.label_key())).size(typography::BODY_LG))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::BUTTON_HEIGHT))
            .style(style)
            .on_press(on_select(page));
        entries = entries.push(entry);
    }

    container(entries)
        .width(Length::Fixed(sizing::SIDEBAR_WIDTH))
        .height(Length::Fill)
        .padding(spacing::SM)
        .style(styles::container::sidebar)
        .into()
}
