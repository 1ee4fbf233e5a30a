// SPDX-License-Identifier: MPL-2.0
//! Landing page.

use crate::i18n::I18n;
use crate::ui::design_tokens::{spacing, typography};
use iced::widget::{center, column, text};
use iced::{Alignment, Element};

pub fn view<'a, Message: 'a>(i18n: &I18n) -> Element<'a, Message> {
    center(
        column![
            text(i18n.tr("home-welcome")).size(typography::TITLE_LG),
            text(i18n.tr("home-subtitle")).size(typography::BODY_LG),
        ]
        .spacing(spacing::MD)
        .align_x(Alignment::Center),
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn welcome_heading_is_translated() {
        let i18n = I18n::new(Some("en-US".into()), &Config::default());
        assert_eq!(i18n.tr("home-welcome"), "✨ Welcome to the Ultimate GUI ✨");
        let _element: Element<'_, ()> = view(&i18n);
    }
}
