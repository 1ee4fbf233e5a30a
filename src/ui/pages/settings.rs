// SPDX-License-Identifier: MPL-2.0
//! Settings page: theme and language selection.
//!
//! The page holds no state of its own. Choices are reported to the
//! application as an [`Effect`], which applies and persists them.

use crate::i18n::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::widget::{button, column, text, Column, Row};
use iced::{Alignment, Element, Length, Theme};
use unic_langid::LanguageIdentifier;

#[derive(Debug, Clone)]
pub enum Message {
    ThemeSelected(ThemeMode),
    LanguageSelected(LanguageIdentifier),
}

/// Change the application must apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ThemeChanged(ThemeMode),
    LanguageChanged(LanguageIdentifier),
}

pub fn update(message: Message) -> Effect {
    match message {
        Message::ThemeSelected(mode) => Effect::ThemeChanged(mode),
        Message::LanguageSelected(locale) => Effect::LanguageChanged(locale),
    }
}

/// Readable name of `locale`, falling back to its tag.
pub fn language_label(locale: &LanguageIdentifier, i18n: &I18n) -> String {
    let tag = locale.to_string();
    let translated = i18n.tr(&format!("language-name-{tag}"));
    if translated.starts_with("MISSING:") {
        tag
    } else {
        format!("{translated} ({tag})")
    }
}

fn choice_style(selected: bool) -> fn(&Theme, button::Status) -> button::Style {
    if selected {
        styles::button::nav_selected
    } else {
        styles::button::nav_unselected
    }
}

pub fn view<'a>(i18n: &I18n, theme_mode: ThemeMode) -> Element<'a, Message> {
    let themes = ThemeMode::ALL.iter().fold(Row::new().spacing(spacing::XS), |row, mode| {
        row.push(
            button(text(i18n.tr(mode.label_key())))
                .style(choice_style(*mode == theme_mode))
                .on_press(Message::ThemeSelected(*mode)),
        )
    });

    let languages = i18n
        .available_locales
        .iter()
        .fold(Column::new().spacing(spacing::XS), |column, locale| {
            let current = i18n.current_locale() == locale;
            column.push(
                button(text(language_label(locale, i18n)))
                    .width(Length::Fixed(260.0))
                    .style(choice_style(current))
                    .on_press(Message::LanguageSelected(locale.clone())),
            )
        });

    column![
        text(i18n.tr("settings-title")).size(typography::TITLE_MD),
        text(i18n.tr("settings-theme-label")).size(typography::BODY_LG),
        themes,
        text(i18n.tr("settings-language-label")).size(typography::BODY_LG),
        languages,
    ]
    .spacing(spacing::MD)
    .align_x(Alignment::Center)
    .width(Length::Fill)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn selections_become_effects() {
        assert_eq!(
            update(Message::ThemeSelected(ThemeMode::Dark)),
            Effect::ThemeChanged(ThemeMode::Dark)
        );
        let fr: LanguageIdentifier = "fr".parse().expect("valid tag");
        assert_eq!(
            update(Message::LanguageSelected(fr.clone())),
            Effect::LanguageChanged(fr)
        );
    }

    #[test]
    fn language_label_includes_tag() {
        let i18n = I18n::new(Some("en-US".into()), &Config::default());
        let fr: LanguageIdentifier = "fr".parse().expect("valid tag");
        assert_eq!(language_label(&fr, &i18n), "Français (fr)");
        let unknown: LanguageIdentifier = "de".parse().expect("valid tag");
        assert_eq!(language_label(&unknown, &i18n), "de");
    }

    #[test]
    fn heading_is_translated() {
        let i18n = I18n::new(Some("en-US".into()), &Config::default());
        assert_eq!(i18n.tr("settings-title"), "⚙️ Settings (Coming Soon)");
        let _element = view(&i18n, ThemeMode::System);
    }
}
