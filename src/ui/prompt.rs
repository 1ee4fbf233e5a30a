// SPDX-License-Identifier: MPL-2.0
//! Single-line text input shown as a modal card.
//!
//! Native dialogs have no text entry, so names for new files, folders and
//! renames are asked here instead.

use crate::i18n::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{
    button, center, column, container, opaque, row, stack, text, text_input, Space,
};
use iced::{Element, Length};

/// What the entered text will be used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Purpose {
    NewFile,
    NewFolder,
    Rename(std::path::PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub purpose: Purpose,
    title: String,
    label: String,
    value: String,
}

#[derive(Debug, Clone)]
pub enum Message {
    Changed(String),
    Submit,
    Cancel,
}

/// Outcome of a prompt message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Trimmed, non-empty text.
    Submitted(Purpose, String),
    Cancelled,
}

impl Prompt {
    pub fn new(purpose: Purpose, title: String, label: String) -> Self {
        Self {
            purpose,
            title,
            label,
            value: String::new(),
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Changed(value) => {
                self.value = value;
                Event::None
            }
            Message::Submit => {
                let value = self.value.trim();
                if value.is_empty() {
                    Event::None
                } else {
                    Event::Submitted(self.purpose.clone(), value.to_string())
                }
            }
            Message::Cancel => Event::Cancelled,
        }
    }

    /// Stacks the prompt card over `base`, blocking input to it.
    pub fn view<'a, M: 'a>(
        &'a self,
        base: Element<'a, M>,
        i18n: &I18n,
        on_message: impl Fn(Message) -> M + 'a,
    ) -> Element<'a, M> {
        let input = text_input(&self.label, &self.value)
            .on_input(Message::Changed)
            .on_submit(Message::Submit)
            .padding(spacing::XS);

        let ok = button(text(i18n.tr("prompt-ok")))
            .style(styles::button::primary)
            .on_press_maybe((!self.value.trim().is_empty()).then_some(Message::Submit));
        let cancel = button(text(i18n.tr("prompt-cancel"))).on_press(Message::Cancel);

        let card = container(
            column![
                text(&self.title).size(typography::TITLE_SM),
                text(&self.label).size(typography::BODY),
                input,
                row![Space::new().width(Length::Fill), cancel, ok].spacing(spacing::XS),
            ]
            .spacing(spacing::SM),
        )
        .width(Length::Fixed(sizing::PROMPT_WIDTH))
        .padding(spacing::MD)
        .style(styles::container::modal);

        let backdrop: Element<'a, Message> = container(center(card))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::container::backdrop)
            .into();

        stack![base, opaque(backdrop.map(on_message))].into()
    }
}
