// SPDX-License-Identifier: MPL-2.0
//! Modal loading overlay with spinner glyph, message and progress bar.

use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{center, column, container, opaque, progress_bar, stack, text};
use iced::{Alignment, Element, Length};
use std::time::Duration;

/// Glyphs cycled while an operation runs.
pub const SPINNER_GLYPHS: [&str; 6] = ["⚙", "⚡", "⭐", "✨", "💫", "🔄"];

/// Fixed progress increment applied at a fixed interval while a worker runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressTicker {
    pub step: f32,
    pub interval: Duration,
}

/// Overlay state. Hidden when `message` is `None`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadingOverlay {
    message: Option<String>,
    progress: f32,
    step: usize,
    ticker: Option<ProgressTicker>,
}

impl LoadingOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the overlay with `message`, resetting progress and animation.
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.progress = 0.0;
        self.step = 0;
        self.ticker = None;
    }

    /// Like [`show`](Self::show), with progress advanced by `ticker` until
    /// the overlay is hidden or progress is set explicitly.
    pub fn show_ticking(&mut self, message: impl Into<String>, ticker: ProgressTicker) {
        self.show(message);
        self.ticker = Some(ticker);
    }

    pub fn hide(&mut self) {
        self.message = None;
        self.progress = 0.0;
        self.ticker = None;
    }

    /// Interval of the running progress ticker, if any.
    #[must_use]
    pub fn ticker_interval(&self) -> Option<Duration> {
        self.ticker.filter(|_| self.is_visible()).map(|t| t.interval)
    }

    /// Applies one ticker step.
    pub fn tick_progress(&mut self) {
        if let Some(ticker) = self.ticker.filter(|_| self.is_visible()) {
            self.advance(ticker.step);
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Sets progress, clamped to `0..=100`. Stops the ticker.
    pub fn set_progress(&mut self, value: f32) {
        self.ticker = None;
        self.progress = value.clamp(0.0, 100.0);
    }

    /// Adds `step` to the progress, stopping at 100.
    pub fn advance(&mut self, step: f32) {
        self.progress = (self.progress + step).clamp(0.0, 100.0);
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Moves the spinner to the next glyph.
    pub fn tick(&mut self) {
        if self.is_visible() {
            self.step = (self.step + 1) % SPINNER_GLYPHS.len();
        }
    }

    #[must_use]
    pub fn glyph(&self) -> &'static str {
        SPINNER_GLYPHS[self.step % SPINNER_GLYPHS.len()]
    }

    /// Stacks the overlay over `base`. Input to `base` is blocked while visible.
    pub fn view<'a, Message: Clone + 'static>(
        &'a self,
        base: Element<'a, Message>,
    ) -> Element<'a, Message> {
        let Some(message) = &self.message else {
            return base;
        };

        let rotation = AnimatedSpinner::rotation_for_step(self.step, SPINNER_GLYPHS.len());
        let spinner = stack![
            AnimatedSpinner::new(palette::PRIMARY_400, rotation).into_element(),
            center(text(self.glyph()).size(typography::TITLE_MD))
                .width(Length::Fixed(sizing::ICON_XL))
                .height(Length::Fixed(sizing::ICON_XL)),
        ];

        let content = column![
            spinner,
            text(message.as_str()).size(typography::TITLE_SM),
            progress_bar(0.0..=100.0, self.progress)
                .length(Length::Fixed(sizing::PROGRESS_WIDTH))
                .girth(sizing::PROGRESS_HEIGHT),
        ]
        .spacing(spacing::MD)
        .align_x(Alignment::Center);

        let backdrop = container(center(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::container::backdrop);

        stack![base, opaque(backdrop)].into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        let overlay = LoadingOverlay::new();
        assert!(!overlay.is_visible());
        assert_eq!(overlay.progress(), 0.0);
    }

    #[test]
    fn show_resets_progress() {
        let mut overlay = LoadingOverlay::new();
        overlay.show("first");
        overlay.set_progress(80.0);
        overlay.show("second");
        assert_eq!(overlay.message(), Some("second"));
        assert_eq!(overlay.progress(), 0.0);
    }

    #[test]
    fn progress_is_clamped() {
        let mut overlay = LoadingOverlay::new();
        overlay.show("Pinging");
        for _ in 0..10 {
            overlay.advance(25.0);
        }
        assert_eq!(overlay.progress(), 100.0);
        overlay.set_progress(-5.0);
        assert_eq!(overlay.progress(), 0.0);
    }

    #[test]
    fn glyphs_cycle_while_visible() {
        let mut overlay = LoadingOverlay::new();
        overlay.tick();
        assert_eq!(overlay.glyph(), "⚙");

        overlay.show("Loading");
        let seen: Vec<&str> = (0..SPINNER_GLYPHS.len())
            .map(|_| {
                overlay.tick();
                overlay.glyph()
            })
            .collect();
        assert_eq!(seen.last(), Some(&"⚙"));
        assert_eq!(seen[0], "⚡");
    }

    #[test]
    fn ticker_advances_until_full() {
        let mut overlay = LoadingOverlay::new();
        let ticker = ProgressTicker {
            step: 25.0,
            interval: Duration::from_millis(250),
        };
        overlay.show_ticking("Pinging", ticker);
        assert_eq!(overlay.ticker_interval(), Some(Duration::from_millis(250)));

        for _ in 0..6 {
            overlay.tick_progress();
        }
        assert_eq!(overlay.progress(), 100.0);
    }

    #[test]
    fn explicit_progress_stops_ticker() {
        let mut overlay = LoadingOverlay::new();
        overlay.show_ticking(
            "Fetching",
            ProgressTicker {
                step: 20.0,
                interval: Duration::from_millis(100),
            },
        );
        overlay.set_progress(100.0);
        assert_eq!(overlay.ticker_interval(), None);
        overlay.hide();
        overlay.tick_progress();
        assert_eq!(overlay.progress(), 0.0);
    }

    #[test]
    fn hide_clears_message() {
        let mut overlay = LoadingOverlay::new();
        overlay.show("Loading");
        overlay.hide();
        assert!(!overlay.is_visible());
        assert_eq!(overlay.message(), None);
    }
}
