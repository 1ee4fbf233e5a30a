// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, radius, shadow};
use crate::ui::theming::ColorScheme;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Generic panel surface.
///
/// Derived from the active theme background with a slight transparency.
pub fn panel(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SURFACE,
            ..base
        })),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn sidebar(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(
            ColorScheme::for_theme(theme).sidebar_background,
        )),
        ..Default::default()
    }
}

/// Read-only output pane of the tools page.
pub fn log_pane(theme: &Theme) -> container::Style {
    let scheme = ColorScheme::for_theme(theme);
    container::Style {
        background: Some(Background::Color(scheme.log_background)),
        text_color: Some(scheme.log_text),
        border: Border {
            color: theme.extended_palette().background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Full-window backdrop behind the loading overlay and prompts.
pub fn backdrop(theme: &Theme) -> container::Style {
    let scheme = ColorScheme::for_theme(theme);
    container::Style {
        background: Some(Background::Color(scheme.overlay_background)),
        text_color: Some(scheme.overlay_text),
        ..Default::default()
    }
}

/// Card floating on top of the backdrop.
pub fn modal(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        text_color: Some(palette.background.base.text),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}

/// Inline error block (image decode failures).
pub fn error_text(theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(theme.palette().danger),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_is_translucent() {
        let style = backdrop(&Theme::Light);
        match style.background {
            Some(Background::Color(color)) => assert!(color.a > 0.0 && color.a < 1.0),
            other => panic!("unexpected background {other:?}"),
        }
    }

    #[test]
    fn panel_uses_surface_opacity() {
        match panel(&Theme::Dark).background {
            Some(Background::Color(color)) => assert_eq!(color.a, opacity::SURFACE),
            other => panic!("unexpected background {other:?}"),
        }
    }
}
