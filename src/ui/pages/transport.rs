// SPDX-License-Identifier: MPL-2.0
//! Play / Pause / Stop row shared by the video and music pages.

use crate::i18n::I18n;
use crate::player::{MediaPlayer, PlaybackState};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{button, column, row, text};
use iced::{Alignment, Element};

/// Messages the row emits.
pub struct Actions<M> {
    pub play: M,
    pub pause: M,
    pub stop: M,
}

/// Formats seconds as `m:ss`.
#[must_use]
pub fn format_position(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Status line under the controls, or `None` when idle.
pub fn status_line(player: &MediaPlayer, i18n: &I18n) -> Option<String> {
    match player.state() {
        PlaybackState::Loading => Some(i18n.tr("player-status-loading")),
        PlaybackState::Playing { position_secs } => Some(i18n.tr_with_args(
            "player-status-playing",
            &[("position", format_position(*position_secs).as_str())],
        )),
        PlaybackState::Paused { position_secs } => Some(i18n.tr_with_args(
            "player-status-paused",
            &[("position", format_position(*position_secs).as_str())],
        )),
        PlaybackState::Ended => Some(i18n.tr("player-status-ended")),
        PlaybackState::Stopped => None,
        PlaybackState::Error { message } => Some(message.clone()),
    }
}

/// Transport buttons. All are disabled until something is loaded.
pub fn view<'a, M: Clone + 'a>(
    player: Option<&MediaPlayer>,
    i18n: &I18n,
    actions: Actions<M>,
) -> Element<'a, M> {
    let state = player.map(MediaPlayer::state);
    let usable = state.is_some_and(|s| s.error_message().is_none());
    let playing = state.is_some_and(PlaybackState::is_playing);

    let controls = row![
        button(text(i18n.tr("player-play")))
            .style(styles::button::primary)
            .on_press_maybe((usable && !playing).then_some(actions.play)),
        button(text(i18n.tr("player-pause")))
            .style(styles::button::primary)
            .on_press_maybe(playing.then_some(actions.pause)),
        button(text(i18n.tr("player-stop")))
            .style(styles::button::primary)
            .on_press_maybe(usable.then_some(actions.stop)),
    ]
    .spacing(spacing::SM);

    let mut content = column![controls]
        .spacing(spacing::XS)
        .align_x(Alignment::Center);
    if let Some(status) = player.and_then(|p| status_line(p, i18n)) {
        content = content.push(text(status).size(typography::CAPTION));
    }
    content.into()
}
