// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Follows the Elm-style "state down, messages up" pattern: each page in
//! [`pages`] owns its state and message type, and the application root maps
//! them into its own.
//!
//! # Shared Infrastructure
//!
//! - [`sidebar`] - Page navigation column
//! - [`loading`] - Blocking loading overlay with spinner and progress bar
//! - [`prompt`] - Modal single-line text input
//! - [`dialogs`] - Native message boxes and file pickers
//! - [`notifications`] - Toast notification system for user feedback
//! - [`widgets`] - Custom Iced widgets (spinner, video canvas)
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod dialogs;
pub mod loading;
pub mod notifications;
pub mod pages;
pub mod prompt;
pub mod sidebar;
pub mod styles;
pub mod theming;
pub mod widgets;
