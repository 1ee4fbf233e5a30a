// SPDX-License-Identifier: MPL-2.0
//! `ultimate_gui` is a tabbed desktop utility built with the Iced GUI framework.
//!
//! A sidebar switches between a home page, an image gallery, a webcam page
//! with photo capture, video and music players, a page of file and network
//! tools, and settings. Translations use Fluent; preferences are stored in a
//! TOML file.

pub mod app;
pub use app::config;
pub mod camera;
pub mod error;
pub mod i18n;
pub mod media;
pub mod player;
pub mod tools;
pub mod ui;
pub mod worker;
