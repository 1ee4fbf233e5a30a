// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations live in `assets/i18n/*.ftl` and are embedded at build time.
//! The active locale is chosen from the `--lang` flag, then `settings.toml`,
//! then the operating system, and finally `en-US`.

pub mod fluent;

pub use fluent::I18n;
