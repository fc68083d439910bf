// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::i18n::LocaleTag;

/// Messages consumed by [`super::Root::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The user picked a display language.
    LanguageSelected(LocaleTag),
}

/// Command-line flags collected by `main.rs`.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Display language for this run, overriding the stored preference.
    pub lang: Option<String>,
    /// Database endpoint URL, overriding the environment.
    pub db_url: Option<String>,
    /// Directory holding `preferences.toml`.
    pub config_dir: Option<String>,
}
