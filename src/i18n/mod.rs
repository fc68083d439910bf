// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module provides localization using the Fluent localization system.
//!
//! # Features
//!
//! - Locale resolution from the persisted `locale` preference
//! - Embedded `.ftl` catalogs for English and Indonesian
//! - Per-key fallback to English when the active locale lacks a message

pub mod catalog;
pub mod fluent;

pub use catalog::Catalog;
pub use fluent::{Args, I18n};

use crate::preferences::{PreferenceStore, LOCALE_KEY};
use std::fmt;

/// Locale used when no preference is stored.
pub const DEFAULT_LOCALE: &str = "en";

/// Locale consulted when the active locale lacks a message.
pub const FALLBACK_LOCALE: &str = "en";

/// Short string identifying a display language, such as `"en"` or `"id"`.
///
/// Tags are not validated: an unsupported tag is carried unchanged and only
/// falls back at lookup time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocaleTag(String);

impl LocaleTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LocaleTag {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocaleTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl PartialEq<str> for LocaleTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LocaleTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Reads the display locale from `store`.
///
/// A non-empty stored value is returned verbatim; anything else yields
/// [`DEFAULT_LOCALE`].
pub fn resolve_locale(store: &dyn PreferenceStore) -> LocaleTag {
    match store.get(LOCALE_KEY) {
        Some(saved) if !saved.is_empty() => LocaleTag::new(saved),
        _ => LocaleTag::default(),
    }
}
