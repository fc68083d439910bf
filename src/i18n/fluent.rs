// SPDX-License-Identifier: MPL-2.0
use super::{Catalog, LocaleTag, FALLBACK_LOCALE};
use fluent_bundle::{FluentArgs, FluentValue};
use std::fmt;

/// Placeholder values substituted into a message at display time.
///
/// Named values fill `{ $name }`. Positional values fill `{ $arg0 }`,
/// `{ $arg1 }`, ... in order.
#[derive(Default)]
pub struct Args {
    inner: FluentArgs<'static>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a named placeholder.
    pub fn with(mut self, name: &str, value: impl Into<FluentValue<'static>>) -> Self {
        self.inner.set(name.to_string(), value);
        self
    }

    /// Binds `values` to `arg0`, `arg1`, ... in order.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FluentValue<'static>>,
    {
        let mut args = Self::new();
        for (index, value) in values.into_iter().enumerate() {
            args.inner.set(format!("arg{index}"), value);
        }
        args
    }

    fn is_empty(&self) -> bool {
        self.inner.iter().next().is_none()
    }
}

/// Localization engine shared with the whole UI tree.
pub struct I18n {
    catalog: Catalog,
    current_locale: LocaleTag,
    fallback_locale: LocaleTag,
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("current_locale", &self.current_locale)
            .field("fallback_locale", &self.fallback_locale)
            .finish()
    }
}

impl I18n {
    pub fn new(locale: LocaleTag, fallback_locale: LocaleTag, catalog: Catalog) -> Self {
        if !catalog.contains_locale(&locale) {
            tracing::warn!(%locale, fallback = %fallback_locale, "active locale has no catalog");
        }
        Self {
            catalog,
            current_locale: locale,
            fallback_locale,
        }
    }

    /// Engine over the embedded catalog with `"en"` as fallback.
    pub fn with_locale(locale: LocaleTag) -> crate::error::Result<Self> {
        Ok(Self::new(
            locale,
            LocaleTag::new(FALLBACK_LOCALE),
            Catalog::build()?,
        ))
    }

    pub fn current_locale(&self) -> &LocaleTag {
        &self.current_locale
    }

    pub fn fallback_locale(&self) -> &LocaleTag {
        &self.fallback_locale
    }

    pub fn available_locales(&self) -> Vec<LocaleTag> {
        self.catalog.locales()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Switches the active locale. Unknown tags are accepted and fall back
    /// per key.
    pub fn set_locale(&mut self, locale: LocaleTag) {
        self.current_locale = locale;
    }

    pub fn tr(&self, key: &str) -> String {
        self.tr_with(key, &Args::new())
    }

    /// Renders `key` with `args`, consulting the active locale first and the
    /// fallback locale second. Returns the key itself when neither has it.
    pub fn tr_with(&self, key: &str, args: &Args) -> String {
        if let Some(value) = self.format(&self.current_locale, key, args) {
            return value;
        }
        if let Some(value) = self.format(&self.fallback_locale, key, args) {
            tracing::debug!(key, locale = %self.current_locale, "using fallback locale");
            return value;
        }
        tracing::warn!(key, locale = %self.current_locale, "missing translation");
        key.to_string()
    }

    fn format(&self, locale: &LocaleTag, key: &str, args: &Args) -> Option<String> {
        let bundle = self.catalog.bundle(locale)?;
        let message = bundle.get_message(key)?;
        let pattern = message.value()?;
        let fluent_args = (!args.is_empty()).then_some(&args.inner);

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, fluent_args, &mut errors);
        if !errors.is_empty() {
            tracing::warn!(key, %locale, ?errors, "message formatted with errors");
        }
        Some(value.into_owned())
    }
}
