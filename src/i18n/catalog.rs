// SPDX-License-Identifier: MPL-2.0
//! Immutable message catalog built from the embedded `.ftl` files.
//!
//! Every `<tag>.ftl` under `assets/i18n/` becomes one Fluent bundle. The
//! catalog only stores templates; placeholder substitution happens in
//! [`super::I18n`] at display time.

use super::{LocaleTag, FALLBACK_LOCALE};
use crate::error::{Error, Result};
use fluent_bundle::{FluentBundle, FluentResource};
use fluent_syntax::ast;
use rust_embed::RustEmbed;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

pub struct Catalog {
    bundles: BTreeMap<LocaleTag, FluentBundle<FluentResource>>,
    keys: BTreeMap<LocaleTag, BTreeSet<String>>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("locales", &self.locales())
            .finish()
    }
}

impl Catalog {
    /// Builds the catalog from the `.ftl` files embedded in the binary.
    pub fn build() -> Result<Self> {
        let mut sources = Vec::new();
        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(tag) = filename.strip_suffix(".ftl") else {
                continue;
            };
            if let Some(content) = Asset::get(filename) {
                let source = String::from_utf8_lossy(content.data.as_ref()).into_owned();
                sources.push((LocaleTag::new(tag), source));
            }
        }
        Self::from_sources(sources)
    }

    /// Builds a catalog from `(locale, ftl source)` pairs.
    pub fn from_sources<I>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (LocaleTag, String)>,
    {
        let mut bundles = BTreeMap::new();
        let mut keys = BTreeMap::new();

        for (tag, source) in sources {
            let (bundle, message_keys) = parse_locale(&tag, source)?;
            tracing::debug!(locale = %tag, messages = message_keys.len(), "loaded catalog");
            bundles.insert(tag.clone(), bundle);
            keys.insert(tag, message_keys);
        }

        Ok(Self { bundles, keys })
    }

    /// Locales present in the catalog, sorted.
    pub fn locales(&self) -> Vec<LocaleTag> {
        self.bundles.keys().cloned().collect()
    }

    pub fn contains_locale(&self, tag: &LocaleTag) -> bool {
        self.bundles.contains_key(tag)
    }

    /// Message keys defined for `tag`.
    pub fn keys(&self, tag: &LocaleTag) -> Option<&BTreeSet<String>> {
        self.keys.get(tag)
    }

    pub(crate) fn bundle(&self, tag: &LocaleTag) -> Option<&FluentBundle<FluentResource>> {
        self.bundles.get(tag)
    }

    /// Checks that every locale defines exactly the fallback locale's keys.
    pub fn check_parity(&self) -> Result<()> {
        let fallback = LocaleTag::new(FALLBACK_LOCALE);
        let Some(reference) = self.keys.get(&fallback) else {
            return Err(Error::Catalog(format!(
                "fallback locale '{}' has no catalog",
                fallback
            )));
        };

        for (tag, keys) in &self.keys {
            let missing: Vec<&str> = reference.difference(keys).map(String::as_str).collect();
            let extra: Vec<&str> = keys.difference(reference).map(String::as_str).collect();
            if !missing.is_empty() || !extra.is_empty() {
                return Err(Error::Catalog(format!(
                    "locale '{}' differs from '{}': missing {:?}, extra {:?}",
                    tag, fallback, missing, extra
                )));
            }
        }
        Ok(())
    }
}

fn parse_locale(
    tag: &LocaleTag,
    source: String,
) -> Result<(FluentBundle<FluentResource>, BTreeSet<String>)> {
    let resource = FluentResource::try_new(source).map_err(|(_, errors)| {
        Error::Catalog(format!("failed to parse {}.ftl: {:?}", tag, errors))
    })?;

    let keys = resource
        .entries()
        .filter_map(|entry| match entry {
            ast::Entry::Message(message) => Some(message.id.name.to_string()),
            _ => None,
        })
        .collect();

    let langid: LanguageIdentifier = tag
        .as_str()
        .parse()
        .map_err(|_| Error::Catalog(format!("'{}' is not a language identifier", tag)))?;

    let mut bundle = FluentBundle::new(vec![langid]);
    bundle.set_use_isolating(false);
    bundle
        .add_resource(resource)
        .map_err(|errors| Error::Catalog(format!("failed to load {}.ftl: {:?}", tag, errors)))?;

    Ok((bundle, keys))
}
