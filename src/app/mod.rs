// SPDX-License-Identifier: MPL-2.0
//! Application bootstrap.
//!
//! Startup runs exactly once, in this order:
//!
//! 1. resolve the display locale from the preference store,
//! 2. build the message catalog and the localization engine (fallback `en`),
//! 3. construct the UI root,
//! 4. attach localization to the [`Capabilities`] container,
//! 5. attach the database binding to the same container,
//! 6. mount the root onto `#app`.
//!
//! [`Bootstrap::run`] consumes the bootstrap, so a second run cannot be
//! written. Components never reach for globals: every callback of [`Root`]
//! receives the capabilities by reference.

mod message;
mod mount;
pub mod paths;

pub use message::{Flags, Message};
pub use mount::{IcedMount, Mount, MountPoint};

use crate::backend::{DatabaseBinding, DatabaseClient};
use crate::config;
use crate::error::Result;
use crate::i18n::{self, Catalog, I18n, LocaleTag, FALLBACK_LOCALE};
use crate::preferences::{FileStore, PreferenceStore, LOCALE_KEY};
use crate::ui::home::HomeRoot;
use iced::{Element, Task};
use std::fmt;

/// Shared services made available to every component of the UI tree.
pub struct Capabilities {
    i18n: I18n,
    database: DatabaseBinding,
    preferences: Box<dyn PreferenceStore>,
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("i18n", &self.i18n)
            .field("database", &self.database.client().endpoint().as_str())
            .finish()
    }
}

impl Capabilities {
    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    pub fn database(&self) -> &DatabaseBinding {
        &self.database
    }

    pub fn preferences(&self) -> &dyn PreferenceStore {
        self.preferences.as_ref()
    }

    /// Switches the display language and remembers it for the next start.
    ///
    /// The switch takes effect even if the preference cannot be written.
    pub fn change_locale(&mut self, locale: LocaleTag) {
        tracing::info!(%locale, "changing display language");
        if let Err(error) = self.preferences.set(LOCALE_KEY, locale.as_str()) {
            tracing::warn!(%error, "failed to persist locale preference");
        }
        self.i18n.set_locale(locale);
    }
}

/// Top of the UI tree. The trial screens plug in here.
pub trait Root {
    fn title(&self, capabilities: &Capabilities) -> String;

    fn view<'a>(&'a self, capabilities: &'a Capabilities) -> Element<'a, Message>;

    fn update(&mut self, capabilities: &mut Capabilities, message: Message) -> Task<Message> {
        match message {
            Message::LanguageSelected(locale) => capabilities.change_locale(locale),
        }
        Task::none()
    }
}

/// One-shot startup sequence.
pub struct Bootstrap {
    preferences: Box<dyn PreferenceStore>,
    database: DatabaseClient,
    locale_override: Option<LocaleTag>,
}

impl fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bootstrap")
            .field("database", &self.database.endpoint().as_str())
            .field("locale_override", &self.locale_override)
            .finish()
    }
}

impl Bootstrap {
    pub fn new(preferences: impl PreferenceStore + 'static, database: DatabaseClient) -> Self {
        Self {
            preferences: Box::new(preferences),
            database,
            locale_override: None,
        }
    }

    /// Uses `locale` for this run instead of the stored preference. The
    /// override is not persisted.
    pub fn with_locale_override(mut self, locale: Option<LocaleTag>) -> Self {
        self.locale_override = locale;
        self
    }

    /// Runs the startup sequence and hands the configured tree to `mount`.
    pub fn run<M, F>(self, root: F, mount: M) -> Result<M::Output>
    where
        M: Mount,
        F: FnOnce() -> Box<dyn Root>,
    {
        let locale = match self.locale_override {
            Some(locale) => locale,
            None => i18n::resolve_locale(self.preferences.as_ref()),
        };
        tracing::info!(%locale, "resolved display locale");

        let catalog = Catalog::build()?;
        if let Err(error) = catalog.check_parity() {
            tracing::warn!(%error, "message catalogs are out of parity");
        }
        let i18n = I18n::new(locale, LocaleTag::new(FALLBACK_LOCALE), catalog);

        let root = root();

        let capabilities = Capabilities {
            i18n,
            database: DatabaseBinding::new(self.database),
            preferences: self.preferences,
        };
        tracing::info!(
            endpoint = %capabilities.database.client().endpoint(),
            "capabilities attached"
        );

        let target = MountPoint::parse(MountPoint::APP_SELECTOR)?;
        tracing::info!(target = %target, "mounting");
        mount.mount(&target, root, capabilities)
    }
}

/// Entry point used by `main.rs`: loads preferences and configuration, then
/// mounts the home screen in a window.
pub fn run(flags: Flags) -> Result<()> {
    paths::init_cli_override(flags.config_dir);

    let (preferences, warning) = FileStore::load();
    if let Some(warning) = warning {
        tracing::warn!(%warning, "starting with empty preferences");
    }

    let url = config::resolve_database_url(flags.db_url)?;
    let database = DatabaseClient::new(&url)?;

    Bootstrap::new(preferences, database)
        .with_locale_override(flags.lang.map(LocaleTag::new))
        .run(|| Box::new(HomeRoot::default()), IcedMount)
}
