// SPDX-License-Identifier: MPL-2.0
//! Client-local preference storage.
//!
//! Preferences are a flat string-to-string table. The production store keeps
//! them in `preferences.toml` inside the config directory (see
//! [`crate::app::paths`]) and writes through on every [`PreferenceStore::set`].
//! [`MemoryStore`] is the in-process double used by tests.
//!
//! # Examples
//!
//! ```no_run
//! use abx_tester::preferences::{FileStore, PreferenceStore, LOCALE_KEY};
//!
//! let (mut store, _warning) = FileStore::load();
//! store.set(LOCALE_KEY, "id").expect("failed to save preferences");
//! assert_eq!(store.get(LOCALE_KEY).as_deref(), Some("id"));
//! ```

use crate::app::paths;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Preferences file name within the config directory.
const PREFERENCES_FILE: &str = "preferences.toml";

/// Key under which the display locale is stored.
pub const LOCALE_KEY: &str = "locale";

/// String-valued key/value storage that survives restarts.
pub trait PreferenceStore {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preference store backed by a TOML file.
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Loads preferences from the default config directory.
    ///
    /// Returns the store and an optional warning. An unreadable or invalid
    /// file yields an empty store plus a warning instead of an error, so a
    /// corrupt file never blocks startup.
    pub fn load() -> (Self, Option<String>) {
        Self::load_with_override(None)
    }

    /// Loads preferences from a custom config directory.
    pub fn load_with_override(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = paths::get_app_config_dir_with_override(base_dir).map(|mut dir| {
            dir.push(PREFERENCES_FILE);
            dir
        }) else {
            return Self::without_file();
        };

        if !path.exists() {
            return (Self::at_path(path), None);
        }

        match Self::load_from_path(&path) {
            Ok(store) => (store, None),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "ignoring unreadable preferences");
                (Self::at_path(path), Some(error.to_string()))
            }
        }
    }

    /// Store used when no config directory can be determined. Values live
    /// only for this run.
    fn without_file() -> (Self, Option<String>) {
        let warning = "no config directory found; preferences will not be saved";
        (Self::default(), Some(warning.to_string()))
    }

    /// Loads preferences from an explicit file path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let values: BTreeMap<String, String> = toml::from_str(&content)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    /// Creates an empty store that will be written to `path`.
    pub fn at_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            values: BTreeMap::new(),
        }
    }

    /// File backing this store, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self.values).map_err(Error::from)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// Volatile preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper seeding one entry.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn set_then_load_round_trip_preserves_locale() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested = temp_dir.path().join("nested");

        let (mut store, warning) = FileStore::load_with_override(Some(nested.clone()));
        assert!(warning.is_none());
        store.set(LOCALE_KEY, "id").expect("failed to save preferences");

        let (reloaded, warning) = FileStore::load_with_override(Some(nested));
        assert!(warning.is_none());
        assert_eq!(reloaded.get(LOCALE_KEY).as_deref(), Some("id"));
    }

    #[test]
    fn missing_file_gives_empty_store_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (store, warning) = FileStore::load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert!(store.get(LOCALE_KEY).is_none());
        assert_eq!(
            store.path(),
            Some(temp_dir.path().join(PREFERENCES_FILE).as_path())
        );
    }

    #[test]
    fn invalid_file_gives_empty_store_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(PREFERENCES_FILE), "not = valid = toml")
            .expect("failed to write invalid toml");

        let (store, warning) = FileStore::load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_some());
        assert!(store.get(LOCALE_KEY).is_none());
    }

    #[test]
    fn set_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("deep").join("path").join(PREFERENCES_FILE);

        let mut store = FileStore::at_path(path.clone());
        store.set(LOCALE_KEY, "en").expect("set should create directories");
        assert!(path.exists());
    }

    #[test]
    fn set_overwrites_previous_value() {
        let mut store = MemoryStore::new().with(LOCALE_KEY, "en");
        store.set(LOCALE_KEY, "id").expect("memory store never fails");
        assert_eq!(store.get(LOCALE_KEY).as_deref(), Some("id"));
    }

    #[test]
    fn store_without_config_dir_warns_that_values_are_not_saved() {
        let (mut store, warning) = FileStore::without_file();
        assert!(warning.is_some_and(|w| w.contains("will not be saved")));
        assert!(store.path().is_none());

        store.set(LOCALE_KEY, "id").expect("no file to write");
        assert_eq!(store.get(LOCALE_KEY).as_deref(), Some("id"));
    }

    #[test]
    fn pathless_store_keeps_values_in_memory() {
        let mut store = FileStore::default();
        store.set(LOCALE_KEY, "id").expect("no file to write");
        assert_eq!(store.get(LOCALE_KEY).as_deref(), Some("id"));
    }
}
