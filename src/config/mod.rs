// SPDX-License-Identifier: MPL-2.0
//! Environment configuration for the realtime database endpoint.
//!
//! The endpoint URL is resolved in this order, skipping empty values:
//! 1. `--db-url` CLI argument
//! 2. `ABX_DB_URL` environment variable at runtime
//! 3. `ABX_DB_URL` captured at build time
//!
//! # Examples
//!
//! ```no_run
//! use abx_tester::config;
//!
//! let url = config::resolve_database_url(None).expect("database URL not configured");
//! println!("connecting to {url}");
//! ```

use crate::error::{BackendError, Result};

/// Environment variable carrying the database endpoint URL.
pub const ENV_DB_URL: &str = "ABX_DB_URL";

/// Endpoint captured when the binary was compiled, if any.
const BUILD_DB_URL: Option<&str> = option_env!("ABX_DB_URL");

/// Resolves the database endpoint URL from the CLI value, the environment
/// and the build-time value.
pub fn resolve_database_url(cli_value: Option<String>) -> Result<String> {
    let runtime_value = std::env::var(ENV_DB_URL).ok();
    resolve_database_url_from(cli_value, runtime_value, BUILD_DB_URL)
}

/// Pure form of [`resolve_database_url`].
pub fn resolve_database_url_from(
    cli_value: Option<String>,
    runtime_value: Option<String>,
    build_value: Option<&str>,
) -> Result<String> {
    let candidate = cli_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| runtime_value.filter(|v| !v.trim().is_empty()))
        .or_else(|| {
            build_value
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        });

    match candidate {
        Some(url) => Ok(url.trim().to_string()),
        None => Err(BackendError::MissingUrl.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::paths::tests::ENV_MUTEX;
    use crate::error::Error;

    #[test]
    fn cli_value_wins_over_environment() {
        let url = resolve_database_url_from(
            Some("https://cli.example".into()),
            Some("https://env.example".into()),
            Some("https://build.example"),
        )
        .expect("url should resolve");
        assert_eq!(url, "https://cli.example");
    }

    #[test]
    fn runtime_env_wins_over_build_value() {
        let url = resolve_database_url_from(
            None,
            Some("https://env.example".into()),
            Some("https://build.example"),
        )
        .expect("url should resolve");
        assert_eq!(url, "https://env.example");
    }

    #[test]
    fn build_value_is_last_resort() {
        let url = resolve_database_url_from(None, None, Some("https://build.example"))
            .expect("url should resolve");
        assert_eq!(url, "https://build.example");
    }

    #[test]
    fn empty_values_are_skipped() {
        let url = resolve_database_url_from(
            Some("".into()),
            Some("   ".into()),
            Some("https://build.example"),
        )
        .expect("url should resolve");
        assert_eq!(url, "https://build.example");
    }

    #[test]
    fn nothing_configured_is_missing_url() {
        let err = resolve_database_url_from(None, Some(String::new()), None).unwrap_err();
        assert!(matches!(err, Error::Backend(BackendError::MissingUrl)));
    }

    #[test]
    fn reads_runtime_environment_variable() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DB_URL, "https://runtime.example");

        let url = resolve_database_url(None).expect("url should resolve");
        assert_eq!(url, "https://runtime.example");

        std::env::remove_var(ENV_DB_URL);
    }
}
