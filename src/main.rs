// SPDX-License-Identifier: MPL-2.0
use abx_tester::app::{self, Flags};
use abx_tester::error::{Error, Result};
use std::process::ExitCode;
use tracing_subscriber::prelude::*;

const DEFAULT_LOG_FILTER: &str = "abx_tester=info";

fn main() -> ExitCode {
    init_tracing();

    let result = parse_flags().and_then(app::run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "abx_tester failed to start");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn parse_flags() -> Result<Flags> {
    let mut args = pico_args::Arguments::from_env();
    let invalid = |e: pico_args::Error| Error::Config(e.to_string());

    let flags = Flags {
        lang: args.opt_value_from_str("--lang").map_err(invalid)?,
        db_url: args.opt_value_from_str("--db-url").map_err(invalid)?,
        config_dir: args.opt_value_from_str("--config-dir").map_err(invalid)?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unexpected arguments");
    }
    Ok(flags)
}
