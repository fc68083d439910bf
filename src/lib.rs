// SPDX-License-Identifier: MPL-2.0
//! `abx_tester` is the bootstrap of a small ABX listening-test tool.
//!
//! It resolves the display locale from a persisted preference, builds the
//! English and Indonesian message catalogs, prepares a client for the
//! realtime database, and mounts the UI root with both services attached.

pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub mod i18n;
pub mod preferences;
pub mod ui;
