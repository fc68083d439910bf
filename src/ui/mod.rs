// SPDX-License-Identifier: MPL-2.0
//! User interface components.

pub mod home;
pub mod settings;
