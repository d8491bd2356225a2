//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use crate::config::Config;
pub use crate::error::Error;
