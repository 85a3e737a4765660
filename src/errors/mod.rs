// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod registry;

pub use config::{ConfigError, ValidationError};
pub use registry::RegistryError;
