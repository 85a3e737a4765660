// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ConfigError;
use crate::observability::messages::config::{ManifestLoaded, ManifestRejected};
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A registry manifest: the modules to declare up front.
///
/// It is typically loaded from a YAML file.
///
/// # Fields
/// * `log_filter` - `tracing` filter used when `RUST_LOG` is unset (optional)
/// * `modules` - module entries, registered in order
///
/// # Example
/// ```yaml
/// log_filter: debug
/// modules:
///   - path: Todo.Application
///   - path: Todo::Version
///     object: "1.0.0"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub log_filter: Option<String>,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

/// One module declaration.
///
/// Without `object` the entry declares a constructible module; with it the
/// value is stored verbatim. An explicit `object: null` counts as absent.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModuleEntry {
    pub path: String,
    #[serde(default)]
    pub object: Option<serde_json::Value>,
}

/// Parse a manifest from YAML text
pub fn parse_config(content: &str) -> Result<RegistryConfig, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Load a manifest from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RegistryConfig, ConfigError> {
    let source = path.as_ref().display().to_string();
    let content = fs::read_to_string(path)?;
    let cfg = parse_config(&content)?;

    ManifestLoaded {
        source: &source,
        module_count: cfg.modules.len(),
    }
    .log();

    Ok(cfg)
}

/// Load and validate a manifest from a YAML file
///
/// Every entry's path must parse and no two entries may resolve to the same
/// canonical path.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<RegistryConfig, ConfigError> {
    let source = path.as_ref().display().to_string();
    let cfg = load_config(path)?;

    if let Err(errors) = crate::config::validate_manifest(&cfg) {
        ManifestRejected {
            source: &source,
            error_count: errors.len(),
        }
        .log();
        return Err(ConfigError::Validation(errors));
    }

    Ok(cfg)
}
