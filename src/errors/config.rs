// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::RegistryError;
use thiserror::Error;

/// Errors found while validating a registry manifest
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A manifest entry carries a path that does not parse
    #[error("Module entry {index} has an invalid path '{path}': {reason}")]
    InvalidPath {
        index: usize,
        path: String,
        reason: String,
    },
    /// Two manifest entries resolve to the same canonical path
    #[error("Duplicate module path '{path}' (entries {first} and {second})")]
    DuplicatePath {
        path: String,
        first: usize,
        second: usize,
    },
}

/// Errors that can occur while loading a manifest into a registry
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Manifest validation failed:\n{}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
