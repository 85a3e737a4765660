// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while registering or invoking modules.
//!
//! A path that simply does not resolve is not an error: `fetch` and `run`
//! report it as `None`. These variants cover malformed input and wrapper
//! failures only.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The namespace path could not be split into valid components.
    #[error("Invalid namespace path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// A wrapper outlived the registry it was registered in.
    #[error("Wrapper '{path}' is detached from its registry")]
    Detached { path: String },

    /// A wrapper definer rejected its arguments.
    #[error("Definer for '{path}' failed: {reason}")]
    Definer { path: String, reason: String },
}

impl RegistryError {
    pub fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        RegistryError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
