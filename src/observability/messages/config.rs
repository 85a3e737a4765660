// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for manifest loading and validation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A manifest was read and parsed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ManifestLoaded<'a> {
    pub source: &'a str,
    pub module_count: usize,
}

impl Display for ManifestLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded manifest '{}' with {} module entries",
            self.source, self.module_count
        )
    }
}

impl StructuredLog for ManifestLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            source = self.source,
            module_count = self.module_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "manifest_loaded",
            span_name = name,
            source = self.source,
            module_count = self.module_count,
        )
    }
}

/// A manifest failed validation.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ManifestRejected<'a> {
    pub source: &'a str,
    pub error_count: usize,
}

impl Display for ManifestRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Manifest '{}' failed validation with {} errors",
            self.source, self.error_count
        )
    }
}

impl StructuredLog for ManifestRejected<'_> {
    fn log(&self) {
        tracing::error!(
            source = self.source,
            error_count = self.error_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "manifest_rejected",
            span_name = name,
            source = self.source,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let loaded = ManifestLoaded {
            source: "configs/todo.yaml",
            module_count: 4,
        };
        assert_eq!(
            loaded.to_string(),
            "Loaded manifest 'configs/todo.yaml' with 4 module entries"
        );

        let rejected = ManifestRejected {
            source: "bad.yaml",
            error_count: 2,
        };
        assert_eq!(
            rejected.to_string(),
            "Manifest 'bad.yaml' failed validation with 2 errors"
        );
    }
}
