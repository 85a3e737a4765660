// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for registry events.
//!
//! This module contains message types for logging events related to:
//! * Module registration and slot reuse
//! * Path resolution misses and rejected paths
//! * Instance construction and wrapper invocation

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A module was stored at (or reused from) a namespace slot.
///
/// # Log Level
/// `info!` for fresh slots, `debug!` when an existing module was reused
///
/// # Example
/// ```
/// use namespace_module::observability::messages::registry::ModuleRegistered;
///
/// let msg = ModuleRegistered {
///     path: "Todo.Application",
///     kind: "constructible",
///     reused: false,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ModuleRegistered<'a> {
    pub path: &'a str,
    pub kind: &'a str,
    pub reused: bool,
}

impl Display for ModuleRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.reused {
            write!(f, "Reusing {} module at '{}'", self.kind, self.path)
        } else {
            write!(f, "Registered {} module at '{}'", self.kind, self.path)
        }
    }
}

impl StructuredLog for ModuleRegistered<'_> {
    fn log(&self) {
        if self.reused {
            tracing::debug!(path = self.path, kind = self.kind, reused = true, "{}", self);
        } else {
            tracing::info!(path = self.path, kind = self.kind, reused = false, "{}", self);
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "module_registration",
            span_name = name,
            path = self.path,
            kind = self.kind,
        )
    }
}

/// A path did not resolve to a module.
///
/// # Log Level
/// `debug!` - expected outcome, reported to the caller as `None`
pub struct PathNotFound<'a> {
    pub path: &'a str,
    pub operation: &'a str,
}

impl Display for PathNotFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}: no module at '{}'", self.operation, self.path)
    }
}

impl StructuredLog for PathNotFound<'_> {
    fn log(&self) {
        tracing::debug!(path = self.path, operation = self.operation, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "path_not_found",
            span_name = name,
            path = self.path,
            operation = self.operation,
        )
    }
}

/// A path was rejected before touching the scope tree.
///
/// # Log Level
/// `warn!` - caller bug
pub struct PathRejected<'a> {
    pub path: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for PathRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Rejected namespace path '{}': {}", self.path, self.error)
    }
}

impl StructuredLog for PathRejected<'_> {
    fn log(&self) {
        tracing::warn!(path = self.path, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("path_rejected", span_name = name, path = self.path)
    }
}

/// A resolved module cannot be invoked.
///
/// # Log Level
/// `debug!` - `run` reports this as `None`
pub struct ModuleNotCallable<'a> {
    pub path: &'a str,
    pub kind: &'a str,
}

impl Display for ModuleNotCallable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Module at '{}' is {} and cannot be invoked", self.path, self.kind)
    }
}

impl StructuredLog for ModuleNotCallable<'_> {
    fn log(&self) {
        tracing::debug!(path = self.path, kind = self.kind, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("module_not_callable", span_name = name, path = self.path)
    }
}

/// A constructible module produced an instance.
///
/// # Log Level
/// `debug!` - high-volume event
///
/// # Example
/// ```
/// use namespace_module::observability::messages::registry::InstanceConstructed;
///
/// let msg = InstanceConstructed {
///     path: "Todo.Task",
///     style: "plain",
///     arg_count: 3,
/// };
///
/// assert_eq!(msg.to_string(), "Constructed 'Todo.Task' instance via plain call with 3 args");
/// ```
pub struct InstanceConstructed<'a> {
    pub path: &'a str,
    pub style: &'a str,
    pub arg_count: usize,
}

impl Display for InstanceConstructed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Constructed '{}' instance via {} call with {} args",
            self.path, self.style, self.arg_count
        )
    }
}

impl StructuredLog for InstanceConstructed<'_> {
    fn log(&self) {
        tracing::debug!(
            path = self.path,
            style = self.style,
            arg_count = self.arg_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "instance_construction",
            span_name = name,
            path = self.path,
            style = self.style,
            arg_count = self.arg_count,
        )
    }
}

/// A wrapper module delegated a call to its definer.
///
/// # Log Level
/// `debug!`
pub struct WrapperInvoked<'a> {
    pub path: &'a str,
    pub suffix: Option<&'a str>,
    pub arg_count: usize,
}

impl Display for WrapperInvoked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.suffix {
            Some(suffix) => write!(
                f,
                "Wrapper '{}' invoked for nested '{}' with {} args",
                self.path, suffix, self.arg_count
            ),
            None => write!(f, "Wrapper '{}' invoked with {} args", self.path, self.arg_count),
        }
    }
}

impl StructuredLog for WrapperInvoked<'_> {
    fn log(&self) {
        tracing::debug!(
            path = self.path,
            suffix = self.suffix,
            arg_count = self.arg_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "wrapper_invocation",
            span_name = name,
            path = self.path,
            suffix = self.suffix,
        )
    }
}

/// A wrapper invocation failed.
///
/// # Log Level
/// `warn!`
pub struct WrapperFailed<'a> {
    pub path: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for WrapperFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Wrapper '{}' failed: {}", self.path, self.error)
    }
}

impl StructuredLog for WrapperFailed<'_> {
    fn log(&self) {
        tracing::warn!(path = self.path, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("wrapper_failed", span_name = name, path = self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RegistryError;

    #[test]
    fn test_module_registered_display() {
        let fresh = ModuleRegistered {
            path: "A.B",
            kind: "constructible",
            reused: false,
        };
        let reused = ModuleRegistered {
            reused: true,
            ..fresh
        };

        assert_eq!(fresh.to_string(), "Registered constructible module at 'A.B'");
        assert_eq!(reused.to_string(), "Reusing constructible module at 'A.B'");
    }

    #[test]
    fn test_wrapper_invoked_display() {
        let nested = WrapperInvoked {
            path: "A.B",
            suffix: Some("C"),
            arg_count: 1,
        };
        let plain = WrapperInvoked {
            path: "A.B",
            suffix: None,
            arg_count: 2,
        };

        assert_eq!(nested.to_string(), "Wrapper 'A.B' invoked for nested 'C' with 1 args");
        assert_eq!(plain.to_string(), "Wrapper 'A.B' invoked with 2 args");
    }

    #[test]
    fn test_error_messages_include_cause() {
        let error = RegistryError::invalid_path("A..B", "empty component");

        let rejected = PathRejected {
            path: "A..B",
            error: &error,
        };
        assert!(rejected.to_string().contains("empty component"));

        let failed = WrapperFailed {
            path: "A.B",
            error: &error,
        };
        assert!(failed.to_string().starts_with("Wrapper 'A.B' failed:"));
    }

    #[test]
    fn test_not_found_display() {
        let msg = PathNotFound {
            path: "X.Y",
            operation: "run",
        };
        assert_eq!(msg.to_string(), "run: no module at 'X.Y'");
    }
}
