// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for human-readable output and
//! `StructuredLog` to emit the same event with typed fields.
//!
//! * `registry` - module registration, lookup and invocation
//! * `config` - manifest loading and validation

use tracing::Span;

pub mod config;
pub mod registry;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event at its designated level.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
