// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and
//! operational logging in the registry. Message types follow a struct-based
//! pattern with a `Display` implementation so call sites carry no magic
//! strings and every event renders the same way.
//!
//! Messages are organized by subsystem:
//! * `messages::registry` - registration, lookup and invocation events
//! * `messages::config` - manifest loading and validation events
//!
//! # Usage
//!
//! ```rust
//! use namespace_module::observability::messages::registry::PathNotFound;
//! use namespace_module::observability::messages::StructuredLog;
//!
//! PathNotFound {
//!     path: "Todo.Missing",
//!     operation: "fetch",
//! }
//! .log();
//! ```

pub mod messages;

use tracing_subscriber::EnvFilter;

use crate::config::consts::DEFAULT_LOG_FILTER;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `fallback` (usually the manifest's
/// `log_filter`) and finally the default filter are used. Calling this twice
/// is harmless: the second installation is ignored.
pub fn init_tracing(fallback: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
