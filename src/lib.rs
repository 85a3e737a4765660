// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // manifest loading + registry builder
pub mod errors;     // error handling
pub mod observability;
pub mod registry;   // scope tree, modules, wrappers
