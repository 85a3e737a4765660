// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod module;
mod namespace;
mod path;
mod scope;
pub mod wrapper;


pub use module::{
    CallStyle, Constructor, Instance, Invoked, Method, MethodTable, Module, ModuleKind,
};
pub use namespace::{Callback, Registry, WeakRegistry};
pub use path::NamespacePath;
pub use scope::{Scope, SharedScope};
pub use wrapper::{Definer, WrapperCall, WrapperModule};
