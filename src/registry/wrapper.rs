// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Wrapper modules: callables that hand every invocation to a definer.
//!
//! The usual definer treats a leading string argument as the name of a
//! nested module and registers it beneath the wrapper's own path:
//!
//! ```
//! use namespace_module::registry::Registry;
//! use serde_json::json;
//!
//! let registry = Registry::new();
//! registry
//!     .wrapper("App.Models", |call| call.define_nested(|_, _| {}))
//!     .unwrap();
//!
//! registry.run("App.Models", vec![json!("Task")]);
//! assert!(registry.fetch("App.Models.Task").is_some());
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::RegistryError;
use crate::observability::messages::registry::{WrapperFailed, WrapperInvoked};
use crate::observability::messages::StructuredLog;
use crate::registry::module::{Invoked, MethodTable, Module};
use crate::registry::path::NamespacePath;
use crate::registry::namespace::{Registry, WeakRegistry};

/// Receives every call made to a wrapper module.
pub type Definer =
    Arc<dyn Fn(&WrapperCall<'_>) -> Result<Option<Module>, RegistryError> + Send + Sync>;

/// The callable registered by [`Registry::wrapper`].
pub struct WrapperModule {
    path: NamespacePath,
    registry: WeakRegistry,
    definer: Definer,
}

impl WrapperModule {
    pub(crate) fn new(path: NamespacePath, registry: WeakRegistry, definer: Definer) -> Self {
        Self {
            path,
            registry,
            definer,
        }
    }

    pub fn path(&self) -> &NamespacePath {
        &self.path
    }

    pub fn invoke(&self, args: Vec<Value>) -> Invoked {
        let path = self.path.to_string();

        let Some(registry) = self.registry.upgrade() else {
            let error = RegistryError::Detached { path: path.clone() };
            WrapperFailed {
                path: &path,
                error: &error,
            }
            .log();
            return Invoked::Failed(error);
        };

        let call = WrapperCall {
            registry: &registry,
            path: &self.path,
            args: &args,
        };

        let msg = WrapperInvoked {
            path: &path,
            suffix: call.suffix(),
            arg_count: args.len(),
        };
        let span = msg.span("wrapper");
        let _guard = span.enter();
        msg.log();

        match (self.definer)(&call) {
            Ok(returned) => Invoked::Returned(returned),
            Err(error) => {
                WrapperFailed {
                    path: &path,
                    error: &error,
                }
                .log();
                Invoked::Failed(error)
            }
        }
    }
}

impl fmt::Debug for WrapperModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperModule")
            .field("path", &self.path.to_string())
            .finish_non_exhaustive()
    }
}

/// One invocation of a wrapper, as seen by its definer.
pub struct WrapperCall<'a> {
    registry: &'a Registry,
    path: &'a NamespacePath,
    args: &'a [Value],
}

impl<'a> WrapperCall<'a> {
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// The wrapper's own path.
    pub fn path(&self) -> &'a NamespacePath {
        self.path
    }

    pub fn args(&self) -> &'a [Value] {
        self.args
    }

    /// The leading argument, when it is a string.
    pub fn suffix(&self) -> Option<&'a str> {
        self.args.first().and_then(Value::as_str)
    }

    /// Arguments after the leading one.
    pub fn rest(&self) -> &'a [Value] {
        self.args.get(1..).unwrap_or_default()
    }

    /// `path + "." + suffix`, when a string suffix was passed.
    pub fn nested_path(&self) -> Option<Result<NamespacePath, RegistryError>> {
        self.suffix().map(|suffix| self.path.child(suffix))
    }

    /// Register the nested module named by the leading string argument.
    ///
    /// Returns `Ok(None)` when the call carried no string suffix.
    pub fn define_nested<F>(&self, callback: F) -> Result<Option<Module>, RegistryError>
    where
        F: FnOnce(&Module, Option<&MethodTable>),
    {
        match self.nested_path() {
            Some(nested) => {
                let nested = nested?;
                self.registry
                    .register(&nested.to_string(), callback)
                    .map(Some)
            }
            None => Ok(None),
        }
    }
}
