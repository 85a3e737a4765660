// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde_json::Value;

use crate::errors::RegistryError;
use crate::observability::messages::registry::{
    ModuleNotCallable, ModuleRegistered, PathNotFound, PathRejected,
};
use crate::observability::messages::StructuredLog;
use crate::registry::module::{CallStyle, Constructor, Invoked, MethodTable, Module, ModuleKind};
use crate::registry::path::NamespacePath;
use crate::registry::scope::{Scope, SharedScope};
use crate::registry::wrapper::{Definer, WrapperCall, WrapperModule};

/// Registration callback: receives the resolved module and, for
/// constructible modules, its extension point.
pub type Callback<'a> = Box<dyn FnOnce(&Module, Option<&MethodTable>) + 'a>;

/// A namespace registry over a shared scope tree.
///
/// Cloning a `Registry` yields another handle to the same tree. Every
/// operation takes the tree's lock only for the duration of the walk, so
/// callbacks, initializers and definers are free to call back into the
/// registry.
///
/// # Examples
///
/// ```
/// use namespace_module::registry::Registry;
/// use serde_json::{json, Value};
///
/// let registry = Registry::new();
/// let task = registry
///     .register("Todo::Task", |_, ext| {
///         if let Some(ext) = ext {
///             ext.initialize(|task, args| {
///                 task.set("title", args.first().cloned().unwrap_or(Value::Null));
///             });
///         }
///     })
///     .unwrap();
///
/// let instance = registry
///     .run("Todo.Task", vec![json!("write docs")])
///     .and_then(|invoked| invoked.into_instance())
///     .unwrap();
///
/// assert!(instance.is_instance_of(&task));
/// assert_eq!(instance.get("title"), Some(&json!("write docs")));
/// assert!(registry.fetch("Todo.Missing").is_none());
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    root: SharedScope,
}

/// A non-owning handle, held by wrapper modules stored inside the tree.
#[derive(Clone, Default)]
pub struct WeakRegistry {
    root: Weak<RwLock<Scope>>,
}

impl WeakRegistry {
    pub fn upgrade(&self) -> Option<Registry> {
        self.root.upgrade().map(|root| Registry { root })
    }
}

impl Registry {
    /// A registry over a fresh, empty root.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry over an existing root container. Registries attached to
    /// the same root see each other's modules.
    pub fn attach(root: SharedScope) -> Self {
        Self { root }
    }

    pub fn root(&self) -> SharedScope {
        Arc::clone(&self.root)
    }

    pub fn downgrade(&self) -> WeakRegistry {
        WeakRegistry {
            root: Arc::downgrade(&self.root),
        }
    }

    /// Create (or reuse) a constructible module at `path` and run `callback` on it.
    pub fn register<F>(&self, path: &str, callback: F) -> Result<Module, RegistryError>
    where
        F: FnOnce(&Module, Option<&MethodTable>),
    {
        self.register_with(path, None, Some(Box::new(callback)))
    }

    /// Create (or reuse) the module at `path` without a callback.
    pub fn declare(&self, path: &str) -> Result<Module, RegistryError> {
        self.register_with(path, None, None)
    }

    /// Store `object` verbatim at `path`, replacing any module already there.
    pub fn register_object(
        &self,
        path: &str,
        object: impl Into<Value>,
    ) -> Result<Module, RegistryError> {
        self.register_with(path, Some(object.into()), None)
    }

    pub fn register_object_with<F>(
        &self,
        path: &str,
        object: impl Into<Value>,
        callback: F,
    ) -> Result<Module, RegistryError>
    where
        F: FnOnce(&Module, Option<&MethodTable>),
    {
        self.register_with(path, Some(object.into()), Some(Box::new(callback)))
    }

    /// The general form of registration.
    ///
    /// With `object`, the value is stored verbatim. Without it, the module
    /// already stored at `path` is reused, or a fresh constructible module is
    /// built when the slot is empty. The callback then receives the resolved
    /// module and its extension point (`None` for anything but a
    /// constructible module).
    pub fn register_with(
        &self,
        path: &str,
        object: Option<Value>,
        callback: Option<Callback<'_>>,
    ) -> Result<Module, RegistryError> {
        let parsed = self.parse(path)?;
        let replacement = object.map(|value| Module::Verbatim(Arc::new(value)));
        self.register_module(&parsed, replacement, callback)
    }

    /// Register a wrapper at `path`, replacing any module already there.
    pub fn wrapper<F>(&self, path: &str, definer: F) -> Result<Module, RegistryError>
    where
        F: Fn(&WrapperCall<'_>) -> Result<Option<Module>, RegistryError> + Send + Sync + 'static,
    {
        let parsed = self.parse(path)?;
        let definer: Definer = Arc::new(definer);
        let wrapper = WrapperModule::new(parsed.clone(), self.downgrade(), definer);
        self.register_module(&parsed, Some(Module::Wrapper(Arc::new(wrapper))), None)
    }

    /// The module at `path`, if every component resolves and the terminal
    /// slot holds a module.
    pub fn fetch(&self, path: &str) -> Option<Module> {
        self.lookup(path, "fetch")
    }

    /// Invoke the module at `path` constructor-style.
    ///
    /// `None` when the path does not resolve or the module is not callable;
    /// nothing is created in either case.
    pub fn run(&self, path: &str, args: Vec<Value>) -> Option<Invoked> {
        let module = self.lookup(path, "run")?;
        let invoked = module.invoke_as(CallStyle::Constructor, args);
        if invoked.is_none() {
            ModuleNotCallable {
                path,
                kind: module.kind().as_str(),
            }
            .log();
        }
        invoked
    }

    /// Whether `path` resolves to any node, module or container.
    pub fn contains_scope(&self, path: &str) -> bool {
        NamespacePath::parse(path)
            .map(|parsed| self.root.read().resolve(&parsed).is_some())
            .unwrap_or(false)
    }

    /// Names of the scopes directly beneath `path`.
    pub fn children(&self, path: &str) -> Option<Vec<String>> {
        let parsed = NamespacePath::parse(path).ok()?;
        self.root.read().resolve(&parsed).map(Scope::child_names)
    }

    /// Every populated module path with its kind, depth first in name order.
    pub fn paths(&self) -> Vec<(String, ModuleKind)> {
        let mut out = Vec::new();
        self.root.read().collect_modules(&mut Vec::new(), &mut out);
        out
    }

    fn parse(&self, path: &str) -> Result<NamespacePath, RegistryError> {
        NamespacePath::parse(path).map_err(|error| {
            PathRejected {
                path,
                error: &error,
            }
            .log();
            error
        })
    }

    fn lookup(&self, path: &str, operation: &str) -> Option<Module> {
        let found = NamespacePath::parse(path).ok().and_then(|parsed| {
            self.root
                .read()
                .resolve(&parsed)
                .and_then(|scope| scope.module().cloned())
        });

        if found.is_none() {
            PathNotFound { path, operation }.log();
        }
        found
    }

    fn register_module(
        &self,
        path: &NamespacePath,
        replacement: Option<Module>,
        callback: Option<Callback<'_>>,
    ) -> Result<Module, RegistryError> {
        let (module, reused) = self.store(path, replacement);

        let canonical = path.to_string();
        let msg = ModuleRegistered {
            path: &canonical,
            kind: module.kind().as_str(),
            reused,
        };
        let span = msg.span("register");
        let _guard = span.enter();
        msg.log();

        if let Some(callback) = callback {
            callback(&module, module.extension_point());
        }

        Ok(module)
    }

    /// Populate the slot at `path`. Returns the resolved module and whether
    /// it was already there.
    fn store(&self, path: &NamespacePath, replacement: Option<Module>) -> (Module, bool) {
        let mut root = self.root.write();
        let slot = root.resolve_or_create(path);

        if let Some(module) = replacement {
            slot.set_module(module.clone());
            return (module, false);
        }

        if let Some(existing) = slot.module() {
            return (existing.clone(), true);
        }

        let module = Module::Constructible(Constructor::build(path.clone()));
        slot.set_module(module.clone());
        (module, false)
    }
}
