// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Module values stored in the scope tree.
//!
//! A [`Module`] is one of three things:
//!
//! * a **constructible** module, backed by a [`Constructor`] whose
//!   [`MethodTable`] is the extension point registering callbacks mutate,
//! * a **verbatim** value stored exactly as supplied (no extension point,
//!   not callable),
//! * a **wrapper**, a callable that delegates to a user supplied definer
//!   (see [`crate::registry::wrapper`]).
//!
//! Constructible modules can be instantiated two ways, [`Constructor::new_instance`]
//! and [`Constructor::call`]. Both take ownership of their own argument list
//! and run the same `initialize` lookup, so the two styles are
//! indistinguishable to the initializer.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::config::consts::INITIALIZE;
use crate::errors::RegistryError;
use crate::observability::messages::registry::InstanceConstructed;
use crate::observability::messages::StructuredLog;
use crate::registry::path::NamespacePath;
use crate::registry::wrapper::WrapperModule;

/// An instance method. Receives the instance and the call's arguments.
pub type Method = Arc<dyn Fn(&mut Instance, &[Value]) -> Value + Send + Sync>;

/// How an instance was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStyle {
    /// `new M(...)`
    Constructor,
    /// `M(...)`
    Plain,
}

impl CallStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStyle::Constructor => "constructor",
            CallStyle::Plain => "plain",
        }
    }
}

/// The mutable method table shared by every instance of a constructible module.
///
/// Methods are looked up when they are called, so definitions added after
/// instances exist are visible to those instances.
pub struct MethodTable {
    methods: RwLock<HashMap<String, Method>>,
}

impl MethodTable {
    fn with_initializer() -> Self {
        let mut methods: HashMap<String, Method> = HashMap::new();
        methods.insert(
            INITIALIZE.to_string(),
            Arc::new(|_: &mut Instance, _: &[Value]| Value::Null),
        );
        Self {
            methods: RwLock::new(methods),
        }
    }

    /// Add or replace a method.
    pub fn define<F>(&self, name: &str, method: F)
    where
        F: Fn(&mut Instance, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.methods.write().insert(name.to_string(), Arc::new(method));
    }

    /// Shorthand for `define("initialize", ..)` for initializers with no return value.
    pub fn initialize<F>(&self, initializer: F)
    where
        F: Fn(&mut Instance, &[Value]) + Send + Sync + 'static,
    {
        self.define(INITIALIZE, move |instance, args| {
            initializer(instance, args);
            Value::Null
        });
    }

    pub fn get(&self, name: &str) -> Option<Method> {
        self.methods.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.read().contains_key(name)
    }

    /// Method names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// The callable behind a constructible module.
pub struct Constructor {
    path: NamespacePath,
    methods: MethodTable,
}

impl Constructor {
    pub(crate) fn build(path: NamespacePath) -> Arc<Self> {
        Arc::new(Self {
            path,
            methods: MethodTable::with_initializer(),
        })
    }

    pub fn path(&self) -> &NamespacePath {
        &self.path
    }

    /// The extension point (`M.fn`).
    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// Constructor-style instantiation.
    pub fn new_instance(self: &Arc<Self>, args: Vec<Value>) -> Instance {
        self.construct(CallStyle::Constructor, args)
    }

    /// Plain-call instantiation. Produces the same instance `new_instance` would.
    pub fn call(self: &Arc<Self>, args: Vec<Value>) -> Instance {
        self.construct(CallStyle::Plain, args)
    }

    fn construct(self: &Arc<Self>, style: CallStyle, args: Vec<Value>) -> Instance {
        let path = self.path.to_string();
        let msg = InstanceConstructed {
            path: &path,
            style: style.as_str(),
            arg_count: args.len(),
        };
        let span = msg.span("construct");
        let _guard = span.enter();
        msg.log();

        let mut instance = Instance {
            class: Arc::clone(self),
            style,
            fields: Map::new(),
        };
        instance.send(INITIALIZE, &args);
        instance
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("path", &self.path.to_string())
            .field("methods", &self.methods)
            .finish()
    }
}

/// An object produced by a constructible module.
pub struct Instance {
    class: Arc<Constructor>,
    style: CallStyle,
    fields: Map<String, Value>,
}

impl Instance {
    pub fn class(&self) -> &Arc<Constructor> {
        &self.class
    }

    pub fn path(&self) -> &NamespacePath {
        self.class.path()
    }

    pub fn style(&self) -> CallStyle {
        self.style
    }

    pub fn is_instance_of(&self, module: &Module) -> bool {
        match module {
            Module::Constructible(constructor) => Arc::ptr_eq(&self.class, constructor),
            _ => false,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn responds_to(&self, name: &str) -> bool {
        self.class.methods().contains(name)
    }

    /// Call a method from the constructor's table. `None` if no such method.
    ///
    /// The table lock is released before the method runs, so a method may
    /// define further methods.
    pub fn send(&mut self, name: &str, args: &[Value]) -> Option<Value> {
        let method = self.class.methods().get(name)?;
        Some(method(self, args))
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("path", &self.path().to_string())
            .field("style", &self.style)
            .field("fields", &self.fields)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Constructible,
    Verbatim,
    Wrapper,
}

impl ModuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Constructible => "constructible",
            ModuleKind::Verbatim => "verbatim",
            ModuleKind::Wrapper => "wrapper",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value stored at a terminal namespace slot.
#[derive(Debug, Clone)]
pub enum Module {
    Constructible(Arc<Constructor>),
    Verbatim(Arc<Value>),
    Wrapper(Arc<WrapperModule>),
}

impl Module {
    pub fn verbatim(value: impl Into<Value>) -> Self {
        Module::Verbatim(Arc::new(value.into()))
    }

    pub fn kind(&self) -> ModuleKind {
        match self {
            Module::Constructible(_) => ModuleKind::Constructible,
            Module::Verbatim(_) => ModuleKind::Verbatim,
            Module::Wrapper(_) => ModuleKind::Wrapper,
        }
    }

    /// The method table, for constructible modules only.
    pub fn extension_point(&self) -> Option<&MethodTable> {
        self.as_constructor().map(|constructor| constructor.methods())
    }

    pub fn as_constructor(&self) -> Option<&Arc<Constructor>> {
        match self {
            Module::Constructible(constructor) => Some(constructor),
            _ => None,
        }
    }

    pub fn as_verbatim(&self) -> Option<&Value> {
        match self {
            Module::Verbatim(value) => Some(&**value),
            _ => None,
        }
    }

    pub fn as_wrapper(&self) -> Option<&Arc<WrapperModule>> {
        match self {
            Module::Wrapper(wrapper) => Some(wrapper),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        !matches!(self, Module::Verbatim(_))
    }

    /// Plain call. `None` for verbatim modules.
    pub fn invoke(&self, args: Vec<Value>) -> Option<Invoked> {
        self.invoke_as(CallStyle::Plain, args)
    }

    pub fn invoke_as(&self, style: CallStyle, args: Vec<Value>) -> Option<Invoked> {
        match self {
            Module::Constructible(constructor) => Some(Invoked::Instance(match style {
                CallStyle::Constructor => constructor.new_instance(args),
                CallStyle::Plain => constructor.call(args),
            })),
            Module::Wrapper(wrapper) => Some(wrapper.invoke(args)),
            Module::Verbatim(_) => None,
        }
    }
}

impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Module::Constructible(a), Module::Constructible(b)) => Arc::ptr_eq(a, b),
            (Module::Wrapper(a), Module::Wrapper(b)) => Arc::ptr_eq(a, b),
            (Module::Verbatim(a), Module::Verbatim(b)) => a == b,
            _ => false,
        }
    }
}

/// The result of invoking a callable module.
#[derive(Debug)]
pub enum Invoked {
    /// A constructible module produced an instance.
    Instance(Instance),
    /// A wrapper's definer ran; carries whatever module it returned.
    Returned(Option<Module>),
    /// A wrapper's definer failed or its registry is gone.
    Failed(RegistryError),
}

impl Invoked {
    pub fn into_instance(self) -> Option<Instance> {
        match self {
            Invoked::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn instance(&self) -> Option<&Instance> {
        match self {
            Invoked::Instance(instance) => Some(instance),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn constructor(path: &str) -> Arc<Constructor> {
        Constructor::build(NamespacePath::parse(path).unwrap())
    }

    #[test]
    fn test_default_initializer_is_noop() {
        let ctor = constructor("A.B");
        assert_eq!(ctor.methods().names(), vec!["initialize"]);

        let instance = ctor.new_instance(vec![json!(1)]);
        assert!(instance.fields().is_empty());
        assert_eq!(instance.path().to_string(), "A.B");
    }

    #[test]
    fn test_both_styles_forward_identical_arguments() {
        let ctor = constructor("A.B");
        ctor.methods().initialize(|instance, args| {
            instance.set("args", Value::Array(args.to_vec()));
        });

        let constructed = ctor.new_instance(vec![json!(1), json!(2), json!(3)]);
        let called = ctor.call(vec![json!(1), json!(2), json!(3)]);

        assert_eq!(constructed.get("args"), Some(&json!([1, 2, 3])));
        assert_eq!(called.get("args"), constructed.get("args"));
        assert_eq!(constructed.style(), CallStyle::Constructor);
        assert_eq!(called.style(), CallStyle::Plain);

        let module = Module::Constructible(Arc::clone(&ctor));
        assert!(constructed.is_instance_of(&module));
        assert!(called.is_instance_of(&module));
    }

    #[test]
    fn test_reentrant_construction_keeps_arguments_apart() {
        // An initializer that itself constructs another instance mid-call.
        let ctor = constructor("A.Nested");
        let inner = Arc::clone(&ctor);
        ctor.methods().initialize(move |instance, args| {
            if args.first() == Some(&json!("outer")) {
                let child = inner.call(vec![json!("inner"), json!(2)]);
                instance.set("child", child.get("args").cloned().unwrap_or(Value::Null));
            }
            instance.set("args", Value::Array(args.to_vec()));
        });

        let outer = ctor.new_instance(vec![json!("outer"), json!(1)]);
        assert_eq!(outer.get("args"), Some(&json!(["outer", 1])));
        assert_eq!(outer.get("child"), Some(&json!(["inner", 2])));
    }

    #[test]
    fn test_late_methods_are_visible_to_existing_instances() {
        let ctor = constructor("A.Counter");
        let mut instance = ctor.call(vec![]);
        assert_eq!(instance.send("increment", &[]), None);

        ctor.methods().define("increment", |instance, _| {
            let next = instance.get("count").and_then(Value::as_i64).unwrap_or(0) + 1;
            instance.set("count", next);
            json!(next)
        });

        assert!(instance.responds_to("increment"));
        assert_eq!(instance.send("increment", &[]), Some(json!(1)));
        assert_eq!(instance.send("increment", &[]), Some(json!(2)));
    }

    #[test]
    fn test_instance_of_other_module_is_false() {
        let a = constructor("A");
        let b = constructor("A");
        let instance = a.call(vec![]);

        assert!(!instance.is_instance_of(&Module::Constructible(b)));
        assert!(!instance.is_instance_of(&Module::verbatim("A")));
    }

    #[test]
    fn test_module_identity_and_kind() {
        let ctor = constructor("A");
        let first = Module::Constructible(Arc::clone(&ctor));
        let second = Module::Constructible(ctor);

        assert_eq!(first, second);
        assert_ne!(first, Module::Constructible(constructor("A")));
        assert_eq!(Module::verbatim("CUSTOM"), Module::verbatim("CUSTOM"));
        assert_ne!(Module::verbatim(0), Module::verbatim(false));

        assert_eq!(first.kind(), ModuleKind::Constructible);
        assert!(first.extension_point().is_some());
        assert!(first.is_callable());

        let custom = Module::verbatim("CUSTOM");
        assert_eq!(custom.kind().to_string(), "verbatim");
        assert!(custom.extension_point().is_none());
        assert!(custom.invoke(vec![]).is_none());
        assert_eq!(custom.as_verbatim(), Some(&json!("CUSTOM")));
    }

    #[test]
    fn test_invoke_as_constructor_style() {
        let module = Module::Constructible(constructor("A"));
        let instance = module
            .invoke_as(CallStyle::Constructor, vec![])
            .and_then(Invoked::into_instance)
            .unwrap();

        assert_eq!(instance.style(), CallStyle::Constructor);
        assert!(instance.is_instance_of(&module));
    }
}
