// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::consts::PATH_SEPARATOR;
use crate::registry::module::{Module, ModuleKind};
use crate::registry::path::NamespacePath;

/// A root container that registries attach to.
pub type SharedScope = Arc<RwLock<Scope>>;

/// One node of the scope tree.
///
/// A node may hold a module, child scopes, or both: a wrapper at `A.B`
/// commonly has modules nested beneath it at `A.B.*`.
#[derive(Debug, Default)]
pub struct Scope {
    module: Option<Module>,
    children: BTreeMap<String, Scope>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedScope {
        Arc::new(RwLock::new(Self::new()))
    }

    pub fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    pub fn child(&self, name: &str) -> Option<&Scope> {
        self.children.get(name)
    }

    pub fn child_names(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.module.is_none() && self.children.is_empty()
    }

    /// Walk `path` without creating anything.
    pub(crate) fn resolve(&self, path: &NamespacePath) -> Option<&Scope> {
        path.components()
            .iter()
            .try_fold(self, |scope, component| scope.child(component))
    }

    /// Walk `path`, creating empty scopes for every missing component.
    pub(crate) fn resolve_or_create(&mut self, path: &NamespacePath) -> &mut Scope {
        path.components().iter().fold(self, |scope, component| {
            scope.children.entry(component.clone()).or_default()
        })
    }

    /// Store `module`, keeping any child scopes. Returns the previous module.
    pub(crate) fn set_module(&mut self, module: Module) -> Option<Module> {
        self.module.replace(module)
    }

    /// Every populated slot beneath this node, depth first in name order.
    pub(crate) fn collect_modules(
        &self,
        prefix: &mut Vec<String>,
        out: &mut Vec<(String, ModuleKind)>,
    ) {
        if let Some(module) = &self.module {
            out.push((prefix.join(PATH_SEPARATOR), module.kind()));
        }
        for (name, child) in &self.children {
            prefix.push(name.clone());
            child.collect_modules(prefix, out);
            prefix.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(input: &str) -> NamespacePath {
        NamespacePath::parse(input).unwrap()
    }

    #[test]
    fn test_resolve_or_create_builds_intermediates() {
        let mut root = Scope::new();
        root.resolve_or_create(&path("A.B.C"));

        assert!(root.resolve(&path("A")).is_some());
        assert!(root.resolve(&path("A.B")).is_some());
        assert!(root.resolve(&path("A.B.C")).is_some());
        assert!(root.resolve(&path("A.B.C")).unwrap().is_empty());
        assert!(root.resolve(&path("A.X")).is_none());
        assert!(root.resolve(&path("A.B.C.D")).is_none());
    }

    #[test]
    fn test_resolve_or_create_reuses_existing_nodes() {
        let mut root = Scope::new();
        root.resolve_or_create(&path("A.B"))
            .set_module(Module::verbatim("first"));
        root.resolve_or_create(&path("A.C"));

        let a = root.resolve(&path("A")).unwrap();
        assert_eq!(a.child_names(), vec!["B", "C"]);
        assert_eq!(
            a.child("B").and_then(Scope::module),
            Some(&Module::verbatim("first"))
        );
    }

    #[test]
    fn test_set_module_keeps_children() {
        let mut root = Scope::new();
        root.resolve_or_create(&path("A.B.C"))
            .set_module(Module::verbatim(1));

        let previous = root
            .resolve_or_create(&path("A.B"))
            .set_module(Module::verbatim(2));

        assert!(previous.is_none());
        assert!(root.resolve(&path("A.B.C")).and_then(Scope::module).is_some());
    }

    #[test]
    fn test_collect_modules_depth_first() {
        let mut root = Scope::new();
        for p in ["B.Y", "A", "B", "A.Z.Q"] {
            root.resolve_or_create(&path(p)).set_module(Module::verbatim(p));
        }

        let mut out = Vec::new();
        root.collect_modules(&mut Vec::new(), &mut out);
        let paths: Vec<&str> = out.iter().map(|(p, _)| p.as_str()).collect();

        assert_eq!(paths, vec!["A", "A.Z.Q", "B", "B.Y"]);
        assert!(out.iter().all(|(_, kind)| *kind == ModuleKind::Verbatim));
    }
}
