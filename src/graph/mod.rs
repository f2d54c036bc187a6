//! Dependency graph over module instances.
//!
//! Modules are stored in declaration order. Edges are implied by each
//! module's declared dependencies and are only checked by
//! [`DependencyGraph::resolve`]; insertion accepts forward references.
//!
//! # Examples
//!
//! ```
//! use toyen::graph::DependencyGraph;
//! use toyen::module::{AliasModule, Module, ModuleKind};
//!
//! let alias = || ModuleKind::Alias(AliasModule::default());
//! let mut graph = DependencyGraph::new();
//! graph.add_module(Module::new("all", vec!["lib".into()], alias())).expect("unique");
//! graph.add_module(Module::new("lib", Vec::new(), alias())).expect("unique");
//! graph.resolve().expect("acyclic");
//! assert_eq!(graph.direct_dependency_targets("all"), ["lib"]);
//! ```

use indexmap::{IndexMap, IndexSet};

use crate::error::{ErrorSet, ToyenError};
use crate::module::Module;

mod cycle;

/// Every declared module, keyed by name in declaration order.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    modules: IndexMap<String, Module>,
}

impl DependencyGraph {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `module`.
    ///
    /// # Errors
    ///
    /// Returns [`ToyenError::DuplicateName`] naming both declaration files
    /// when a module of the same name is already present.
    pub fn add_module(&mut self, module: Module) -> Result<(), ToyenError> {
        if let Some(existing) = self.modules.get(module.name()) {
            return Err(ToyenError::DuplicateName {
                name: module.name().to_owned(),
                first: existing.declared_in().to_path_buf(),
                second: module.declared_in().to_path_buf(),
            });
        }
        self.modules.insert(module.name().to_owned(), module);
        Ok(())
    }

    /// Check that every dependency exists and that the relation is acyclic.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorSet`] with one
    /// [`ToyenError::UnresolvedDependency`] per missing name, in declaration
    /// order, followed by a [`ToyenError::Cycle`] when one exists.
    pub fn resolve(&self) -> Result<(), ErrorSet> {
        let mut errors: Vec<ToyenError> = self
            .modules
            .values()
            .flat_map(|module| {
                module
                    .dependencies()
                    .iter()
                    .filter(|dep| !self.modules.contains_key(dep.as_str()))
                    .map(|dep| ToyenError::UnresolvedDependency {
                        from: module.name().to_owned(),
                        missing: dep.clone(),
                    })
            })
            .collect();
        if let Some(cycle) = cycle::find_cycle(&self.modules) {
            errors.push(ToyenError::Cycle { cycle });
        }
        ErrorSet::check(errors, ())
    }

    /// Target names of the direct dependencies of `name`, in declaration
    /// order with repeats removed. Unknown names yield nothing.
    #[must_use]
    pub fn direct_dependency_targets(&self, name: &str) -> Vec<String> {
        let Some(module) = self.modules.get(name) else {
            return Vec::new();
        };
        module
            .dependencies()
            .iter()
            .filter_map(|dep| self.modules.get(dep.as_str()))
            .map(|dep| dep.target_name().to_owned())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Target names of every module reachable from `name`, depth-first in
    /// pre-order, each once, excluding `name` itself.
    #[must_use]
    pub fn transitive_dependency_targets(&self, name: &str) -> Vec<String> {
        let mut visited: IndexSet<&str> = IndexSet::new();
        visited.insert(name);
        let mut order = Vec::new();
        self.visit_dependencies(name, &mut visited, &mut order);
        order
    }

    fn visit_dependencies<'g>(
        &'g self,
        name: &str,
        visited: &mut IndexSet<&'g str>,
        order: &mut Vec<String>,
    ) {
        let Some(module) = self.modules.get(name) else {
            return;
        };
        for dep in module.dependencies() {
            let Some((key, dep_module)) = self.modules.get_key_value(dep.as_str()) else {
                continue;
            };
            if visited.insert(key.as_str()) {
                order.push(dep_module.target_name().to_owned());
                self.visit_dependencies(key, visited, order);
            }
        }
    }

    /// Modules in declaration order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// Look up a module by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    /// Number of modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the graph holds no modules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
