//! Module kind registry.
//!
//! The registry maps a kind name, as written in declarations, to a factory
//! that decodes the declaration's raw property bag into the typed
//! [`ModuleKind`] for that kind. Factories receive the shared [`Config`] so a
//! kind can fill in configuration-derived defaults such as the job count.
//!
//! ```rust
//! use toyen::registry::ModuleRegistry;
//!
//! let registry = ModuleRegistry::with_builtin_kinds();
//! assert!(registry.kinds().any(|kind| kind == "copy"));
//! ```

use indexmap::IndexMap;
use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ast::Properties;
use crate::config::Config;
use crate::error::ToyenError;
use crate::manifest::LocatedDeclaration;
use crate::module::{CopyModule, InstallModule, MakeModule, Module, ModuleKind, NinjaModule};

/// Decodes a property bag into a typed module kind.
pub type ModuleFactory = fn(&Config, Properties) -> Result<ModuleKind, serde_json::Error>;

/// Kind names bound to their factories, in registration order.
#[derive(Debug, Default, Clone)]
pub struct ModuleRegistry {
    factories: IndexMap<String, ModuleFactory>,
}

impl ModuleRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in kind.
    #[must_use]
    pub fn with_builtin_kinds() -> Self {
        let factories: [(&str, ModuleFactory); 9] = [
            ("alias", |_, props| decode(props).map(ModuleKind::Alias)),
            ("clean", |_, props| decode(props).map(ModuleKind::Clean)),
            ("cmake", |_, props| decode(props).map(ModuleKind::CMake)),
            ("copy", |_, props| {
                let module: CopyModule = decode(props)?;
                module.validate()?;
                Ok(ModuleKind::Copy(module))
            }),
            ("gn", |_, props| decode(props).map(ModuleKind::Gn)),
            ("install", |_, props| {
                let module: InstallModule = decode(props)?;
                module.validate()?;
                Ok(ModuleKind::Install(module))
            }),
            ("make", |config, props| {
                let mut module: MakeModule = decode(props)?;
                module.jobs = module.jobs.or(Some(config.jobs()));
                Ok(ModuleKind::Make(module))
            }),
            ("ninja", |config, props| {
                let mut module: NinjaModule = decode(props)?;
                module.jobs = module.jobs.or(Some(config.jobs()));
                Ok(ModuleKind::Ninja(module))
            }),
            ("script", |_, props| decode(props).map(ModuleKind::Script)),
        ];
        let factories = factories
            .into_iter()
            .map(|(kind, factory)| (kind.to_owned(), factory))
            .collect();
        Self { factories }
    }

    /// Bind `kind` to `factory`.
    ///
    /// # Errors
    ///
    /// Returns [`ToyenError::DuplicateKind`] when `kind` is already
    /// registered; the existing binding is kept.
    pub fn register(&mut self, kind: &str, factory: ModuleFactory) -> Result<(), ToyenError> {
        if self.factories.contains_key(kind) {
            return Err(ToyenError::DuplicateKind {
                kind: kind.to_owned(),
            });
        }
        self.factories.insert(kind.to_owned(), factory);
        Ok(())
    }

    /// Registered kind names in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Turn a declaration into a typed module.
    ///
    /// # Errors
    ///
    /// Returns [`ToyenError::UnknownKind`] when the declaration's kind is not
    /// registered and [`ToyenError::Schema`] when its properties do not fit
    /// the kind.
    pub fn instantiate(
        &self,
        config: &Config,
        located: LocatedDeclaration,
    ) -> Result<Module, ToyenError> {
        let LocatedDeclaration { file, declaration } = located;
        let Some(factory) = self.factories.get(&declaration.kind) else {
            return Err(ToyenError::UnknownKind {
                module: declaration.name,
                kind: declaration.kind,
                known: self.kinds().join(", "),
            });
        };
        let kind = factory(config, declaration.properties).map_err(|source| {
            ToyenError::Schema {
                module: declaration.name.clone(),
                kind: declaration.kind.clone(),
                source,
            }
        })?;
        Ok(Module::new(declaration.name, declaration.deps, kind).declared_in_file(file))
    }
}

fn decode<T: DeserializeOwned>(props: Properties) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(props))
}
