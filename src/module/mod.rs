//! Module records and per-kind action compilation.
//!
//! Every declaration becomes a [`Module`] whose [`ModuleKind`] carries the
//! typed properties of its kind. Compilation is a pure function of those
//! properties, the module name and the target names of its direct
//! dependencies; no module observes another module's state.
//!
//! Every kind exposes the module name as its build target, so dependants can
//! always refer to a module by name regardless of the files it produces.

use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;

use crate::ir::BuildAction;

mod alias;
mod clean;
mod cmake;
mod copy;
mod driver;
mod gn;
mod install;
mod script;

pub use alias::AliasModule;
pub use clean::CleanModule;
pub use cmake::CMakeModule;
pub use copy::CopyModule;
pub use driver::{MakeModule, NinjaModule};
pub use gn::GnModule;
pub use install::InstallModule;
pub use script::ScriptModule;

/// Inputs available to a kind's compiler.
#[derive(Debug, Clone, Copy)]
pub struct CompileContext<'a> {
    /// Name of the module being compiled.
    pub name: &'a str,
    /// Target names of the module's direct dependencies, in declaration order.
    pub dependency_targets: &'a [String],
}

/// The closed set of module kinds, each with its own properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleKind {
    /// Group targets under one phony name.
    Alias(AliasModule),
    /// Remove directories, or aggregate other clean modules.
    Clean(CleanModule),
    /// Configure a CMake project.
    CMake(CMakeModule),
    /// Copy files.
    Copy(CopyModule),
    /// Generate a GN build directory.
    Gn(GnModule),
    /// Install files into a directory in one batch.
    Install(InstallModule),
    /// Invoke `make`.
    Make(MakeModule),
    /// Invoke a nested `ninja`.
    Ninja(NinjaModule),
    /// Run a script.
    Script(ScriptModule),
}

impl ModuleKind {
    /// Kind name as written in declarations.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Alias(_) => "alias",
            Self::Clean(_) => "clean",
            Self::CMake(_) => "cmake",
            Self::Copy(_) => "copy",
            Self::Gn(_) => "gn",
            Self::Install(_) => "install",
            Self::Make(_) => "make",
            Self::Ninja(_) => "ninja",
            Self::Script(_) => "script",
        }
    }

    /// Compile the module into build actions.
    ///
    /// Kinds whose natural outputs are files (`cmake`, `gn`, `install`, and
    /// drivers with declared outputs) gain a trailing phony named after the
    /// module over the outputs of their final action, so the module name is
    /// always a target.
    #[must_use]
    pub fn compile(&self, ctx: &CompileContext<'_>) -> Vec<BuildAction> {
        let mut actions = self.compile_kind(ctx);
        let exposes_name = actions
            .iter()
            .any(|action| action.outputs.iter().any(|out| out == ctx.name));
        if !exposes_name && let Some(last) = actions.last() {
            let phony = BuildAction::phony(ctx.name)
                .inputs(last.outputs.iter().cloned())
                .optional(last.optional);
            actions.push(phony);
        }
        actions
    }

    fn compile_kind(&self, ctx: &CompileContext<'_>) -> Vec<BuildAction> {
        match self {
            Self::Alias(m) => m.compile(ctx),
            Self::Clean(m) => m.compile(ctx),
            Self::CMake(m) => m.compile(ctx),
            Self::Copy(m) => m.compile(ctx),
            Self::Gn(m) => m.compile(ctx),
            Self::Install(m) => m.compile(ctx),
            Self::Make(m) => m.compile(ctx),
            Self::Ninja(m) => m.compile(ctx),
            Self::Script(m) => m.compile(ctx),
        }
    }
}

/// A declared build step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    name: String,
    dependencies: Vec<String>,
    kind: ModuleKind,
    declared_in: Utf8PathBuf,
}

impl Module {
    /// Create a module named `name` depending on `dependencies`.
    #[must_use]
    pub fn new(name: impl Into<String>, dependencies: Vec<String>, kind: ModuleKind) -> Self {
        Self {
            name: name.into(),
            dependencies,
            kind,
            declared_in: Utf8PathBuf::new(),
        }
    }

    /// Record the declaration file the module came from.
    #[must_use]
    pub fn declared_in_file(mut self, file: impl Into<Utf8PathBuf>) -> Self {
        self.declared_in = file.into();
        self
    }

    /// Unique module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dependency names exactly as declared.
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Kind and typed properties.
    #[must_use]
    pub const fn kind(&self) -> &ModuleKind {
        &self.kind
    }

    /// Declaration file, empty for modules built in code.
    #[must_use]
    pub fn declared_in(&self) -> &Utf8Path {
        &self.declared_in
    }

    /// Build target other modules reach this module through.
    #[must_use]
    pub fn target_name(&self) -> &str {
        &self.name
    }

    /// Compile the module given its direct dependencies' target names.
    #[must_use]
    pub fn compile(&self, dependency_targets: &[String]) -> Vec<BuildAction> {
        self.kind.compile(&CompileContext {
            name: &self.name,
            dependency_targets,
        })
    }
}

/// Join values with single spaces; no quoting is applied.
pub(crate) fn join_words(words: &[String]) -> String {
    words.iter().join(" ")
}

/// Normalise a directory for use as an action output.
///
/// Trailing separators are dropped. Returns `None` when there is nothing to
/// create: an empty path or the current directory.
fn directory_output(dir: &str) -> Option<String> {
    let trimmed = dir.trim_end_matches('/');
    match trimmed {
        "" if dir.starts_with('/') => Some("/".to_owned()),
        "" | "." => None,
        other => Some(other.to_owned()),
    }
}

/// Directory containing `path`, `.` when it has none.
fn parent_dir(path: &str) -> String {
    Utf8Path::new(path)
        .parent()
        .map(Utf8Path::as_str)
        .filter(|parent| !parent.is_empty())
        .unwrap_or(".")
        .to_owned()
}

/// Final component of `path`, or the whole path when it has none.
fn base_name(path: &str) -> &str {
    Utf8Path::new(path).file_name().unwrap_or(path)
}

/// `base_name(source)` placed inside `dir`.
fn destination_in(dir: &str, source: &str) -> String {
    Utf8Path::new(dir).join(base_name(source)).into_string()
}

/// Build a schema error for a property that decoded but is unusable.
fn invalid(message: impl std::fmt::Display) -> serde_json::Error {
    <serde_json::Error as serde::de::Error>::custom(message)
}

/// Directory-creation action for `dir`, skipped when there is nothing to
/// create.
fn mkdir_action(dir: &str) -> Option<BuildAction> {
    use crate::ir::{ActionRule, rules};

    directory_output(dir)
        .map(|out| BuildAction::new(ActionRule::Command(&rules::MKDIR), [out]).optional(true))
}
