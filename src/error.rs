//! Error taxonomy shared by every compilation phase.
//!
//! Phases that can report more than one problem (loading, instantiation,
//! resolution, compilation) collect their failures into an [`ErrorSet`] so the
//! user sees every error of a run at once. Nothing is written to disk while an
//! error set is non-empty.

use crate::manifest::ManifestError;
use camino::Utf8PathBuf;
use miette::Diagnostic;
use std::io;
use thiserror::Error;

/// A single failure raised while turning declarations into a build graph.
#[derive(Debug, Error, Diagnostic)]
pub enum ToyenError {
    /// A declaration file could not be read or understood.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] ManifestError),

    /// A declaration names a kind that was never registered.
    #[error("module '{module}' has unknown kind '{kind}' (registered kinds: {known})")]
    #[diagnostic(code(toyen::registry::unknown_kind))]
    UnknownKind {
        /// Module carrying the bad kind.
        module: String,
        /// Kind as written in the declaration.
        kind: String,
        /// Comma-separated list of registered kinds.
        known: String,
    },

    /// Two factories were registered under one kind name.
    #[error("module kind '{kind}' is registered more than once")]
    #[diagnostic(code(toyen::registry::duplicate_kind))]
    DuplicateKind {
        /// The contested kind name.
        kind: String,
    },

    /// Module properties do not match the schema of the module's kind.
    #[error("module '{module}' ({kind}) has invalid properties: {source}")]
    #[diagnostic(code(toyen::registry::schema))]
    Schema {
        /// Module whose properties failed to decode.
        module: String,
        /// Kind whose schema was applied.
        kind: String,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },

    /// Two modules share a target name.
    #[error("module '{name}' declared in {second} was already declared in {first}")]
    #[diagnostic(code(toyen::graph::duplicate_name))]
    DuplicateName {
        /// The contested module name.
        name: String,
        /// File of the first declaration.
        first: Utf8PathBuf,
        /// File of the rejected declaration.
        second: Utf8PathBuf,
    },

    /// A dependency names a module that does not exist.
    #[error("module '{from}' depends on undefined module '{missing}'")]
    #[diagnostic(code(toyen::graph::unresolved_dependency))]
    UnresolvedDependency {
        /// Module declaring the dependency.
        from: String,
        /// Name that could not be found.
        missing: String,
    },

    /// The dependency relation contains a cycle.
    #[error("dependency cycle detected: {}", .cycle.join(" -> "))]
    #[diagnostic(code(toyen::graph::cycle))]
    Cycle {
        /// Modules along the cycle; the first entry is repeated at the end.
        cycle: Vec<String>,
    },

    /// Two different actions claim the same output path.
    #[error("output '{output}' of module '{second}' is already produced by module '{first}'")]
    #[diagnostic(code(toyen::plan::duplicate_output))]
    DuplicateOutput {
        /// The contested output.
        output: String,
        /// Module owning the first producer.
        first: String,
        /// Module owning the rejected producer.
        second: String,
    },

    /// A compiled action declared no outputs.
    #[error("module '{module}' compiled an action without outputs")]
    #[diagnostic(code(toyen::plan::empty_outputs))]
    EmptyOutputs {
        /// Module owning the action.
        module: String,
    },

    /// The running executable could not be located, so no regeneration rule
    /// can be installed.
    #[error("cannot locate the running executable: {source}")]
    #[diagnostic(code(toyen::bootstrap::executable))]
    Bootstrap {
        /// Underlying lookup failure.
        #[source]
        source: io::Error,
    },

    /// Writing the build graph or depfile failed.
    #[error("failed to write {path}: {source}")]
    #[diagnostic(code(toyen::emit::write))]
    Emission {
        /// File being written.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Every error collected during one phase.
#[derive(Debug, Error, Diagnostic)]
#[error("{} error(s) prevented build graph generation", .errors.len())]
#[diagnostic(code(toyen::errors))]
pub struct ErrorSet {
    #[related]
    errors: Vec<ToyenError>,
}

impl ErrorSet {
    /// Wrap collected errors.
    #[must_use]
    pub const fn new(errors: Vec<ToyenError>) -> Self {
        Self { errors }
    }

    /// Borrow the collected errors in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[ToyenError] {
        &self.errors
    }

    /// Consume the set, returning the collected errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<ToyenError> {
        self.errors
    }

    /// Return `Ok(value)` when `errors` is empty, otherwise the set.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorSet`] wrapping `errors` when any were collected.
    pub fn check<T>(errors: Vec<ToyenError>, value: T) -> Result<T, Self> {
        if errors.is_empty() {
            Ok(value)
        } else {
            Err(Self::new(errors))
        }
    }
}

impl From<ToyenError> for ErrorSet {
    fn from(error: ToyenError) -> Self {
        Self::new(vec![error])
    }
}
