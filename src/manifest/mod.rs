//! Declaration file loading.
//!
//! The loader reads the root declaration file, follows every `subdirs` entry
//! to the file of the same name in that directory, and returns the module
//! declarations in load order together with the list of files read. That list
//! feeds the depfile so the generated build graph regenerates whenever any
//! declaration changes.
//!
//! Errors are collected across files rather than stopping at the first bad
//! file.

use crate::ast::{Declaration, DeclarationFile};
use crate::error::{ErrorSet, ToyenError};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexSet;
use std::fs;
use tracing::{debug, warn};

mod diagnostics;
mod hints;

pub use diagnostics::{ManifestError, ManifestName, ManifestSource, map_data_error, map_yaml_error};

/// Major version of the declaration format understood by this build.
pub const SUPPORTED_MAJOR_VERSION: u64 = 1;

/// A module declaration together with the file it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedDeclaration {
    /// File holding the declaration.
    pub file: Utf8PathBuf,
    /// The declaration itself.
    pub declaration: Declaration,
}

/// Result of loading a root declaration file and its subdirectories.
#[derive(Debug, Default)]
pub struct LoadedDeclarations {
    /// Declarations in load order: each file's modules, then its subdirs.
    pub modules: Vec<LocatedDeclaration>,
    /// Every declaration file read, in read order.
    pub files: Vec<Utf8PathBuf>,
}

/// Parse one declaration file from a string.
///
/// # Errors
///
/// Returns [`ManifestError::Parse`] for invalid YAML and
/// [`ManifestError::Structure`] when the YAML does not describe a declaration
/// file.
///
/// # Examples
///
/// ```rust
/// use toyen::manifest::{self, ManifestName};
///
/// let yaml = "toyen_version: \"1.0.0\"\nmodules:\n  - kind: alias\n    name: all\n";
/// let file = manifest::from_str(yaml, &ManifestName::new("Blueprints")).expect("parse");
/// assert_eq!(file.modules.len(), 1);
/// ```
pub fn from_str(yaml: &str, name: &ManifestName) -> Result<DeclarationFile, ManifestError> {
    let doc: serde_json::Value =
        serde_saphyr::from_str(yaml).map_err(|e| ManifestError::Parse {
            source: map_yaml_error(e, &ManifestSource::from(yaml), name),
        })?;
    serde_json::from_value(doc).map_err(|e| ManifestError::Structure {
        source: map_data_error(e, name),
    })
}

/// Load the root declaration file at `root` and every file reachable through
/// `subdirs`.
///
/// # Errors
///
/// Returns an [`ErrorSet`] holding every read, parse, structure and version
/// error encountered across all files.
pub fn from_path(root: &Utf8Path) -> Result<LoadedDeclarations, ErrorSet> {
    let file_name = root.file_name().unwrap_or(root.as_str()).to_owned();
    let mut loader = Loader {
        file_name,
        seen: IndexSet::new(),
        loaded: LoadedDeclarations::default(),
        errors: Vec::new(),
    };
    loader.load(root);
    ErrorSet::check(loader.errors, loader.loaded)
}

struct Loader {
    file_name: String,
    seen: IndexSet<Utf8PathBuf>,
    loaded: LoadedDeclarations,
    errors: Vec<ToyenError>,
}

impl Loader {
    fn load(&mut self, path: &Utf8Path) {
        if !self.seen.insert(path.to_path_buf()) {
            warn!(file = %path, "declaration file reached more than once; skipping");
            return;
        }
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(source) => {
                self.errors.push(
                    ManifestError::Read {
                        path: path.to_path_buf(),
                        source,
                    }
                    .into(),
                );
                return;
            }
        };
        self.loaded.files.push(path.to_path_buf());

        let file = match from_str(&data, &ManifestName::new(path.as_str())) {
            Ok(file) => file,
            Err(err) => {
                self.errors.push(err.into());
                return;
            }
        };
        if file.toyen_version.major != SUPPORTED_MAJOR_VERSION {
            self.errors.push(
                ManifestError::UnsupportedVersion {
                    path: path.to_path_buf(),
                    version: file.toyen_version,
                }
                .into(),
            );
            return;
        }
        debug!(
            file = %path,
            modules = file.modules.len(),
            subdirs = file.subdirs.len(),
            "loaded declaration file"
        );

        self.loaded
            .modules
            .extend(file.modules.into_iter().map(|declaration| LocatedDeclaration {
                file: path.to_path_buf(),
                declaration,
            }));

        let dir = path.parent().unwrap_or_else(|| Utf8Path::new(""));
        for subdir in &file.subdirs {
            let child = dir.join(subdir).join(&self.file_name);
            self.load(&child);
        }
    }
}

#[cfg(test)]
mod tests;
