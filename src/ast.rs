//! Declaration file Abstract Syntax Tree structures.
//!
//! A declaration file is a YAML document listing typed module declarations
//! and, optionally, subdirectories that contain further declaration files.
//! The loader parses YAML into a [`serde_json::Value`] first and then
//! deserialises it into these structures, leaving each module's property bag
//! untyped until the registry decodes it against the schema of its kind.
//!
//! ```rust
//! use toyen::ast::DeclarationFile;
//!
//! let json = serde_json::json!({
//!     "toyen_version": "1.0.0",
//!     "modules": [
//!         { "kind": "alias", "name": "all", "deps": ["tools"] },
//!     ],
//! });
//! let file: DeclarationFile = serde_json::from_value(json).expect("parse");
//! assert_eq!(file.modules[0].name, "all");
//! assert_eq!(file.modules[0].deps, vec!["tools"]);
//! ```

use semver::Version;
use serde::{Deserialize, Serialize};

/// Untyped property bag of a single module declaration.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Top-level structure of a declaration file.
///
/// ```yaml
/// toyen_version: "1.0.0"
/// subdirs: [third_party/zlib]
/// modules:
///   - kind: copy
///     name: headers
///     sources: [a.h, b.h]
///     destination: out/include
/// ```
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeclarationFile {
    /// Semantic version of the declaration format.
    pub toyen_version: Version,

    /// Directories, relative to this file, holding further declaration files
    /// with the same file name.
    #[serde(default)]
    pub subdirs: Vec<String>,

    /// Module declarations in authoring order.
    #[serde(default)]
    pub modules: Vec<Declaration>,
}

/// A single module declaration as written by the author.
///
/// `kind`, `name` and `deps` are common to every kind; every other key is
/// collected into [`Declaration::properties`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Declaration {
    /// Registered kind determining how the module compiles.
    pub kind: String,
    /// Target name, unique across every loaded file.
    pub name: String,
    /// Names of the modules this one depends on, in declaration order.
    #[serde(default)]
    pub deps: Vec<String>,
    /// Kind-specific parameters.
    #[serde(flatten)]
    pub properties: Properties,
}
