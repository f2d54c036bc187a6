//! Translates declaration parsing errors into actionable diagnostics.
//!
//! YAML syntax errors from `serde_saphyr` become [`miette`] diagnostics with a
//! labelled span and, where a common mistake is recognised, a hint. Errors in
//! the shape of otherwise valid YAML are reported against the file name.

use super::hints::YAML_HINTS;
use camino::Utf8PathBuf;
use miette::{Diagnostic, NamedSource, SourceSpan};
use semver::Version;
use serde_saphyr::{Error as YamlError, Location};
use std::io;
use thiserror::Error;

/// YAML source content of a declaration file.
///
/// # Examples
/// ```rust
/// use toyen::manifest::ManifestSource;
/// let source = ManifestSource::from("modules: []");
/// assert_eq!(source.as_str(), "modules: []");
/// ```
#[derive(Debug, Clone)]
pub struct ManifestSource(String);

impl ManifestSource {
    /// Wrap YAML source text.
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    /// Borrow the source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for ManifestSource {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for ManifestSource {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Display name of a declaration file used in diagnostics.
///
/// # Examples
/// ```rust
/// use toyen::manifest::ManifestName;
/// let name = ManifestName::new("Blueprints");
/// assert_eq!(name.as_str(), "Blueprints");
/// ```
#[derive(Debug, Clone)]
pub struct ManifestName(String);

impl ManifestName {
    /// Wrap a display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the display name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for ManifestName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for ManifestName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ManifestName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors raised while loading declaration files.
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(toyen::manifest::read))]
    Read {
        /// File that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The file is not valid YAML.
    #[error("{source}")]
    #[diagnostic(code(toyen::manifest::parse))]
    Parse {
        /// Diagnostic pointing at the offending location.
        #[source]
        #[diagnostic_source]
        source: Box<dyn Diagnostic + Send + Sync + 'static>,
    },

    /// The YAML does not have the shape of a declaration file.
    #[error("{source}")]
    #[diagnostic(code(toyen::manifest::structure))]
    Structure {
        /// Diagnostic describing the mismatch.
        #[source]
        #[diagnostic_source]
        source: Box<dyn Diagnostic + Send + Sync + 'static>,
    },

    /// The file declares a format version this build does not understand.
    #[error("{path} uses unsupported toyen_version {version}; expected 1.x")]
    #[diagnostic(code(toyen::manifest::version))]
    UnsupportedVersion {
        /// File declaring the version.
        path: Utf8PathBuf,
        /// Declared version.
        version: Version,
    },
}

/// Reconstruct the byte offset for a `serde_saphyr::Location`.
///
/// Only line and column accessors are available, so the offset is derived by
/// walking the source. Columns past the end of the line clamp to its end and
/// both `\n` and `\r\n` line endings are tolerated.
fn byte_index(src: &str, line: u64, column: u64) -> usize {
    let target_line = usize::try_from(line.saturating_sub(1)).unwrap_or(usize::MAX);
    let target_column = usize::try_from(column.saturating_sub(1)).unwrap_or(usize::MAX);
    let mut offset = 0usize;
    for (idx, segment) in src.split_inclusive('\n').enumerate() {
        if idx == target_line {
            let without_newline = segment.strip_suffix('\n').unwrap_or(segment);
            let cleaned = without_newline
                .strip_suffix('\r')
                .unwrap_or(without_newline);
            let column_offset = cleaned
                .char_indices()
                .nth(target_column)
                .map_or(cleaned.len(), |(byte_idx, _)| byte_idx);
            return offset + column_offset;
        }
        offset += segment.len();
    }
    src.len()
}

fn to_span(src: &ManifestSource, loc: Location) -> SourceSpan {
    let at = byte_index(src.as_ref(), loc.line(), loc.column());
    let bytes = src.as_ref().as_bytes();
    let is_line_break = |b: u8| b == b'\n' || b == b'\r';
    let (start, end) = match bytes.get(at) {
        Some(&b) if !is_line_break(b) => (at, at + 1),
        _ => {
            let start = if at > 0 && bytes.get(at - 1).is_some_and(|p| !is_line_break(*p)) {
                at - 1
            } else {
                at
            };
            (start, at)
        }
    };
    SourceSpan::new(start.into(), end.saturating_sub(start))
}

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(toyen::yaml::parse))]
struct YamlDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("parse error here")]
    span: Option<SourceSpan>,
    #[help]
    help: Option<String>,
    #[source]
    source: YamlError,
    message: String,
}

fn has_tab_indent(src: &ManifestSource, loc: Option<Location>) -> bool {
    let Some(loc) = loc else {
        return false;
    };
    let line_idx = usize::try_from(loc.line().saturating_sub(1)).unwrap_or(usize::MAX);
    let line = src.as_ref().lines().nth(line_idx).unwrap_or("");
    line.chars()
        .take_while(|c| c.is_whitespace())
        .any(|c| c == '\t')
}

fn hint_for(err_str: &str, src: &ManifestSource, loc: Option<Location>) -> Option<String> {
    if has_tab_indent(src, loc) {
        return Some("Use spaces for indentation; tabs are invalid in YAML.".into());
    }
    let lower = err_str.to_lowercase();
    YAML_HINTS
        .iter()
        .find(|(needle, _)| lower.contains(*needle))
        .map(|(_, hint)| (*hint).into())
}

/// Map a `serde_saphyr` YAML parse error into a [`miette`] diagnostic carrying
/// the source, a span at the reported location and an optional hint.
#[must_use]
pub fn map_yaml_error(
    err: YamlError,
    src: &ManifestSource,
    name: &ManifestName,
) -> Box<dyn Diagnostic + Send + Sync + 'static> {
    let loc = err.location();
    let (line, col, span) = loc.map_or((1, 1, None), |l| {
        (l.line(), l.column(), Some(to_span(src, l)))
    });
    let err_str = err.to_string();
    let help = hint_for(&err_str, src, loc);
    let mut message = format!("{name}: YAML parse error at line {line}, column {col}: {err_str}");
    if let Some(hint) = &help {
        message.push_str("\nhelp: ");
        message.push_str(hint);
    }

    Box::new(YamlDiagnostic {
        src: NamedSource::new(name.as_ref(), src.as_ref().to_owned()),
        span,
        help,
        source: err,
        message,
    })
}

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(toyen::manifest::structure))]
struct DataDiagnostic {
    #[source]
    source: serde_json::Error,
    message: String,
}

/// Map a structural deserialisation error into a diagnostic naming the file.
#[must_use]
pub fn map_data_error(
    err: serde_json::Error,
    name: &ManifestName,
) -> Box<dyn Diagnostic + Send + Sync + 'static> {
    let message = format!("{name}: invalid declaration file: {err}");
    Box::new(DataDiagnostic {
        source: err,
        message,
    })
}
