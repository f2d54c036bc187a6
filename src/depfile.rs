//! Depfile text for the regeneration action.
//!
//! Ninja reads the depfile named by the `regenerate` rule after the action
//! runs and records every listed file as an implicit input of the build file.

use camino::{Utf8Path, Utf8PathBuf};

/// Render a Makefile-style depfile stating that `target` depends on `files`.
///
/// ```
/// use camino::{Utf8Path, Utf8PathBuf};
///
/// let text = toyen::depfile::generate(
///     Utf8Path::new("/out/build.ninja"),
///     &[Utf8PathBuf::from("/src/Blueprints")],
/// );
/// assert_eq!(text, "/out/build.ninja: \\\n  /src/Blueprints\n");
/// ```
#[must_use]
pub fn generate(target: &Utf8Path, files: &[Utf8PathBuf]) -> String {
    let mut text = format!("{}:", escape(target.as_str()));
    for file in files {
        text.push_str(" \\\n  ");
        text.push_str(&escape(file.as_str()));
    }
    text.push('\n');
    text
}

fn escape(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for ch in path.chars() {
        match ch {
            ' ' => escaped.push_str("\\ "),
            '#' => escaped.push_str("\\#"),
            '$' => escaped.push_str("$$"),
            other => escaped.push(other),
        }
    }
    escaped
}
