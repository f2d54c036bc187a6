//! Temporary directories holding declaration files.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// A temporary source tree. The directory is removed on drop.
#[derive(Debug)]
pub struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create temp dir")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temp dir {} is not UTF-8", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Absolute path of the workspace root.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// `rel` resolved inside the workspace.
    pub fn path(&self, rel: &str) -> Utf8PathBuf {
        self.root.join(rel)
    }

    /// Write `contents` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Write a declaration file at `rel` holding `modules`, a YAML sequence
    /// body indented by two spaces per entry.
    pub fn declarations(&self, rel: &str, modules: &str) -> Result<Utf8PathBuf> {
        self.write(
            rel,
            &format!("toyen_version: \"1.0.0\"\nmodules:\n{modules}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn declarations_are_written_with_a_version_header() {
        let ws = Workspace::new().expect("workspace");
        let path = ws
            .declarations("sub/Blueprints", "  - {kind: alias, name: all}\n")
            .expect("write");
        let text = fs::read_to_string(&path).expect("read");
        assert!(text.starts_with("toyen_version: \"1.0.0\"\n"));
        assert!(path.starts_with(ws.root()));
    }
}
