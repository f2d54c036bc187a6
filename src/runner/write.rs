//! Atomic file output.
//!
//! Every file is first written to a temporary file in its destination
//! directory. Only once all of them are staged are they persisted over their
//! destinations, so a failure never leaves a half-written build file behind.

use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::ToyenError;

/// A file written to a temporary location, awaiting [`Staged::persist`].
pub(super) struct Staged {
    path: Utf8PathBuf,
    file: NamedTempFile,
}

/// Write `contents` to a temporary file next to `path`.
pub(super) fn stage(path: &Utf8Path, contents: &str) -> Result<Staged, ToyenError> {
    let emission = |source| ToyenError::Emission {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(emission)?;
    file.write_all(contents.as_bytes()).map_err(emission)?;
    file.flush().map_err(emission)?;
    Ok(Staged {
        path: path.to_path_buf(),
        file,
    })
}

impl Staged {
    /// Atomically move the staged file over its destination.
    pub(super) fn persist(self) -> Result<(), ToyenError> {
        let Self { path, file } = self;
        file.persist(&path)
            .map_err(|err| ToyenError::Emission {
                path: path.clone(),
                source: err.error,
            })?;
        info!(path = %path, "wrote file");
        Ok(())
    }
}
