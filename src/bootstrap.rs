//! Self-regeneration of the generated build file.
//!
//! The final action of every plan re-runs this program with the same flags
//! whenever the build file is stale. Its depfile lists every declaration file
//! read, so editing any of them triggers regeneration.

use camino::Utf8PathBuf;
use std::io;

use crate::error::ToyenError;
use crate::ir::{ActionRule, BuildAction, rules};
use crate::module::join_words;

/// Owner recorded in the plan for the regeneration action.
pub const BOOTSTRAP_OWNER: &str = "<bootstrap>";

/// Everything needed to re-run the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    executable: Utf8PathBuf,
    flags: Vec<String>,
    root_file: Utf8PathBuf,
    build_file: Utf8PathBuf,
}

impl Bootstrap {
    /// Regenerate `build_file` by running `executable` with `flags` on
    /// `root_file`.
    #[must_use]
    pub const fn new(
        executable: Utf8PathBuf,
        flags: Vec<String>,
        root_file: Utf8PathBuf,
        build_file: Utf8PathBuf,
    ) -> Self {
        Self {
            executable,
            flags,
            root_file,
            build_file,
        }
    }

    /// As [`Bootstrap::new`], using the path of the running executable.
    ///
    /// # Errors
    ///
    /// Returns [`ToyenError::Bootstrap`] when the executable cannot be
    /// located or its path is not valid UTF-8.
    pub fn from_current_exe(
        flags: Vec<String>,
        root_file: Utf8PathBuf,
        build_file: Utf8PathBuf,
    ) -> Result<Self, ToyenError> {
        let exe = std::env::current_exe().map_err(|source| ToyenError::Bootstrap { source })?;
        let executable = Utf8PathBuf::from_path_buf(exe).map_err(|path| ToyenError::Bootstrap {
            source: io::Error::new(
                io::ErrorKind::InvalidData,
                format!("executable path is not valid UTF-8: {}", path.display()),
            ),
        })?;
        Ok(Self::new(executable, flags, root_file, build_file))
    }

    /// The regeneration action.
    #[must_use]
    pub fn action(&self) -> BuildAction {
        BuildAction::new(
            ActionRule::Command(&rules::REGENERATE),
            [self.build_file.as_str()],
        )
        .arg("executable", self.executable.as_str())
        .arg("flags", join_words(&self.flags))
        .arg("rootFile", self.root_file.as_str())
    }
}
