//! Process-wide build configuration.
//!
//! A [`Config`] is assembled once from the command line before any module is
//! compiled and is then shared by reference with every compilation step. It
//! carries the source and output directories, the host and target platform
//! triples, and the job count handed to nested build drivers.
//!
//! # Examples
//!
//! ```
//! use toyen::config::Triple;
//!
//! let triple = Triple::parse("aarch64-unknown-linux");
//! assert_eq!(triple.arch(), "aarch64");
//! assert_eq!(triple.os(), "Linux");
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use tracing::warn;

/// File name of the generated Ninja build graph inside the output directory.
pub const BUILD_FILE_NAME: &str = "build.ninja";

/// A platform triple decomposed into its architecture and OS components.
///
/// Parsing never fails. Triples without a `-` separator degrade to using the
/// whole string as both architecture and OS, and an empty triple yields empty
/// components; both cases are reported through `tracing` so the degradation
/// is visible in verbose runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    raw: String,
    arch: String,
    os: String,
}

impl Triple {
    /// Split `raw` on `-`, taking the first component as the architecture and
    /// the capitalised last component as the operating system.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if !raw.contains('-') {
            warn!(triple = raw, "platform triple has no '-' separator");
        }
        let mut parts = raw.split('-');
        let arch = parts.next().unwrap_or_default().to_owned();
        let os = capitalise(raw.rsplit('-').next().unwrap_or_default());
        Self {
            raw: raw.to_owned(),
            arch,
            os,
        }
    }

    /// Triple describing the platform this binary is running on.
    #[must_use]
    pub fn host() -> Self {
        let arch = match std::env::consts::ARCH {
            "x86" => "i386",
            "x86_64" => "x86_64",
            "arm" => "armv7a",
            "aarch64" => "aarch64",
            _ => "unknown",
        };
        Self::parse(&format!("{arch}-{}", std::env::consts::OS))
    }

    /// The triple exactly as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Architecture component, e.g. `x86_64`.
    #[must_use]
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Capitalised operating-system component, e.g. `Linux`.
    #[must_use]
    pub fn os(&self) -> &str {
        &self.os
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Read-only configuration shared by every module during compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    src_dir: Utf8PathBuf,
    out_dir: Utf8PathBuf,
    host: Triple,
    target: Triple,
    jobs: usize,
}

impl Config {
    /// Assemble a configuration from already-resolved inputs.
    #[must_use]
    pub const fn new(
        src_dir: Utf8PathBuf,
        out_dir: Utf8PathBuf,
        host: Triple,
        target: Triple,
        jobs: usize,
    ) -> Self {
        Self {
            src_dir,
            out_dir,
            host,
            target,
            jobs,
        }
    }

    /// Directory holding the sources the declarations refer to.
    #[must_use]
    pub fn src_dir(&self) -> &Utf8Path {
        &self.src_dir
    }

    /// Directory receiving the generated build graph.
    #[must_use]
    pub fn out_dir(&self) -> &Utf8Path {
        &self.out_dir
    }

    /// Platform the build tools run on.
    #[must_use]
    pub const fn host(&self) -> &Triple {
        &self.host
    }

    /// Platform the build produces artefacts for.
    #[must_use]
    pub const fn target(&self) -> &Triple {
        &self.target
    }

    /// Parallelism passed to nested `make`/`ninja` invocations.
    #[must_use]
    pub const fn jobs(&self) -> usize {
        self.jobs
    }

    /// Path of the generated Ninja file.
    #[must_use]
    pub fn build_file(&self) -> Utf8PathBuf {
        self.out_dir.join(BUILD_FILE_NAME)
    }

    /// Path of the depfile listing every declaration file that was read.
    #[must_use]
    pub fn depfile(&self) -> Utf8PathBuf {
        self.out_dir.join(format!("{BUILD_FILE_NAME}.d"))
    }

    /// Top-level Ninja variables exposing the configuration to declarations.
    #[must_use]
    pub fn variables(&self) -> Vec<(&'static str, String)> {
        vec![
            ("SrcDir", self.src_dir.to_string()),
            ("OutDir", self.out_dir.to_string()),
            ("HostTriple", self.host.as_str().to_owned()),
            ("TargetTriple", self.target.as_str().to_owned()),
            ("HostArch", self.host.arch().to_owned()),
            ("HostOS", self.host.os().to_owned()),
            ("TargetArch", self.target.arch().to_owned()),
            ("TargetOS", self.target.os().to_owned()),
            ("Jobs", self.jobs.to_string()),
        ]
    }
}
