//! Command line interface definition using clap.
//!
//! The CLI names the root declaration file and supplies everything the
//! [`Config`] needs. [`Cli::config`] resolves defaults and makes the
//! directories absolute; [`Cli::regeneration_flags`] renders the resolved
//! settings back into flags so the regeneration action reproduces them.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::num::NonZeroUsize;
use std::thread;

use crate::config::{Config, Triple};

mod parsing;

use parsing::{parse_jobs, parse_triple};

/// Maximum number of jobs accepted by the CLI.
pub const MAX_JOBS: usize = 256;

/// Compile module declarations into a self-regenerating Ninja build file.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root declaration file.
    #[arg(value_name = "FILE")]
    pub file: Utf8PathBuf,

    /// Source directory exposed to declarations as `$SrcDir`.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub src: Utf8PathBuf,

    /// Directory receiving `build.ninja` and its depfile.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out: Utf8PathBuf,

    /// Host platform triple; defaults to the running platform.
    #[arg(long, value_name = "TRIPLE", value_parser = parse_triple)]
    pub host: Option<String>,

    /// Target platform triple; defaults to the host triple.
    #[arg(long, value_name = "TRIPLE", value_parser = parse_triple)]
    pub target: Option<String>,

    /// Parallelism passed to nested `make` and `ninja` invocations.
    #[arg(short, long, value_name = "N", value_parser = parse_jobs)]
    pub jobs: Option<usize>,

    /// Enable verbose logging output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate without writing; the Ninja text goes to standard output.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Resolve defaults into a [`Config`], making relative directories
    /// absolute against `cwd`.
    #[must_use]
    pub fn config(&self, cwd: &Utf8Path) -> Config {
        let host = self.host.as_deref().map_or_else(Triple::host, Triple::parse);
        let target = self
            .target
            .as_deref()
            .map_or_else(|| host.clone(), Triple::parse);
        Config::new(
            absolute(cwd, &self.src),
            absolute(cwd, &self.out),
            host,
            target,
            self.jobs.unwrap_or_else(default_jobs),
        )
    }

    /// Root declaration file made absolute against `cwd`.
    #[must_use]
    pub fn root_file(&self, cwd: &Utf8Path) -> Utf8PathBuf {
        absolute(cwd, &self.file)
    }

    /// Flags reproducing `config` on a later run.
    #[must_use]
    pub fn regeneration_flags(config: &Config) -> Vec<String> {
        vec![
            "--src".to_owned(),
            config.src_dir().to_string(),
            "--out".to_owned(),
            config.out_dir().to_string(),
            "--host".to_owned(),
            config.host().to_string(),
            "--target".to_owned(),
            config.target().to_string(),
            "--jobs".to_owned(),
            config.jobs().to_string(),
        ]
    }
}

fn default_jobs() -> usize {
    thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .min(MAX_JOBS)
}

/// Join `path` onto `cwd` unless already absolute, dropping `.` components and
/// folding `..` lexically.
fn absolute(cwd: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    use camino::Utf8Component;

    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    let mut normalised = Utf8PathBuf::new();
    for component in joined.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if !normalised.pop() {
                    normalised.push(component);
                }
            }
            other => normalised.push(other),
        }
    }
    normalised
}
