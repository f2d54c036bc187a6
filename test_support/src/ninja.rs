//! Helpers for working with the system `ninja` binary in integration tests.

use camino::Utf8Path;
use std::process::{Command, ExitStatus, Output};
use thiserror::Error;

/// Errors that can occur when preparing Ninja-backed integration tests.
#[derive(Error, Debug)]
pub enum NinjaProbeError {
    /// The `ninja --version` probe failed to spawn, most likely because Ninja
    /// is not present in `PATH`.
    #[error("failed to spawn `ninja --version`: {0}")]
    ProbeSpawn(#[source] std::io::Error),
    /// `ninja --version` executed but returned a non-success status.
    #[error("`ninja --version` returned non-success status: {0}")]
    ProbeFailed(ExitStatus),
}

/// Check that a working `ninja` is on `PATH`. Callers should skip their
/// scenario when this returns `Err`.
pub fn probe_ninja() -> Result<(), NinjaProbeError> {
    let output = Command::new("ninja")
        .arg("--version")
        .output()
        .map_err(NinjaProbeError::ProbeSpawn)?;

    if !output.status.success() {
        return Err(NinjaProbeError::ProbeFailed(output.status));
    }
    Ok(())
}

/// Run `ninja -C <dir> <args>` and capture its output.
pub fn run_ninja(dir: &Utf8Path, args: &[&str]) -> std::io::Result<Output> {
    Command::new("ninja").arg("-C").arg(dir).args(args).output()
}
