//! Test utilities for declaration workspaces and the system Ninja.
//!
//! [`Workspace`] lays out declaration files in a temporary directory and
//! [`ninja`] probes for a real `ninja` binary so validation tests can skip
//! when it is missing.

pub mod ninja;
pub mod workspace;

pub use workspace::Workspace;
