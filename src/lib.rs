//! Toyen core library.
//!
//! Toyen compiles typed module declarations written in YAML into a Ninja
//! build file. Each module names a build step (copying files, configuring a
//! CMake project, running a script, ...) and the modules it depends on. The
//! library loads the declarations, resolves the dependency graph, compiles
//! every module into build actions and renders them, together with an action
//! that regenerates the build file whenever a declaration changes.
//!
//! Toyen never runs the commands it describes; that is Ninja's job.

pub mod ast;
pub mod bootstrap;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod depfile;
pub mod error;
pub mod graph;
pub mod ir;
pub mod manifest;
pub mod module;
pub mod ninja_gen;
pub mod registry;
pub mod runner;

pub use error::{ErrorSet, ToyenError};
