//! End-to-end generation pipeline.
//!
//! [`generate`] runs every phase in memory: load declarations, instantiate
//! modules, resolve the graph, compile, append the regeneration action and
//! render the Ninja file and depfile. Each phase reports all of its errors
//! before the pipeline stops. [`run`] wraps it for the command line and is the
//! only place that touches the output directory.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::{self, Write};
use tracing::{debug, info};

use crate::bootstrap::{BOOTSTRAP_OWNER, Bootstrap};
use crate::cli::Cli;
use crate::config::Config;
use crate::error::{ErrorSet, ToyenError};
use crate::graph::DependencyGraph;
use crate::registry::ModuleRegistry;
use crate::{compiler, depfile, manifest, ninja_gen};

mod write;

/// Output of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Text of `build.ninja`.
    pub ninja: String,
    /// Text of `build.ninja.d`.
    pub depfile: String,
    /// Every declaration file read, in read order.
    pub files: Vec<Utf8PathBuf>,
}

/// Compile the declarations rooted at `root` into Ninja text.
///
/// # Errors
///
/// Returns the [`ErrorSet`] of the first phase that failed.
pub fn generate(
    config: &Config,
    registry: &ModuleRegistry,
    root: &Utf8Path,
    bootstrap: &Bootstrap,
) -> Result<Generated, ErrorSet> {
    let loaded = manifest::from_path(root)?;
    debug!(
        files = loaded.files.len(),
        modules = loaded.modules.len(),
        "loaded declarations"
    );

    let mut graph = DependencyGraph::new();
    let mut errors: Vec<ToyenError> = Vec::new();
    for located in loaded.modules {
        let added = registry
            .instantiate(config, located)
            .and_then(|module| graph.add_module(module));
        if let Err(err) = added {
            errors.push(err);
        }
    }
    ErrorSet::check(errors, ())?;
    graph.resolve()?;

    let mut plan = compiler::compile(&graph)?;
    plan.push(BOOTSTRAP_OWNER, bootstrap.action())?;
    debug!(actions = plan.len(), "planned build actions");

    Ok(Generated {
        ninja: ninja_gen::generate(config, &plan),
        depfile: depfile::generate(&config.build_file(), &loaded.files),
        files: loaded.files,
    })
}

/// Execute the CLI: generate and write the build file and its depfile.
///
/// # Errors
///
/// Returns an error when the working directory or executable cannot be
/// determined, when generation fails, or when writing fails.
pub fn run(cli: &Cli) -> Result<()> {
    let current = std::env::current_dir().context("failed to determine the working directory")?;
    let cwd = Utf8PathBuf::from_path_buf(current)
        .map_err(|path| anyhow::anyhow!("working directory {} is not UTF-8", path.display()))?;
    let config = cli.config(&cwd);
    let root = cli.root_file(&cwd);
    debug!(?config, root = %root, "resolved configuration");

    let bootstrap = Bootstrap::from_current_exe(
        Cli::regeneration_flags(&config),
        root.clone(),
        config.build_file(),
    )?;
    let registry = ModuleRegistry::with_builtin_kinds();
    let generated = generate(&config, &registry, &root, &bootstrap)?;

    if cli.dry_run {
        info!("dry run; nothing written");
        io::stdout()
            .lock()
            .write_all(generated.ninja.as_bytes())
            .context("failed to write to standard output")?;
        return Ok(());
    }

    fs::create_dir_all(config.out_dir())
        .with_context(|| format!("failed to create output directory {}", config.out_dir()))?;
    let staged = [
        write::stage(&config.build_file(), &generated.ninja)?,
        write::stage(&config.depfile(), &generated.depfile)?,
    ];
    for file in staged {
        file.persist()?;
    }
    Ok(())
}
