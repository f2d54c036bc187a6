//! `make` and `ninja`: delegate to a nested build driver.
//!
//! Both kinds share one shape: a single optional action running the driver
//! against a build file, whose outputs are the declared `outputs` or, when
//! none are declared, the module name.

use serde::Deserialize;

use super::{CompileContext, base_name, join_words, parent_dir};
use crate::ir::{ActionRule, BuildAction, Rule, rules};

/// Properties of a `make` module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MakeModule {
    /// Path of the makefile; its directory becomes the working directory.
    pub makefile: String,
    /// `NAME=value` environment assignments prefixed to the command.
    #[serde(default)]
    pub env: Vec<String>,
    /// Make targets; empty builds the makefile's default goal.
    #[serde(default)]
    pub targets: Vec<String>,
    /// Files produced by the invocation.
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Job count, filled from the configuration when not declared.
    #[serde(default)]
    pub jobs: Option<usize>,
}

/// Properties of a `ninja` module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NinjaModule {
    /// Path of the nested build file; its directory becomes the working
    /// directory.
    pub ninja_file: String,
    /// `NAME=value` environment assignments prefixed to the command.
    #[serde(default)]
    pub env: Vec<String>,
    /// Ninja targets; empty builds the nested file's defaults.
    #[serde(default)]
    pub targets: Vec<String>,
    /// Files produced by the invocation.
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Job count, filled from the configuration when not declared.
    #[serde(default)]
    pub jobs: Option<usize>,
}

struct Invocation<'m> {
    rule: &'static Rule,
    file_param: &'static str,
    dir_param: &'static str,
    file: &'m str,
    env: &'m [String],
    targets: &'m [String],
    outputs: &'m [String],
    jobs: Option<usize>,
}

impl Invocation<'_> {
    fn compile(&self, ctx: &CompileContext<'_>) -> Vec<BuildAction> {
        let outputs = if self.outputs.is_empty() {
            vec![ctx.name.to_owned()]
        } else {
            self.outputs.to_vec()
        };
        let implicits = ctx
            .dependency_targets
            .iter()
            .map(String::as_str)
            .chain([self.file]);

        let mut action = BuildAction::new(ActionRule::Command(self.rule), outputs)
            .implicits(implicits)
            .arg("envVars", join_words(self.env))
            .arg(self.file_param, base_name(self.file))
            .arg(self.dir_param, parent_dir(self.file));
        if !self.targets.is_empty() {
            action = action.arg("targets", join_words(self.targets));
        }
        if let Some(jobs) = self.jobs {
            action = action.arg("jobs", jobs.to_string());
        }
        vec![action.optional(true)]
    }
}

impl MakeModule {
    /// A single optional `make` action.
    #[must_use]
    pub fn compile(&self, ctx: &CompileContext<'_>) -> Vec<BuildAction> {
        Invocation {
            rule: &rules::MAKE,
            file_param: "makeFile",
            dir_param: "makeDir",
            file: &self.makefile,
            env: &self.env,
            targets: &self.targets,
            outputs: &self.outputs,
            jobs: self.jobs,
        }
        .compile(ctx)
    }
}

impl NinjaModule {
    /// A single optional `ninja` action.
    #[must_use]
    pub fn compile(&self, ctx: &CompileContext<'_>) -> Vec<BuildAction> {
        Invocation {
            rule: &rules::NINJA,
            file_param: "ninjaFile",
            dir_param: "ninjaDir",
            file: &self.ninja_file,
            env: &self.env,
            targets: &self.targets,
            outputs: &self.outputs,
            jobs: self.jobs,
        }
        .compile(ctx)
    }
}
