//! `script`: run a script, optionally producing declared files.

use serde::Deserialize;

use super::{CompileContext, directory_output, join_words, mkdir_action};
use crate::ir::{ActionRule, BuildAction, rules};

/// Properties of a `script` module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptModule {
    /// Script path; both the command and its primary input.
    pub script: String,
    /// Files the script produces.
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Files the script reads besides itself.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Arguments appended to the command, space-joined.
    #[serde(default)]
    pub args: Vec<String>,
    /// Directory the script runs from.
    #[serde(default)]
    pub working_dir: Option<String>,
    /// `NAME=value` environment assignments prefixed to the command.
    #[serde(default)]
    pub env: Vec<String>,
    /// Further generated files, treated like `outputs`.
    #[serde(default)]
    pub gen_files: Vec<String>,
}

impl ScriptModule {
    fn working_dir(&self) -> &str {
        self.working_dir.as_deref().unwrap_or(".")
    }

    /// Compile into a working-directory `mkdir` plus either a script action
    /// producing the declared files and a phony named after the module, or a
    /// single script action producing the module name.
    #[must_use]
    pub fn compile(&self, ctx: &CompileContext<'_>) -> Vec<BuildAction> {
        let working_dir = self.working_dir();
        let outputs = self
            .outputs
            .iter()
            .chain(&self.gen_files)
            .cloned()
            .collect::<Vec<_>>();
        let implicits = self
            .inputs
            .iter()
            .chain(ctx.dependency_targets)
            .chain([&self.script])
            .cloned()
            .collect::<Vec<_>>();
        let run = |outputs: Vec<String>| {
            BuildAction::new(ActionRule::Command(&rules::SCRIPT), outputs)
                .inputs([self.script.as_str()])
                .implicits(implicits.iter().cloned())
                .order_only(directory_output(working_dir))
                .arg("envVars", join_words(&self.env))
                .arg("scriptCmd", self.script.clone())
                .arg("scriptArgs", join_words(&self.args))
                .arg("workingDir", working_dir)
        };

        let mut actions: Vec<BuildAction> = mkdir_action(working_dir).into_iter().collect();
        if outputs.is_empty() {
            actions.push(run(vec![ctx.name.to_owned()]));
        } else {
            actions.push(run(outputs.clone()).optional(true));
            actions.push(BuildAction::phony(ctx.name).inputs(outputs));
        }
        actions
    }
}
