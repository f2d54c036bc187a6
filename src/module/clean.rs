//! `clean`: remove directories, or aggregate other clean targets.

use serde::Deserialize;

use super::{CompileContext, join_words};
use crate::ir::{ActionRule, BuildAction, rules};

/// Properties of a `clean` module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CleanModule {
    /// Directories removed recursively, space-joined verbatim.
    #[serde(default)]
    pub dirs: Vec<String>,
}

impl CleanModule {
    /// An `rm` action over [`Self::dirs`], or a phony action when there is
    /// nothing to delete. Either way the dependency targets are implicit, so
    /// cleaning composes through dependencies.
    #[must_use]
    pub fn compile(&self, ctx: &CompileContext<'_>) -> Vec<BuildAction> {
        let action = if self.dirs.is_empty() {
            BuildAction::phony(ctx.name)
        } else {
            BuildAction::new(ActionRule::Command(&rules::RM), [ctx.name])
                .arg("files", join_words(&self.dirs))
        };
        vec![action.implicits(ctx.dependency_targets.iter().cloned())]
    }
}
