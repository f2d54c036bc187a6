//! `alias`: a phony target grouping other targets under one name.

use serde::Deserialize;

use super::CompileContext;
use crate::ir::BuildAction;

/// Properties of an `alias` module; it has none beyond its dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasModule {}

impl AliasModule {
    /// One phony action named after the module whose inputs are the
    /// dependency targets.
    #[must_use]
    pub fn compile(&self, ctx: &CompileContext<'_>) -> Vec<BuildAction> {
        vec![BuildAction::phony(ctx.name).inputs(ctx.dependency_targets.iter().cloned())]
    }
}
