//! Compile a resolved graph into a build plan.
//!
//! Modules compile in declaration order. Each sees only its own properties
//! and the target names of its direct dependencies, so the order never
//! affects the result. Output conflicts from every module are collected
//! before failing.

use tracing::debug;

use crate::error::{ErrorSet, ToyenError};
use crate::graph::DependencyGraph;
use crate::ir::BuildPlan;

/// Compile every module of `graph` into a single [`BuildPlan`].
///
/// `graph` is expected to have been resolved.
///
/// # Errors
///
/// Returns an [`ErrorSet`] holding every [`ToyenError::DuplicateOutput`] and
/// [`ToyenError::EmptyOutputs`] raised while planning.
pub fn compile(graph: &DependencyGraph) -> Result<BuildPlan, ErrorSet> {
    let mut plan = BuildPlan::default();
    let mut errors: Vec<ToyenError> = Vec::new();
    for module in graph.modules() {
        let deps = graph.direct_dependency_targets(module.name());
        let actions = module.compile(&deps);
        debug!(
            module = module.name(),
            kind = module.kind().kind_name(),
            actions = actions.len(),
            "compiled module"
        );
        for action in actions {
            if let Err(err) = plan.push(module.name(), action) {
                errors.push(err);
            }
        }
    }
    ErrorSet::check(errors, plan)
}
