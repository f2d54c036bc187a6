//! Ordered collection of compiled actions with output ownership tracking.

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::debug;

use super::{BuildAction, Rule};
use crate::error::ToyenError;

/// A [`BuildAction`] together with the module that compiled it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    /// Name of the compiling module, or of the bootstrap step.
    pub owner: String,
    /// The compiled action.
    pub action: BuildAction,
}

/// Every action of one compilation pass, in the order it was planned.
///
/// Each output is claimed by exactly one action. Re-planning an action that is
/// identical to the one already owning its outputs (two modules creating the
/// same directory, for instance) is accepted and the repeat is dropped.
#[derive(Debug, Default, Clone)]
pub struct BuildPlan {
    actions: Vec<PlannedAction>,
    producers: IndexMap<String, usize>,
}

impl BuildPlan {
    /// Append `action` compiled by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`ToyenError::EmptyOutputs`] when the action has no outputs and
    /// [`ToyenError::DuplicateOutput`] when the action lists an output twice
    /// or a different action already produces one of its outputs.
    pub fn push(&mut self, owner: &str, action: BuildAction) -> Result<(), ToyenError> {
        if action.outputs.is_empty() {
            return Err(ToyenError::EmptyOutputs {
                module: owner.to_owned(),
            });
        }
        if let Some(repeated) = action.outputs.iter().duplicates().next() {
            return Err(ToyenError::DuplicateOutput {
                output: repeated.clone(),
                first: owner.to_owned(),
                second: owner.to_owned(),
            });
        }
        for output in &action.outputs {
            let Some(&index) = self.producers.get(output) else {
                continue;
            };
            let existing = self.actions.get(index);
            if existing.is_some_and(|planned| planned.action == action) {
                debug!(output = %output, owner, "dropping repeated identical action");
                return Ok(());
            }
            return Err(ToyenError::DuplicateOutput {
                output: output.clone(),
                first: existing.map(|planned| planned.owner.clone()).unwrap_or_default(),
                second: owner.to_owned(),
            });
        }
        let index = self.actions.len();
        for output in &action.outputs {
            self.producers.insert(output.clone(), index);
        }
        self.actions.push(PlannedAction {
            owner: owner.to_owned(),
            action,
        });
        Ok(())
    }

    /// Planned actions in insertion order.
    #[must_use]
    pub fn actions(&self) -> &[PlannedAction] {
        &self.actions
    }

    /// Number of planned actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether nothing has been planned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Name of the module producing `output`, if any.
    #[must_use]
    pub fn producer_of(&self, output: &str) -> Option<&str> {
        self.producers
            .get(output)
            .and_then(|&index| self.actions.get(index))
            .map(|planned| planned.owner.as_str())
    }

    /// Distinct command rules referenced by the plan, sorted by name.
    #[must_use]
    pub fn rules(&self) -> Vec<&'static Rule> {
        let mut rules: IndexMap<&'static str, &'static Rule> = IndexMap::new();
        for planned in &self.actions {
            if let super::ActionRule::Command(rule) = planned.action.rule {
                rules.entry(rule.name).or_insert(rule);
            }
        }
        rules.sort_keys();
        rules.into_values().collect()
    }

    /// Outputs of every non-optional action, in plan order.
    #[must_use]
    pub fn default_targets(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter(|planned| !planned.action.optional)
            .flat_map(|planned| planned.action.outputs.iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ActionRule, rules};
    use rstest::rstest;

    fn mkdir(dir: &str) -> BuildAction {
        BuildAction::new(ActionRule::Command(&rules::MKDIR), [dir]).optional(true)
    }

    #[rstest]
    fn identical_actions_are_planned_once() {
        let mut plan = BuildPlan::default();
        plan.push("a", mkdir("out")).expect("first");
        plan.push("b", mkdir("out")).expect("identical repeat");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.producer_of("out"), Some("a"));
    }

    #[rstest]
    fn conflicting_producers_are_rejected() {
        let mut plan = BuildPlan::default();
        plan.push("a", BuildAction::phony("x")).expect("first");
        let err = plan
            .push("b", BuildAction::phony("x").inputs(["y"]))
            .expect_err("conflict");
        match err {
            ToyenError::DuplicateOutput {
                output,
                first,
                second,
            } => {
                assert_eq!((output.as_str(), first.as_str(), second.as_str()), ("x", "a", "b"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    fn outputs_repeated_within_one_action_are_rejected() {
        let mut plan = BuildPlan::default();
        let batched = BuildAction::new(
            ActionRule::Command(&rules::INSTALL),
            ["lib/libz.a", "lib/libz.a"],
        )
        .inputs(["a/libz.a", "b/libz.a"]);
        let err = plan.push("libs", batched).expect_err("repeated output");
        match err {
            ToyenError::DuplicateOutput {
                output,
                first,
                second,
            } => {
                assert_eq!(
                    (output.as_str(), first.as_str(), second.as_str()),
                    ("lib/libz.a", "libs", "libs")
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(plan.is_empty());
    }

    #[rstest]
    fn actions_without_outputs_are_rejected() {
        let mut plan = BuildPlan::default();
        let empty = BuildAction::new(ActionRule::Phony, Vec::<String>::new());
        assert!(matches!(
            plan.push("a", empty),
            Err(ToyenError::EmptyOutputs { .. })
        ));
    }

    #[rstest]
    fn rules_are_distinct_and_sorted() {
        let mut plan = BuildPlan::default();
        plan.push("a", mkdir("one")).expect("mkdir");
        plan.push("a", mkdir("two")).expect("mkdir");
        plan.push(
            "a",
            BuildAction::new(ActionRule::Command(&rules::CP), ["two/f"]).inputs(["f"]),
        )
        .expect("cp");
        plan.push("a", BuildAction::phony("a")).expect("phony");
        let names: Vec<_> = plan.rules().iter().map(|rule| rule.name).collect();
        assert_eq!(names, ["cp", "mkdir"]);
        assert_eq!(plan.default_targets(), ["two/f", "a"]);
    }
}
