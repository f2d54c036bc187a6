//! Intermediate Representation of compiled build actions.
//!
//! Module compilers produce [`BuildAction`] values bound to process-wide
//! [`Rule`] constants. The actions are collected into a [`BuildPlan`], which
//! enforces that every output has exactly one producer, and the plan is then
//! handed to [`crate::ninja_gen`] for serialisation. Nothing here knows about
//! Ninja syntax.
//!
//! # Examples
//!
//! ```
//! use toyen::ir::{ActionRule, BuildAction, BuildPlan, rules};
//!
//! let mkdir = BuildAction::new(ActionRule::Command(&rules::MKDIR), ["out/include"])
//!     .optional(true);
//! let mut plan = BuildPlan::default();
//! plan.push("headers", mkdir).expect("unique output");
//! assert_eq!(plan.len(), 1);
//! ```

use indexmap::IndexMap;

mod plan;
pub mod rules;

pub use plan::{BuildPlan, PlannedAction};

/// An immutable, reusable command template.
#[derive(Debug, PartialEq, Eq)]
pub struct Rule {
    /// Name the rule is declared under in the build file.
    pub name: &'static str,
    /// Shell command with `$var` placeholders.
    pub command: &'static str,
    /// Human-readable progress line template.
    pub description: &'static str,
    /// Names of the per-action bindings the command consumes.
    pub params: &'static [&'static str],
    /// Whether the output is a generated build description that the executor
    /// must not treat as stale merely because the command line changed.
    pub generator: bool,
    /// Template of the dependency file written alongside the output.
    pub depfile: Option<&'static str>,
}

impl Rule {
    /// Whether `name` is one of this rule's parameters.
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        self.params.contains(&name)
    }
}

/// Rule a [`BuildAction`] is executed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRule {
    /// The executor's built-in aggregation rule; no command.
    Phony,
    /// One of the process-wide command rules.
    Command(&'static Rule),
}

impl ActionRule {
    /// Name used to reference the rule from a build statement.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Phony => "phony",
            Self::Command(rule) => rule.name,
        }
    }

    /// Whether the action regenerates a build description.
    #[must_use]
    pub const fn is_generator(self) -> bool {
        match self {
            Self::Phony => false,
            Self::Command(rule) => rule.generator,
        }
    }
}

/// A compiled unit of work: one rule invocation with explicit outputs,
/// inputs, and ordering constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildAction {
    /// Rule executed to produce the outputs.
    pub rule: ActionRule,
    /// Files or phony names produced; never empty once planned.
    pub outputs: Vec<String>,
    /// Inputs passed to the command as `$in`.
    pub inputs: Vec<String>,
    /// Dependencies that trigger re-execution but are not passed as `$in`.
    pub implicits: Vec<String>,
    /// Preconditions that must exist before the action runs.
    pub order_only: Vec<String>,
    /// Named bindings consumed by the rule's command template.
    pub args: IndexMap<&'static str, String>,
    /// Whether the action is left out of the default build set.
    pub optional: bool,
}

impl BuildAction {
    /// Create an action producing `outputs` with `rule`.
    pub fn new<I, S>(rule: ActionRule, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rule,
            outputs: outputs.into_iter().map(Into::into).collect(),
            inputs: Vec::new(),
            implicits: Vec::new(),
            order_only: Vec::new(),
            args: IndexMap::new(),
            optional: false,
        }
    }

    /// Create a phony action named `name`.
    #[must_use]
    pub fn phony(name: &str) -> Self {
        Self::new(ActionRule::Phony, [name])
    }

    /// Set the explicit inputs.
    #[must_use]
    pub fn inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the implicit dependencies.
    #[must_use]
    pub fn implicits<I, S>(mut self, implicits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implicits = implicits.into_iter().map(Into::into).collect();
        self
    }

    /// Set the order-only dependencies.
    #[must_use]
    pub fn order_only<I, S>(mut self, order_only: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_only = order_only.into_iter().map(Into::into).collect();
        self
    }

    /// Bind `value` to the rule parameter `name`.
    #[must_use]
    pub fn arg(mut self, name: &'static str, value: impl Into<String>) -> Self {
        debug_assert!(
            matches!(self.rule, ActionRule::Command(rule) if rule.accepts(name)),
            "rule {} does not accept parameter {name}",
            self.rule.name(),
        );
        self.args.insert(name, value.into());
        self
    }

    /// Mark the action as excluded from the default build set.
    #[must_use]
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }
}
