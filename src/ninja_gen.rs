//! Ninja file generator.
//!
//! This module converts a [`BuildPlan`] into the textual representation
//! expected by the Ninja build system. Output depends only on the plan and the
//! configuration: rules are sorted by name and build statements follow plan
//! order, so identical inputs always produce identical bytes.

use crate::config::Config;
use crate::ir::{ActionRule, BuildAction, BuildPlan, Rule, rules};
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

/// Lowest Ninja version understood by the generated file.
pub const NINJA_REQUIRED_VERSION: &str = "1.7";

macro_rules! write_kv {
    ($f:expr, $key:expr, $val:expr) => {{
        let val: &str = $val;
        if val.is_empty() {
            writeln!($f, "  {} =", $key)?;
        } else {
            writeln!($f, "  {} = {}", $key, val)?;
        }
    }};
}

macro_rules! write_flag {
    ($f:expr, $key:expr, $cond:expr) => {
        if $cond {
            writeln!($f, "  {} = 1", $key)?;
        }
    };
}

/// Generate a Ninja build file as a string.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use toyen::config::{Config, Triple};
/// use toyen::ir::{BuildAction, BuildPlan};
/// use toyen::ninja_gen;
///
/// let config = Config::new(
///     Utf8PathBuf::from("/src"),
///     Utf8PathBuf::from("/out"),
///     Triple::parse("x86_64-linux"),
///     Triple::parse("x86_64-linux"),
///     1,
/// );
/// let mut plan = BuildPlan::default();
/// plan.push("all", BuildAction::phony("all")).expect("unique");
/// let ninja = ninja_gen::generate(&config, &plan);
/// assert!(ninja.contains("build all: phony\n"));
/// assert!(ninja.ends_with("default all\n"));
/// ```
#[must_use]
pub fn generate(config: &Config, plan: &BuildPlan) -> String {
    NinjaFile { config, plan }.to_string()
}

/// Escape a path for use in a `build` line.
///
/// Ninja treats `$`, spaces and `:` as syntax there; each is prefixed with `$`.
#[must_use]
pub fn escape_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for ch in path.chars() {
        if matches!(ch, '$' | ' ' | ':') {
            escaped.push('$');
        }
        escaped.push(ch);
    }
    escaped
}

/// Convert a slice of paths into a space-separated, escaped string.
fn join(paths: &[String]) -> String {
    paths.iter().map(|p| escape_path(p)).join(" ")
}

struct NinjaFile<'a> {
    config: &'a Config,
    plan: &'a BuildPlan,
}

impl Display for NinjaFile<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Generated by toyen. Do not edit.")?;
        writeln!(f)?;
        writeln!(f, "ninja_required_version = {NINJA_REQUIRED_VERSION}")?;
        writeln!(f)?;
        for (name, value) in self.config.variables() {
            writeln!(f, "{name} = {value}")?;
        }
        for (name, value) in rules::TOOL_VARIABLES {
            writeln!(f, "{name} = {value}")?;
        }
        writeln!(f)?;

        for rule in self.plan.rules() {
            write!(f, "{}", DisplayRule(rule))?;
        }
        for planned in self.plan.actions() {
            write!(f, "{}", DisplayAction(&planned.action))?;
        }

        let defaults = self.plan.default_targets();
        if !defaults.is_empty() {
            writeln!(f, "default {}", defaults.into_iter().map(escape_path).join(" "))?;
        }
        Ok(())
    }
}

/// Wrapper struct to display a rule declaration.
struct DisplayRule(&'static Rule);

impl Display for DisplayRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rule = self.0;
        writeln!(f, "rule {}", rule.name)?;
        write_kv!(f, "command", rule.command);
        write_kv!(f, "description", rule.description);
        if let Some(depfile) = rule.depfile {
            write_kv!(f, "depfile", depfile);
        }
        write_flag!(f, "generator", rule.generator);
        writeln!(f)
    }
}

/// Wrapper struct to display a build statement.
struct DisplayAction<'a>(&'a BuildAction);

impl Display for DisplayAction<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let action = self.0;
        write!(f, "build {}: {}", join(&action.outputs), action.rule.name())?;
        if !action.inputs.is_empty() {
            write!(f, " {}", join(&action.inputs))?;
        }
        if !action.implicits.is_empty() {
            write!(f, " | {}", join(&action.implicits))?;
        }
        if !action.order_only.is_empty() {
            write!(f, " || {}", join(&action.order_only))?;
        }
        writeln!(f)?;
        if let ActionRule::Command(_) = action.rule {
            for (name, value) in &action.args {
                write_kv!(f, name, value);
            }
        }
        writeln!(f)
    }
}
