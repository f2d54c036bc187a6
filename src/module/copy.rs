//! `copy`: copy files into place, one action per source.

use serde::Deserialize;

use super::{CompileContext, destination_in, directory_output, invalid, mkdir_action, parent_dir};
use crate::ir::{ActionRule, BuildAction, rules};

/// Properties of a `copy` module.
///
/// With a single source, `destination` names the copied file. With several,
/// it names the directory receiving them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyModule {
    /// Files or directory trees to copy; never empty.
    pub sources: Vec<String>,
    /// Destination file or directory.
    pub destination: String,
}

impl CopyModule {
    /// Reject property values that decode but cannot be compiled.
    pub(crate) fn validate(&self) -> Result<(), serde_json::Error> {
        if self.sources.is_empty() {
            return Err(invalid("`sources` must list at least one path"));
        }
        Ok(())
    }

    /// An optional `mkdir`, one optional `cp` per source and a phony
    /// named after the module over every copied file.
    #[must_use]
    pub fn compile(&self, ctx: &CompileContext<'_>) -> Vec<BuildAction> {
        let (dir, files) = match self.sources.as_slice() {
            [_] => (parent_dir(&self.destination), vec![self.destination.clone()]),
            sources => (
                self.destination.clone(),
                sources
                    .iter()
                    .map(|src| destination_in(&self.destination, src))
                    .collect(),
            ),
        };
        let order_only = directory_output(&dir);

        let mut actions: Vec<BuildAction> = mkdir_action(&dir).into_iter().collect();
        for (src, file) in self.sources.iter().zip(&files) {
            actions.push(
                BuildAction::new(ActionRule::Command(&rules::CP), [file.as_str()])
                    .inputs([src.as_str()])
                    .implicits(ctx.dependency_targets.iter().cloned())
                    .order_only(order_only.clone())
                    .optional(true),
            );
        }
        actions.push(BuildAction::phony(ctx.name).inputs(files));
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn copy(sources: &[&str], destination: &str) -> CopyModule {
        CopyModule {
            sources: sources.iter().map(ToString::to_string).collect(),
            destination: destination.to_owned(),
        }
    }

    #[rstest]
    fn single_source_copies_to_the_destination_file() {
        let deps = vec!["gen".to_owned()];
        let actions = copy(&["src/a.h"], "out/inc/a.h").compile(&CompileContext {
            name: "hdr",
            dependency_targets: &deps,
        });
        let [mkdir, cp, phony] = actions.as_slice() else {
            panic!("expected three actions, got {actions:?}");
        };
        assert_eq!(mkdir.outputs, ["out/inc"]);
        assert_eq!(cp.outputs, ["out/inc/a.h"]);
        assert_eq!(cp.inputs, ["src/a.h"]);
        assert_eq!(cp.implicits, ["gen"]);
        assert_eq!(cp.order_only, ["out/inc"]);
        assert!(cp.optional);
        assert_eq!(phony.rule, ActionRule::Phony);
        assert_eq!(phony.outputs, ["hdr"]);
        assert_eq!(phony.inputs, ["out/inc/a.h"]);
        assert!(!phony.optional);
    }

    #[rstest]
    fn many_sources_copy_into_the_destination_directory() {
        let actions = copy(&["a.h", "sub/b.h"], "dst/").compile(&CompileContext {
            name: "hdrs",
            dependency_targets: &[],
        });
        let outputs: Vec<_> = actions.iter().map(|a| a.outputs.join(" ")).collect();
        assert_eq!(outputs, ["dst", "dst/a.h", "dst/b.h", "hdrs"]);
        assert_eq!(actions.last().map(|a| a.inputs.clone()), Some(vec![
            "dst/a.h".to_owned(),
            "dst/b.h".to_owned()
        ]));
    }

    #[rstest]
    fn copy_into_current_directory_skips_mkdir() {
        let actions = copy(&["a"], "b").compile(&CompileContext {
            name: "c",
            dependency_targets: &[],
        });
        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|a| a.rule != ActionRule::Command(&rules::MKDIR)));
        assert!(actions.first().is_some_and(|cp| cp.order_only.is_empty()));
    }

    #[rstest]
    fn empty_sources_are_invalid() {
        assert!(copy(&[], "dst").validate().is_err());
        assert!(copy(&["a"], "dst").validate().is_ok());
    }
}
