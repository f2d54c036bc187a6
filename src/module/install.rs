//! `install`: install files into a directory with one batched action.

use serde::Deserialize;

use super::{CompileContext, destination_in, directory_output, invalid, mkdir_action};
use crate::ir::{ActionRule, BuildAction, rules};

/// Properties of an `install` module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallModule {
    /// Files to install; never empty.
    pub sources: Vec<String>,
    /// Directory receiving the files.
    pub destination: String,
}

impl InstallModule {
    /// Reject property values that decode but cannot be compiled.
    pub(crate) fn validate(&self) -> Result<(), serde_json::Error> {
        if self.sources.is_empty() {
            return Err(invalid("`sources` must list at least one path"));
        }
        Ok(())
    }

    /// An optional `mkdir` of the destination and a single `install` action
    /// whose outputs are every installed file.
    #[must_use]
    pub fn compile(&self, ctx: &CompileContext<'_>) -> Vec<BuildAction> {
        let outputs = self
            .sources
            .iter()
            .map(|src| destination_in(&self.destination, src))
            .collect::<Vec<_>>();

        let mut actions: Vec<BuildAction> = mkdir_action(&self.destination).into_iter().collect();
        actions.push(
            BuildAction::new(ActionRule::Command(&rules::INSTALL), outputs)
                .inputs(self.sources.iter().cloned())
                .implicits(ctx.dependency_targets.iter().cloned())
                .order_only(directory_output(&self.destination))
                .arg("destDir", self.destination.clone()),
        );
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn install_batches_every_source() {
        let module = InstallModule {
            sources: vec!["build/libz.a".into(), "build/libpng.a".into()],
            destination: "sysroot/lib".into(),
        };
        let deps = vec!["zlib".to_owned(), "png".to_owned()];
        let actions = module.compile(&CompileContext {
            name: "libs",
            dependency_targets: &deps,
        });
        let [mkdir, install] = actions.as_slice() else {
            panic!("expected two actions, got {actions:?}");
        };
        assert_eq!(mkdir.outputs, ["sysroot/lib"]);
        assert_eq!(install.outputs, ["sysroot/lib/libz.a", "sysroot/lib/libpng.a"]);
        assert_eq!(install.inputs, module.sources);
        assert_eq!(install.implicits, deps);
        assert_eq!(install.order_only, ["sysroot/lib"]);
        assert_eq!(install.args.get("destDir").map(String::as_str), Some("sysroot/lib"));
        assert!(!install.optional);
    }

    #[rstest]
    fn install_requires_sources() {
        let module = InstallModule {
            sources: Vec::new(),
            destination: "lib".into(),
        };
        assert!(module.validate().is_err());
    }
}
