//! `gn`: generate a GN build directory.

use serde::Deserialize;

use super::{CompileContext, join_words};
use crate::config::BUILD_FILE_NAME;
use crate::ir::{ActionRule, BuildAction, rules};
use camino::Utf8Path;

/// Properties of a `gn` module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GnModule {
    /// Root of the GN source tree.
    pub src_dir: String,
    /// Build directory; it must already exist or be created by a dependency.
    pub build_dir: String,
    /// `NAME=value` environment assignments prefixed to the command.
    #[serde(default)]
    pub env: Vec<String>,
    /// Build arguments, space-joined into `--args`.
    #[serde(default)]
    pub args: Vec<String>,
}

impl GnModule {
    /// A single generator action producing `<build_dir>/build.ninja`.
    #[must_use]
    pub fn compile(&self, ctx: &CompileContext<'_>) -> Vec<BuildAction> {
        let ninja_file = Utf8Path::new(&self.build_dir).join(BUILD_FILE_NAME);
        vec![
            BuildAction::new(ActionRule::Command(&rules::GN), [ninja_file.into_string()])
                .implicits(ctx.dependency_targets.iter().cloned())
                .arg("envVars", join_words(&self.env))
                .arg("gnDir", self.src_dir.clone())
                .arg("gnArgs", join_words(&self.args))
                .arg("buildDir", self.build_dir.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn gn_generates_without_mkdir() {
        let module = GnModule {
            src_dir: "src".into(),
            build_dir: "out/gn".into(),
            env: Vec::new(),
            args: vec!["is_debug=false".into(), "target_cpu=\"x64\"".into()],
        };
        let actions = module.compile(&CompileContext {
            name: "chrome",
            dependency_targets: &[],
        });
        let [gn] = actions.as_slice() else {
            panic!("expected one action, got {actions:?}");
        };
        assert!(gn.rule.is_generator());
        assert_eq!(gn.outputs, ["out/gn/build.ninja"]);
        assert!(gn.order_only.is_empty());
        assert_eq!(
            gn.args.get("gnArgs").map(String::as_str),
            Some("is_debug=false target_cpu=\"x64\"")
        );
        assert_eq!(gn.args.get("envVars").map(String::as_str), Some(""));
    }
}
