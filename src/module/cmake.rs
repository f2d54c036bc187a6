//! `cmake`: configure a CMake project into a Ninja build directory.

use serde::Deserialize;

use super::{CompileContext, directory_output, join_words, mkdir_action};
use crate::config::BUILD_FILE_NAME;
use crate::ir::{ActionRule, BuildAction, rules};
use camino::Utf8Path;

/// Properties of a `cmake` module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CMakeModule {
    /// Source directory holding `CMakeLists.txt`.
    pub src: String,
    /// Build directory the project is configured into.
    pub build_dir: String,
    /// `NAME=value` environment assignments prefixed to the command.
    #[serde(default)]
    pub env: Vec<String>,
    /// Cache entries, each passed as `-D<option>`.
    #[serde(default)]
    pub options: Vec<String>,
}

impl CMakeModule {
    /// An optional `mkdir` for the build directory followed by the generator
    /// action producing `<build_dir>/build.ninja`.
    #[must_use]
    pub fn compile(&self, ctx: &CompileContext<'_>) -> Vec<BuildAction> {
        let options = self
            .options
            .iter()
            .map(|option| format!("-D{option}"))
            .collect::<Vec<_>>();
        let ninja_file = Utf8Path::new(&self.build_dir).join(BUILD_FILE_NAME);

        let mut actions: Vec<BuildAction> = mkdir_action(&self.build_dir).into_iter().collect();
        actions.push(
            BuildAction::new(ActionRule::Command(&rules::CMAKE), [ninja_file.into_string()])
                .implicits(ctx.dependency_targets.iter().cloned())
                .order_only(directory_output(&self.build_dir))
                .arg("cmakeOptions", join_words(&options))
                .arg("cmakeDir", self.src.clone())
                .arg("envVars", join_words(&self.env))
                .arg("buildDir", self.build_dir.clone()),
        );
        actions
    }
}
