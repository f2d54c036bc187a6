//! Process-wide rule constants.
//!
//! Each rule is a `static` command template shared by every action that uses
//! it. Per-action values reach the command through the bindings listed in
//! [`Rule::params`]; tool names such as `$cmakeCmd` are top-level variables
//! written once at the head of the build file (see [`TOOL_VARIABLES`]).

use super::Rule;

/// Top-level variables naming the external tools invoked by the rules.
pub const TOOL_VARIABLES: [(&str, &str); 4] = [
    ("cmakeCmd", "cmake"),
    ("gnCmd", "gn"),
    ("makeCmd", "make"),
    ("ninjaCmd", "ninja"),
];

/// Configure a CMake project into a Ninja build directory.
pub static CMAKE: Rule = Rule {
    name: "cmake",
    command: "cd $buildDir && $envVars $cmakeCmd -GNinja $cmakeOptions $cmakeDir",
    description: "cmake $cmakeDir",
    params: &["envVars", "cmakeOptions", "cmakeDir", "buildDir"],
    generator: true,
    depfile: None,
};

/// Generate a GN build directory.
pub static GN: Rule = Rule {
    name: "gn",
    command: "$envVars $gnCmd gen $buildDir --root=$gnDir --script-executable=/usr/bin/env --args='$gnArgs'",
    description: "gn $gnDir",
    params: &["envVars", "gnDir", "gnArgs", "buildDir"],
    generator: true,
    depfile: None,
};

/// Run `make` against a makefile.
pub static MAKE: Rule = Rule {
    name: "make",
    command: "$envVars $makeCmd -j $jobs -C $makeDir -f $makeFile $targets",
    description: "make $makeDir",
    params: &["envVars", "targets", "makeFile", "makeDir", "jobs"],
    generator: false,
    depfile: None,
};

/// Run a nested `ninja` against a build file.
pub static NINJA: Rule = Rule {
    name: "ninja",
    command: "$envVars $ninjaCmd -j $jobs -C $ninjaDir -f $ninjaFile $targets",
    description: "ninja $ninjaDir",
    params: &["envVars", "targets", "ninjaFile", "ninjaDir", "jobs"],
    generator: false,
    depfile: None,
};

/// Run a script from a working directory.
///
/// Not a generator: scripts produce ordinary build outputs, so Ninja must
/// rebuild them when their inputs change.
pub static SCRIPT: Rule = Rule {
    name: "script",
    command: "cd $workingDir && $envVars $scriptCmd $scriptArgs",
    description: "sh $in",
    params: &["envVars", "scriptCmd", "scriptArgs", "workingDir"],
    generator: false,
    depfile: None,
};

/// Copy one file or directory tree.
pub static CP: Rule = Rule {
    name: "cp",
    command: "cp -vR $in $out",
    description: "cp $out",
    params: &[],
    generator: false,
    depfile: None,
};

/// Install every input into a destination directory.
pub static INSTALL: Rule = Rule {
    name: "install",
    command: "install -c $in $destDir",
    description: "install $out",
    params: &["destDir"],
    generator: false,
    depfile: None,
};

/// Create a directory and its parents.
pub static MKDIR: Rule = Rule {
    name: "mkdir",
    command: "mkdir -p $out",
    description: "mkdir $out",
    params: &[],
    generator: false,
    depfile: None,
};

/// Recursively remove files and directories.
pub static RM: Rule = Rule {
    name: "rm",
    command: "rm -rf $files",
    description: "rm $out",
    params: &["files"],
    generator: false,
    depfile: None,
};

/// Re-run this program to regenerate the build file.
pub static REGENERATE: Rule = Rule {
    name: "regenerate",
    command: "$executable $flags $rootFile",
    description: "Regenerating Ninja files",
    params: &["executable", "flags", "rootFile"],
    generator: true,
    depfile: Some("$out.d"),
};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&CMAKE)]
    #[case(&GN)]
    #[case(&MAKE)]
    #[case(&NINJA)]
    #[case(&SCRIPT)]
    #[case(&INSTALL)]
    #[case(&RM)]
    #[case(&REGENERATE)]
    fn every_param_appears_in_the_command(#[case] rule: &'static Rule) {
        for param in rule.params {
            assert!(
                rule.command.contains(&format!("${param}")),
                "{} does not use ${param}",
                rule.name
            );
        }
    }

    #[rstest]
    fn only_build_file_producers_are_generators() {
        let generators: Vec<_> = [&CMAKE, &GN, &MAKE, &NINJA, &SCRIPT, &CP, &INSTALL, &MKDIR, &RM, &REGENERATE]
            .into_iter()
            .filter(|rule| rule.generator)
            .map(|rule| rule.name)
            .collect();
        assert_eq!(generators, ["cmake", "gn", "regenerate"]);
    }
}
