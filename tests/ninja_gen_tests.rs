//! Snapshot of a complete generated Ninja file.

use camino::Utf8PathBuf;
use insta::assert_snapshot;
use rstest::rstest;
use toyen::bootstrap::{BOOTSTRAP_OWNER, Bootstrap};
use toyen::config::{Config, Triple};
use toyen::graph::DependencyGraph;
use toyen::module::{AliasModule, CopyModule, Module, ModuleKind, ScriptModule};
use toyen::{compiler, ninja_gen};

fn modules() -> Vec<Module> {
    vec![
        Module::new(
            "headers",
            Vec::new(),
            ModuleKind::Copy(CopyModule {
                sources: vec!["include/a.h".into(), "include/b.h".into()],
                destination: "out/include".into(),
            }),
        ),
        Module::new(
            "gen",
            vec!["headers".into()],
            ModuleKind::Script(ScriptModule {
                script: "tools/gen.sh".into(),
                outputs: vec!["gen/table.c".into()],
                inputs: Vec::new(),
                args: Vec::new(),
                working_dir: None,
                env: Vec::new(),
                gen_files: Vec::new(),
            }),
        ),
        Module::new(
            "all",
            vec!["gen".into(), "headers".into()],
            ModuleKind::Alias(AliasModule::default()),
        ),
    ]
}

#[rstest]
fn generated_file_layout() {
    let config = Config::new(
        Utf8PathBuf::from("/src"),
        Utf8PathBuf::from("/out"),
        Triple::parse("x86_64-linux"),
        Triple::parse("aarch64-fuchsia"),
        4,
    );
    let mut graph = DependencyGraph::new();
    for module in modules() {
        graph.add_module(module).expect("unique");
    }
    graph.resolve().expect("resolve");
    let mut plan = compiler::compile(&graph).expect("compile");
    let bootstrap = Bootstrap::new(
        Utf8PathBuf::from("/usr/bin/toyen"),
        vec!["--out".into(), "/out".into()],
        Utf8PathBuf::from("/src/Blueprints"),
        config.build_file(),
    );
    plan.push(BOOTSTRAP_OWNER, bootstrap.action()).expect("bootstrap");

    let ninja = ninja_gen::generate(&config, &plan);
    assert_snapshot!(ninja, @r"
# Generated by toyen. Do not edit.

ninja_required_version = 1.7

SrcDir = /src
OutDir = /out
HostTriple = x86_64-linux
TargetTriple = aarch64-fuchsia
HostArch = x86_64
HostOS = Linux
TargetArch = aarch64
TargetOS = Fuchsia
Jobs = 4
cmakeCmd = cmake
gnCmd = gn
makeCmd = make
ninjaCmd = ninja

rule cp
  command = cp -vR $in $out
  description = cp $out

rule mkdir
  command = mkdir -p $out
  description = mkdir $out

rule regenerate
  command = $executable $flags $rootFile
  description = Regenerating Ninja files
  depfile = $out.d
  generator = 1

rule script
  command = cd $workingDir && $envVars $scriptCmd $scriptArgs
  description = sh $in

build out/include: mkdir

build out/include/a.h: cp include/a.h || out/include

build out/include/b.h: cp include/b.h || out/include

build headers: phony out/include/a.h out/include/b.h

build gen/table.c: script tools/gen.sh | headers tools/gen.sh
  envVars =
  scriptCmd = tools/gen.sh
  scriptArgs =
  workingDir = .

build gen: phony gen/table.c

build all: phony gen headers

build /out/build.ninja: regenerate
  executable = /usr/bin/toyen
  flags = --out /out
  rootFile = /src/Blueprints

default headers gen all /out/build.ninja
");
}

#[rstest]
fn generation_is_deterministic() {
    let config = Config::new(
        Utf8PathBuf::from("/src"),
        Utf8PathBuf::from("/out"),
        Triple::parse("x86_64-linux"),
        Triple::parse("x86_64-linux"),
        1,
    );
    let render = || {
        let mut graph = DependencyGraph::new();
        for module in modules() {
            graph.add_module(module).expect("unique");
        }
        let plan = compiler::compile(&graph).expect("compile");
        ninja_gen::generate(&config, &plan)
    };
    assert_eq!(render(), render());
}
