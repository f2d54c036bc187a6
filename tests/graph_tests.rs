//! Dependency graph resolution and traversal.

use rstest::{fixture, rstest};
use toyen::ToyenError;
use toyen::graph::DependencyGraph;
use toyen::module::{AliasModule, Module, ModuleKind};

fn alias(name: &str, deps: &[&str]) -> Module {
    Module::new(
        name,
        deps.iter().map(ToString::to_string).collect(),
        ModuleKind::Alias(AliasModule::default()),
    )
    .declared_in_file(format!("/src/{name}/Blueprints"))
}

fn graph(modules: Vec<Module>) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for module in modules {
        graph.add_module(module).expect("unique names");
    }
    graph
}

/// `a -> b, c`; `b -> d`; `c -> d, e`; `e -> b`.
#[fixture]
fn diamond() -> DependencyGraph {
    graph(vec![
        alias("a", &["b", "c"]),
        alias("b", &["d"]),
        alias("c", &["d", "e"]),
        alias("d", &[]),
        alias("e", &["b"]),
    ])
}

#[rstest]
fn direct_targets_follow_declaration_order(diamond: DependencyGraph) {
    diamond.resolve().expect("acyclic");
    assert_eq!(diamond.direct_dependency_targets("a"), ["b", "c"]);
    assert_eq!(diamond.direct_dependency_targets("c"), ["d", "e"]);
    assert!(diamond.direct_dependency_targets("d").is_empty());
    assert!(diamond.direct_dependency_targets("nope").is_empty());
}

#[rstest]
fn transitive_targets_are_depth_first_pre_order(diamond: DependencyGraph) {
    assert_eq!(diamond.transitive_dependency_targets("a"), ["b", "d", "c", "e"]);
    assert_eq!(diamond.transitive_dependency_targets("e"), ["b", "d"]);
    assert!(diamond.transitive_dependency_targets("d").is_empty());
}

#[rstest]
fn repeated_dependencies_collapse_to_first_occurrence() {
    let graph = graph(vec![alias("a", &["b", "c", "b"]), alias("b", &[]), alias("c", &[])]);
    assert_eq!(graph.direct_dependency_targets("a"), ["b", "c"]);
}

#[rstest]
fn duplicate_names_report_both_files() {
    let mut graph = DependencyGraph::new();
    graph.add_module(alias("a", &[])).expect("first");
    let err = graph
        .add_module(alias("a", &[]).declared_in_file("/src/other/Blueprints"))
        .expect_err("duplicate");
    let ToyenError::DuplicateName { name, first, second } = err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(name, "a");
    assert_eq!(first.as_str(), "/src/a/Blueprints");
    assert_eq!(second.as_str(), "/src/other/Blueprints");
}

#[rstest]
fn resolution_collects_every_missing_dependency_and_the_cycle() {
    let graph = graph(vec![
        alias("x", &["ghost", "y"]),
        alias("y", &["z"]),
        alias("z", &["y", "phantom"]),
    ]);
    let errors = graph.resolve().expect_err("errors").into_errors();
    let rendered: Vec<_> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        [
            "module 'x' depends on undefined module 'ghost'",
            "module 'z' depends on undefined module 'phantom'",
            "dependency cycle detected: y -> z -> y",
        ]
    );
}

#[rstest]
fn self_dependency_is_a_cycle() {
    let graph = graph(vec![alias("loop", &["loop"])]);
    let errors = graph.resolve().expect_err("cycle").into_errors();
    assert!(matches!(
        errors.as_slice(),
        [ToyenError::Cycle { cycle }] if cycle == &["loop", "loop"]
    ));
}

#[rstest]
fn forward_references_resolve() {
    let graph = graph(vec![alias("late", &["early"]), alias("early", &[])]);
    graph.resolve().expect("forward reference");
}
