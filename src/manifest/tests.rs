//! Tests for declaration file loading.

use super::*;
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn workspace() -> TempDir {
    TempDir::new().expect("temp dir")
}

fn write(dir: &TempDir, rel: &str, contents: &str) -> Utf8PathBuf {
    let root = Utf8Path::from_path(dir.path()).expect("utf8 temp dir");
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(&path, contents).expect("write declarations");
    path
}

#[rstest]
fn from_str_collects_unknown_keys_as_properties() {
    let yaml = concat!(
        "toyen_version: \"1.0.0\"\n",
        "modules:\n",
        "  - kind: copy\n",
        "    name: headers\n",
        "    deps: [gen]\n",
        "    sources: [a.h]\n",
        "    destination: out/a.h\n",
    );
    let file = from_str(yaml, &ManifestName::new("Blueprints")).expect("parse");
    let module = file.modules.first().expect("one module");
    assert_eq!(module.kind, "copy");
    assert_eq!(module.deps, vec!["gen".to_owned()]);
    assert!(module.properties.contains_key("sources"));
    assert!(module.properties.contains_key("destination"));
    assert!(!module.properties.contains_key("name"));
}

#[rstest]
fn from_str_rejects_unknown_top_level_keys() {
    let yaml = "toyen_version: \"1.0.0\"\ntargets: []\n";
    let err = from_str(yaml, &ManifestName::new("Blueprints")).expect_err("structure error");
    assert!(matches!(err, ManifestError::Structure { .. }));
    assert!(err.to_string().contains("Blueprints"), "{err}");
}

#[rstest]
fn from_str_reports_yaml_syntax_errors() {
    let yaml = "toyen_version: \"1.0.0\"\nmodules: [\n";
    let err = from_str(yaml, &ManifestName::new("Blueprints")).expect_err("parse error");
    assert!(matches!(err, ManifestError::Parse { .. }));
}

#[rstest]
fn from_path_follows_subdirs_and_records_files(workspace: TempDir) {
    let root = write(
        &workspace,
        "Blueprints",
        "toyen_version: \"1.0.0\"\nsubdirs: [lib]\nmodules:\n  - kind: alias\n    name: all\n    deps: [libfoo]\n",
    );
    let lib = write(
        &workspace,
        "lib/Blueprints",
        "toyen_version: \"1.0.0\"\nmodules:\n  - kind: alias\n    name: libfoo\n",
    );

    let loaded = from_path(&root).expect("load");
    assert_eq!(loaded.files, vec![root.clone(), lib.clone()]);
    let names: Vec<_> = loaded
        .modules
        .iter()
        .map(|m| m.declaration.name.as_str())
        .collect();
    assert_eq!(names, ["all", "libfoo"]);
    assert_eq!(loaded.modules.last().map(|m| &m.file), Some(&lib));
}

#[rstest]
fn from_path_reads_repeated_subdir_once(workspace: TempDir) {
    let root = write(
        &workspace,
        "Blueprints",
        "toyen_version: \"1.0.0\"\nsubdirs: [lib, lib]\n",
    );
    write(&workspace, "lib/Blueprints", "toyen_version: \"1.0.0\"\n");
    let loaded = from_path(&root).expect("load");
    assert_eq!(loaded.files.len(), 2);
}

#[rstest]
fn from_path_collects_errors_from_every_file(workspace: TempDir) {
    let root = write(
        &workspace,
        "Blueprints",
        "toyen_version: \"1.0.0\"\nsubdirs: [missing, bad, future]\n",
    );
    write(&workspace, "bad/Blueprints", "toyen_version: \"1.0.0\"\nbogus: 1\n");
    write(&workspace, "future/Blueprints", "toyen_version: \"2.0.0\"\n");

    let errors = from_path(&root).expect_err("errors").into_errors();
    assert_eq!(errors.len(), 3, "{errors:?}");
    assert!(matches!(
        errors.first(),
        Some(ToyenError::Manifest(ManifestError::Read { .. }))
    ));
    assert!(matches!(
        errors.get(1),
        Some(ToyenError::Manifest(ManifestError::Structure { .. }))
    ));
    assert!(matches!(
        errors.get(2),
        Some(ToyenError::Manifest(ManifestError::UnsupportedVersion { .. }))
    ));
}
