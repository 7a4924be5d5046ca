#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn write(dir: &Path, rel: &str, text: &str) {
    let path = dir.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

fn modules(compilation: &Compilation) -> Vec<String> {
    compilation
        .files()
        .iter()
        .map(|f| f.module.to_string())
        .collect()
}

#[test]
fn module_path_display_and_parent() {
    let path = ModulePath::root().child("a").child("r#type");
    assert_eq!(path.to_string(), "crate::a::r#type");
    assert_eq!(path.parent().unwrap().to_string(), "crate::a");
    assert_eq!(ModulePath::root().parent(), None);
}

#[test]
fn module_path_parse_strips_crate_anchor() {
    assert_eq!(ModulePath::parse("crate::a::b"), ModulePath::root().child("a").child("b"));
    assert_eq!(ModulePath::parse("a::b"), ModulePath::root().child("a").child("b"));
    assert!(ModulePath::parse("crate").is_root());
}

#[test]
fn add_source_reports_parse_location() {
    let mut compilation = Compilation::new("demo");
    let err = compilation
        .add_source(ModulePath::root(), "src/lib.rs", "pub enum {")
        .unwrap_err();
    match err {
        GenerateError::Parse { path, line, .. } => {
            assert_eq!(path, PathBuf::from("src/lib.rs"));
            assert_eq!(line, 1);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn crate_name_is_normalised() {
    let compilation = Compilation::new("my-crate").with_extern("enum-describe-macros");
    assert_eq!(compilation.crate_name(), "my_crate");
    assert_eq!(
        compilation.extern_crate("enum_describe_macros"),
        Some("enum_describe_macros")
    );
}

#[test]
fn load_follows_module_declarations() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    write(
        &src,
        "lib.rs",
        "mod a;\nmod b { pub mod c; }\n#[path = \"custom_file.rs\"]\nmod custom;\n",
    );
    write(&src, "a.rs", "pub mod deep;\n");
    write(&src, "a/deep.rs", "pub enum Deep { One }\n");
    write(&src, "b/c/mod.rs", "pub enum C { One }\n");
    write(&src, "custom_file.rs", "pub enum Custom { One }\n");

    let compilation = Compilation::load("demo", src.join("lib.rs")).unwrap();
    assert_eq!(
        modules(&compilation),
        vec![
            "crate",
            "crate::a",
            "crate::a::deep",
            "crate::b::c",
            "crate::custom"
        ]
    );
}

#[test]
fn load_skips_test_modules_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    write(
        &src,
        "lib.rs",
        "mod present;\nmod absent;\n#[cfg(test)]\nmod tests;\n",
    );
    write(&src, "present.rs", "");
    write(&src, "tests.rs", "this is not rust");

    let compilation = Compilation::load("demo", src.join("lib.rs")).unwrap();
    assert_eq!(modules(&compilation), vec!["crate", "crate::present"]);
}

#[test]
fn load_aborts_on_unparseable_module() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    write(&src, "lib.rs", "mod broken;\n");
    write(&src, "broken.rs", "fn (");

    let err = Compilation::load("demo", src.join("lib.rs")).err().unwrap();
    assert!(matches!(err, GenerateError::Parse { .. }));
}

#[test]
fn load_reports_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let err = Compilation::load("demo", dir.path().join("lib.rs"))
        .err()
        .unwrap();
    assert!(matches!(err, GenerateError::Io { .. }));
}

#[test]
fn module_files_inherit_enclosing_cfg() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    write(
        &src,
        "lib.rs",
        "#[cfg(windows)]\nmod platform { pub mod win; }\nmod plain;\n",
    );
    write(&src, "platform/win.rs", "#![cfg(feature = \"com\")]\npub enum Handle { A }\n");
    write(&src, "plain.rs", "");

    let compilation = Compilation::load("demo", src.join("lib.rs")).unwrap();
    let gates: Vec<(String, Vec<String>)> = compilation
        .files()
        .iter()
        .map(|f| (f.module.to_string(), f.cfg.clone()))
        .collect();
    assert_eq!(
        gates,
        vec![
            ("crate".to_string(), vec![]),
            (
                "crate::platform::win".to_string(),
                vec![
                    "#[cfg (windows)]".to_string(),
                    "#[cfg (feature = \"com\")]".to_string()
                ]
            ),
            ("crate::plain".to_string(), vec![]),
        ]
    );
}
