//! End-to-end binding generation against a fixture artifact.

use contract_shell::Bindgen;
use std::fs;

fn fixture() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/my_token.json")
}

#[test]
fn generates_module_keyed_by_normalized_name() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("gen");

    let bindings = Bindgen::from_file(fixture()).unwrap().generate().unwrap();
    bindings.write_module_in_dir(&out).unwrap();

    let file = out.join("My_Token_.rs");
    let source = fs::read_to_string(&file).unwrap();
    assert!(source.contains("pub struct My_Token_<M>"));
    assert!(source.contains("pub fn balanceOf"));
    assert!(source.contains("pub fn transfer"));
    assert!(source.contains("pub fn deploy"));
    assert!(source.contains("balanceOf(address: who) -> (uint256)"));
}

#[test]
fn regeneration_overwrites_with_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("My_Token_.rs");

    Bindgen::from_file(fixture())
        .unwrap()
        .generate()
        .unwrap()
        .write_module_in_dir(dir.path())
        .unwrap();
    let first = fs::read(&file).unwrap();

    Bindgen::from_file(fixture())
        .unwrap()
        .generate()
        .unwrap()
        .write_module_in_dir(dir.path())
        .unwrap();
    let second = fs::read(&file).unwrap();

    assert_eq!(first, second);
}

#[test]
fn write_dir_is_created_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a/b/c");

    let bindings = Bindgen::from_file(fixture()).unwrap().generate().unwrap();
    bindings.write_module_in_dir(&nested).unwrap();
    // writing again into the now-existing directory is fine
    bindings.write_module_in_dir(&nested).unwrap();

    assert!(nested.join("My_Token_.rs").exists());
}

#[test]
fn name_override_rekeys_the_artifact() {
    let bindings = Bindgen::from_file(fixture())
        .unwrap()
        .with_name("plain token")
        .generate()
        .unwrap();
    assert_eq!(bindings.name(), "plain_token");
    assert_eq!(bindings.module_filename(), "plain_token.rs");
}
