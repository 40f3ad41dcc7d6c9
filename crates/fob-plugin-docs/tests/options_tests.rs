use std::path::{Path, PathBuf};

use fob_plugin_docs::{DEFAULT_OUT_DIR, DocOptions, DocsGenerator, OutputMode, OutputTarget};
use serde_json::{Map, Value, json};

fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

#[test]
fn caller_values_overlay_defaults() {
    let options = DocOptions::merged(Some(map(json!({
        "target": "es2020",
        "name": "My API"
    }))));

    assert_eq!(options.get("target"), Some(&json!("es2020")));
    assert_eq!(options.get("name"), Some(&json!("My API")));
    assert_eq!(options.get("module"), Some(&json!("commonjs")));
    assert_eq!(options.get("exclude"), Some(&json!("**/node_modules/**/*.*")));
    assert_eq!(options.get("experimentalDecorators"), Some(&json!(true)));
    assert_eq!(options.get("excludeExternals"), Some(&json!(true)));
}

#[test]
fn every_default_key_survives_an_unrelated_override() {
    let options = DocOptions::merged(Some(map(json!({ "readme": "none" }))));
    for key in DocOptions::defaults().keys() {
        assert_eq!(options.get(key), DocOptions::defaults().get(key), "{key}");
    }
}

#[test]
fn out_defaults_to_docs_directory() {
    let options = DocOptions::default();
    assert_eq!(options.out(), Some(DEFAULT_OUT_DIR));
    assert_eq!(options.json(), None);
    assert_eq!(options.output_mode(), OutputMode::Directory);
}

#[test]
fn json_suppresses_the_out_default() {
    let options = DocOptions::merged(Some(map(json!({ "json": "api.json" }))));
    assert_eq!(options.get("out"), None);
    assert_eq!(options.output_mode(), OutputMode::Json);
}

#[test]
fn json_wins_when_both_are_set() {
    let options = DocOptions::merged(Some(map(json!({
        "json": "api.json",
        "out": "site"
    }))));
    assert_eq!(options.output_mode(), OutputMode::Json);

    let plan = options.resolve(Some(Path::new("/build")));
    assert_eq!(plan.target, OutputTarget::Json(PathBuf::from("/build/api.json")));
    assert_eq!(plan.options.get("out"), Some(&json!("site")));
}

#[test]
fn relative_json_resolves_against_host_dir() {
    let generator = DocsGenerator::new(Some(map(json!({ "json": "api.json" }))), None);
    let plan = generator.options().resolve(Some(Path::new("/build")));

    assert_eq!(plan.target, OutputTarget::Json(PathBuf::from("/build/api.json")));
    assert_eq!(plan.options.get("json"), Some(&json!("/build/api.json")));
}

#[test]
fn absolute_out_is_used_verbatim() {
    let options = DocOptions::merged(Some(map(json!({ "out": "/abs/docs" }))));
    let plan = options.resolve(Some(Path::new("/build")));
    assert_eq!(plan.target, OutputTarget::Directory(PathBuf::from("/abs/docs")));
}

#[test]
fn default_out_resolves_against_host_dir() {
    let plan = DocOptions::default().resolve(Some(Path::new("/build")));
    assert_eq!(plan.target, OutputTarget::Directory(PathBuf::from("/build/docs")));
    assert_eq!(plan.options.get("out"), Some(&json!("/build/docs")));
}

#[test]
fn resolution_leaves_stored_options_untouched() {
    let options = DocOptions::default();
    let before = options.clone();

    let first = options.resolve(Some(Path::new("/one")));
    let second = options.resolve(Some(Path::new("/two")));

    assert_eq!(options, before);
    assert_eq!(first.target.path(), Path::new("/one/docs"));
    assert_eq!(second.target.path(), Path::new("/two/docs"));
}

#[test]
fn without_host_dir_relative_paths_stay_relative() {
    let plan = DocOptions::default().resolve(None);
    assert_eq!(plan.target, OutputTarget::Directory(PathBuf::from("./docs")));
}
