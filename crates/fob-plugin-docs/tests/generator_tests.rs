mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::{Call, RecordingFactory, map, write};
use fob_plugin_docs::{DocgenError, DocsGenerator, GenerationOutcome, InputSpec, Stage};
use serde_json::{Value, json};
use tempfile::TempDir;

#[test]
fn json_mode_drives_engine_in_order() {
    let factory = RecordingFactory::producing();
    let generator = DocsGenerator::with_factory(
        factory.clone(),
        Some(map(json!({ "json": "api.json" }))),
        Some(InputSpec::from("src")),
    );

    let outcome = generator.generate(Some(Path::new("/build"))).unwrap();
    assert_eq!(outcome, GenerationOutcome::Json(PathBuf::from("/build/api.json")));

    let calls = factory.calls();
    assert_eq!(calls.len(), 4);
    match &calls[0] {
        Call::Create(options) => {
            assert_eq!(options.get("json"), Some(&json!("/build/api.json")));
            assert_eq!(options.get("module"), Some(&json!("commonjs")));
            assert_eq!(options.get("out"), None);
        }
        other => panic!("expected create, got {other:?}"),
    }
    assert_eq!(calls[1], Call::Expand(vec!["src".into()]));
    assert_eq!(calls[2], Call::Convert(vec![PathBuf::from("src")]));
    assert_eq!(calls[3], Call::GenerateJson(PathBuf::from("/build/api.json")));
}

#[test]
fn directory_mode_with_absolute_out() {
    let factory = RecordingFactory::producing();
    let generator = DocsGenerator::with_factory(
        factory.clone(),
        Some(map(json!({ "out": "/abs/docs" }))),
        Some(InputSpec::from(vec!["a.ts", "b.ts"])),
    );

    let outcome = generator.generate(Some(Path::new("/build"))).unwrap();
    assert_eq!(outcome, GenerationOutcome::Site(PathBuf::from("/abs/docs")));

    let calls = factory.calls();
    assert_eq!(calls[1], Call::Expand(vec!["a.ts".into(), "b.ts".into()]));
    assert_eq!(calls.last(), Some(&Call::GenerateDocs(PathBuf::from("/abs/docs"))));
    assert!(!calls.iter().any(|call| matches!(call, Call::GenerateJson(_))));
}

#[test]
fn defaults_document_current_directory_into_docs() {
    let factory = RecordingFactory::producing();
    let generator = DocsGenerator::with_factory(factory.clone(), None, None);

    let outcome = generator.generate(Some(Path::new("/build"))).unwrap();
    assert_eq!(outcome, GenerationOutcome::Site(PathBuf::from("/build/docs")));
    assert_eq!(factory.calls()[1], Call::Expand(vec!["./".into()]));
}

#[test]
fn no_project_skips_emission_and_still_completes() {
    let factory = RecordingFactory::default();
    let generator = DocsGenerator::with_factory(factory.clone(), None, Some("src".into()));

    let outcome = generator.generate(Some(Path::new("/build"))).unwrap();
    assert_eq!(outcome, GenerationOutcome::Skipped);
    generator.finish();

    let calls = factory.calls();
    assert_eq!(calls.len(), 3);
    assert!(
        !calls
            .iter()
            .any(|call| matches!(call, Call::GenerateJson(_) | Call::GenerateDocs(_)))
    );
}

#[test]
fn engine_failures_carry_their_stage() {
    for stage in [Stage::Create, Stage::Expand, Stage::Convert, Stage::Emit] {
        let generator =
            DocsGenerator::with_factory(RecordingFactory::failing_at(stage), None, None);

        let error = generator.generate(None).unwrap_err();
        assert_eq!(error.stage(), Some(stage));
        assert!(matches!(error, DocgenError::Engine { .. }));
        assert!(error.to_string().contains(&stage.to_string()));
        assert!(error.to_string().contains("boom"));
    }
}

#[test]
fn failure_stops_the_pipeline() {
    let factory = RecordingFactory::failing_at(Stage::Expand);
    let generator = DocsGenerator::with_factory(factory.clone(), None, None);

    assert!(generator.generate(None).is_err());
    assert_eq!(factory.calls().len(), 2);
}

#[test]
fn repeated_runs_resolve_independently() {
    let factory = RecordingFactory::producing();
    let generator = DocsGenerator::with_factory(factory.clone(), None, None);

    generator.generate(Some(Path::new("/one"))).unwrap();
    generator.generate(Some(Path::new("/two"))).unwrap();

    let emitted: Vec<_> = factory
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::GenerateDocs(dir) => Some(dir),
            _ => None,
        })
        .collect();
    assert_eq!(emitted, [PathBuf::from("/one/docs"), PathBuf::from("/two/docs")]);
    assert_eq!(generator.options().out(), Some("./docs"));
}

fn project_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "src/math.ts",
        "/**\n * Adds two numbers.\n * @param a first\n * @param b second\n */\nexport function add(a: number, b: number): number { return a + b; }\n",
    );
    write(dir.path(), "src/node_modules/dep/index.ts", "/** Dep. */\nexport const dep = 1;\n");
    dir
}

#[test]
fn real_engine_writes_json_relative_to_host_dir() {
    let dir = project_fixture();
    let generator = DocsGenerator::new(
        Some(map(json!({ "json": "api.json", "readme": "none" }))),
        Some(InputSpec::from(dir.path().join("src"))),
    );

    let host = dir.path().join("dist");
    let outcome = generator.generate(Some(&host)).unwrap();
    assert_eq!(outcome, GenerationOutcome::Json(host.join("api.json")));

    let written: Value =
        serde_json::from_str(&fs::read_to_string(host.join("api.json")).unwrap()).unwrap();
    let modules = written["project"]["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0]["symbols"][0]["name"], "add");
    assert!(!dir.path().join("dist/docs").exists());
}

#[test]
fn real_engine_writes_site_to_default_out() {
    let dir = project_fixture();
    let generator = DocsGenerator::new(
        Some(map(json!({ "readme": "none", "name": "Math" }))),
        Some(InputSpec::from(dir.path().join("src"))),
    );

    let host = dir.path().join("dist");
    let outcome = generator.generate(Some(&host)).unwrap();
    assert_eq!(outcome, GenerationOutcome::Site(host.join("docs")));

    let index = fs::read_to_string(host.join("docs/index.html")).unwrap();
    assert!(index.contains("Math"));
    assert!(host.join("docs/assets/style.css").is_file());
}

#[test]
fn real_engine_skips_inputs_without_exports() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/plain.ts", "const local = 1;\n");
    let generator = DocsGenerator::new(
        Some(map(json!({ "readme": "none" }))),
        Some(InputSpec::from(dir.path().join("src"))),
    );

    let outcome = generator.generate(Some(dir.path())).unwrap();
    assert_eq!(outcome, GenerationOutcome::Skipped);
    assert!(!dir.path().join("docs").exists());
}

#[test]
fn real_engine_missing_input_fails_at_expand() {
    let dir = TempDir::new().unwrap();
    let generator = DocsGenerator::new(
        Some(map(json!({ "readme": "none" }))),
        Some(InputSpec::from(dir.path().join("missing"))),
    );

    let error = generator.generate(Some(dir.path())).unwrap_err();
    assert_eq!(error.stage(), Some(Stage::Expand));
}

#[test]
fn real_engine_never_cleans_a_directory_holding_sources() {
    let dir = project_fixture();
    write(dir.path(), "bundle.js", "console.log(1);\n");
    let generator = DocsGenerator::new(
        Some(map(json!({ "out": ".", "readme": "none" }))),
        Some(InputSpec::from(dir.path().join("src"))),
    );

    let error = generator.generate(Some(dir.path())).unwrap_err();

    assert_eq!(error.stage(), Some(Stage::Emit));
    assert!(dir.path().join("src/math.ts").is_file());
    assert!(dir.path().join("bundle.js").is_file());
    assert!(!dir.path().join("index.html").exists());
}
