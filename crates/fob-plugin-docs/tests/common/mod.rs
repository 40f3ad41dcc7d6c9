//! Recording engine shared by the orchestrator and plugin tests.

#![allow(dead_code)]

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use fob_plugin_docs::{DocEngine, EngineFactory, Stage};
use serde_json::{Map, Value};

pub fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

pub fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[derive(Debug)]
pub struct MockError(&'static str);

impl fmt::Display for MockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for MockError {}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(Map<String, Value>),
    Expand(Vec<String>),
    Convert(Vec<PathBuf>),
    GenerateJson(PathBuf),
    GenerateDocs(PathBuf),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Behavior {
    pub produce_project: bool,
    pub fail_at: Option<Stage>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub behavior: Behavior,
}

impl RecordingFactory {
    pub fn producing() -> Self {
        Self {
            behavior: Behavior {
                produce_project: true,
                fail_at: None,
            },
            ..Self::default()
        }
    }

    pub fn failing_at(stage: Stage) -> Self {
        Self {
            behavior: Behavior {
                produce_project: true,
                fail_at: Some(stage),
            },
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

pub struct RecordingEngine {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub behavior: Behavior,
}

impl RecordingEngine {
    fn record(&self, call: Call, stage: Stage) -> Result<(), MockError> {
        self.calls.lock().unwrap().push(call);
        match self.behavior.fail_at {
            Some(failing) if failing == stage => Err(MockError("boom")),
            _ => Ok(()),
        }
    }
}

impl EngineFactory for RecordingFactory {
    type Engine = RecordingEngine;
    type Error = MockError;

    fn create(&self, options: &Map<String, Value>) -> Result<RecordingEngine, MockError> {
        let engine = RecordingEngine {
            calls: Arc::clone(&self.calls),
            behavior: self.behavior,
        };
        engine.record(Call::Create(options.clone()), Stage::Create)?;
        Ok(engine)
    }
}

impl DocEngine for RecordingEngine {
    type Project = &'static str;
    type Error = MockError;

    fn expand_input_files(&self, inputs: &[String]) -> Result<Vec<PathBuf>, MockError> {
        self.record(Call::Expand(inputs.to_vec()), Stage::Expand)?;
        Ok(inputs.iter().map(PathBuf::from).collect())
    }

    fn convert(&self, files: &[PathBuf]) -> Result<Option<&'static str>, MockError> {
        self.record(Call::Convert(files.to_vec()), Stage::Convert)?;
        Ok(self.behavior.produce_project.then_some("project"))
    }

    fn generate_json(&self, _project: &&'static str, path: &Path) -> Result<(), MockError> {
        self.record(Call::GenerateJson(path.to_path_buf()), Stage::Emit)
    }

    fn generate_docs(&self, _project: &&'static str, dir: &Path) -> Result<(), MockError> {
        self.record(Call::GenerateDocs(dir.to_path_buf()), Stage::Emit)
    }
}
