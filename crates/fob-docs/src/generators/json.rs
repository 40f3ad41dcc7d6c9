use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use super::write_file;
use crate::{
    error::{DocsError, Result},
    model::Project,
};

/// Pretty-printed JSON description of the project including generation metadata.
pub fn render_json(project: &Project) -> Result<String> {
    let payload = JsonPayload {
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now().to_rfc3339(),
        project,
    };

    serde_json::to_string_pretty(&payload).map_err(|error| DocsError::Render {
        message: error.to_string(),
    })
}

/// Render the project and write it to `path`.
pub fn write_json(project: &Project, path: &Path) -> Result<()> {
    let mut content = render_json(project)?;
    content.push('\n');
    write_file(path, &content)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonPayload<'a> {
    version: &'static str,
    generated_at: String,
    project: &'a Project,
}
