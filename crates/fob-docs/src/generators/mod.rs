//! Output emitters for the project model.

#[cfg(feature = "html")]
pub mod html;
#[cfg(feature = "json")]
pub mod json;

use std::fs;
use std::path::Path;

use crate::error::{DocsError, Result};

/// Write `contents` to `path`, creating parent directories first.
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| DocsError::io(parent, error))?;
    }
    fs::write(path, contents).map_err(|error| DocsError::io(path, error))
}
