use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VitalsError};

/// Writes the rendered document to `path`, replacing any existing file.
///
/// Returns the path that was written. There is no retry.
///
/// ## Errors
///
/// Returns [`VitalsError::ReportWrite`] if the file cannot be created or
/// written, for example when the parent directory does not exist.
pub fn write_report(path: &Path, html: &str) -> Result<PathBuf> {
    fs::write(path, html.as_bytes()).map_err(|source| VitalsError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = html.len(), "report written");
    Ok(path.to_path_buf())
}
