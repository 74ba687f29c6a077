//! Image persistence.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

/// Errors from persisting the image.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The file could not be created or truncated.
    #[error("could not create '{path}': {source}")]
    Create {
        path: String,
        source: std::io::Error,
    },

    /// Writing the image bytes failed partway through.
    #[error("could not write '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Creates (or truncates) `path` and writes the complete image.
///
/// Best-effort only: there is no temp-and-rename step, so a failure
/// partway through leaves a truncated file behind and the caller treats
/// the operation as failed without retrying. The handle is scoped to this
/// call and closed on every exit path.
pub fn write_image(path: &Path, data: &[u8]) -> Result<(), WriteError> {
    let mut file = File::create(path).map_err(|e| WriteError::Create {
        path: path.display().to_string(),
        source: e,
    })?;

    file.write_all(data).map_err(|e| WriteError::Write {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!(path = %path.display(), bytes = data.len(), "Image written");
    Ok(())
}
