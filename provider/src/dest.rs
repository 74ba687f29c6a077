//! Destination path resolution.
//!
//! The wire contract gives users one optional string, `path_override`, to
//! steer where the image lands. It is normalized here, in exactly one
//! place, into a tagged [`Destination`] so the rest of the core never
//! compares sentinel strings.

use std::path::PathBuf;

use tempfile::Builder;
use thiserror::Error;
use tracing::debug;

/// Wire-level sentinel meaning "no override given". Kept for compatibility
/// with hosts that send the default back verbatim.
const TEMP_SENTINEL: &str = "tmp";

/// Errors from destination resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The OS temp-file mechanism failed.
    #[error("could not create temporary file: {0}")]
    TempFile(#[from] std::io::Error),
}

/// Where the image file should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Uniquely named file in the OS-designated temporary directory.
    TempDir,
    /// Caller-supplied prefix, used verbatim.
    Directory(String),
}

impl Destination {
    /// Normalizes the wire-level `path_override` attribute.
    ///
    /// An absent value and the literal default `"tmp"` both select the OS
    /// temp-file mechanism; any other value is a directory prefix.
    #[must_use]
    pub fn from_wire(path_override: Option<&str>) -> Self {
        match path_override {
            None | Some(TEMP_SENTINEL) => Self::TempDir,
            Some(dir) => Self::Directory(dir.to_string()),
        }
    }
}

/// Computes the path the image will be written to.
///
/// For [`Destination::Directory`] the result is the prefix concatenated
/// with `file_name` verbatim. No separator is inserted: a prefix naming a
/// directory must carry its own trailing separator, otherwise the file
/// name is appended to the last path component. Sharp edge, kept for
/// compatibility with existing declarations.
///
/// For [`Destination::TempDir`] a uniquely named file is created in the OS
/// temp directory with `file_name` as the prefix hint, and whatever unique
/// path the OS produced is returned. The file is left in place for the
/// writer to truncate; repeated calls return distinct paths.
pub fn resolve(dest: &Destination, file_name: &str) -> Result<PathBuf, ResolveError> {
    match dest {
        Destination::Directory(prefix) => Ok(PathBuf::from(format!("{prefix}{file_name}"))),
        Destination::TempDir => {
            let file = Builder::new().prefix(file_name).tempfile()?;
            let (_handle, path) = file.keep().map_err(|e| ResolveError::TempFile(e.error))?;
            debug!(path = %path.display(), "Reserved temp destination");
            Ok(path)
        }
    }
}
