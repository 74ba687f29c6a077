//! ISO-9660 image construction.
//!
//! The builder interface abstracts image construction:
//! - staging in-memory file entries into a filesystem tree
//! - delegating sector layout to an external mkisofs-family encoder
//!
//! A mock implementation is provided for testing and development.
//!
//! # Invariants
//!
//! - Construction scratch space (staging tree, encoder output) is scoped to
//!   one `build` call and released on every exit path, including errors.
//! - Image bytes are a deterministic function of the volume label and the
//!   entries. The encoder is pinned to `SOURCE_DATE_EPOCH=0` so repeated
//!   builds of the same declaration produce identical bytes.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use sha2::{Digest, Sha256};
use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, info};

/// Encoder binaries probed on PATH, in preference order.
const ENCODER_CANDIDATES: &[&str] = &["xorriso", "genisoimage", "mkisofs"];

/// Fallback volume label when nothing of the file name survives
/// sanitization.
const DEFAULT_VOLUME_LABEL: &str = "UNATTEND";

/// Volume labels are capped at 32 bytes by the volume descriptor layout.
const VOLUME_LABEL_MAX: usize = 32;

/// Errors from image construction.
///
/// Each variant is terminal for the operation that triggered it; nothing
/// here is retried.
#[derive(Debug, Error)]
pub enum BuildError {
    /// No encoder available: nothing usable on PATH.
    #[error("no ISO-9660 encoder found on PATH (tried xorriso, genisoimage, mkisofs)")]
    EncoderUnavailable,

    /// An entry name cannot be staged.
    #[error("invalid entry name '{0}': must be a bare file name")]
    InvalidFileName(String),

    /// Staging the entries or collecting the encoder output failed.
    #[error("image staging failed: {0}")]
    Staging(#[from] std::io::Error),

    /// The encoder ran and reported failure.
    #[error("encoder '{tool}' failed ({status}): {stderr}")]
    EncoderFailed {
        tool: String,
        status: String,
        stderr: String,
    },
}

/// A file to embed in the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Bare file name inside the image root.
    pub name: String,
    /// File content.
    pub content: Vec<u8>,
}

impl FileEntry {
    /// Creates an entry from a name and content bytes.
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Builds ISO-9660 images from in-memory file entries.
pub trait ImageBuilder: Send + Sync {
    /// Produces a complete image as an in-memory byte sequence.
    fn build(&self, volume: &str, entries: &[FileEntry]) -> Result<Vec<u8>, BuildError>;
}

/// Derives the volume label from the declared file name.
///
/// Takes the file-name stem, uppercases it, and maps everything outside
/// `[A-Z0-9_]` to `_`, capped at 32 bytes. An empty result falls back to
/// `UNATTEND`. Keeping this a pure function of the file name is what keeps
/// image bytes reproducible per declaration.
pub fn volume_label(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("");

    let mut label: String = stem
        .chars()
        .map(|c| {
            let c = c.to_ascii_uppercase();
            if c.is_ascii_alphanumeric() {
                c
            } else {
                '_'
            }
        })
        .collect();
    label.truncate(VOLUME_LABEL_MAX);

    if label.is_empty() {
        DEFAULT_VOLUME_LABEL.to_string()
    } else {
        label
    }
}

/// Rejects entry names that would escape the staging root.
fn checked_entry_name(name: &str) -> Result<&str, BuildError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if invalid {
        return Err(BuildError::InvalidFileName(name.to_string()));
    }
    Ok(name)
}

/// Resolved encoder invocation.
struct Encoder {
    binary: PathBuf,
    /// xorriso needs `-as mkisofs` to accept the mkisofs CLI.
    as_mkisofs: bool,
}

/// Image builder backed by an external mkisofs-family encoder.
///
/// The encoder binary is located per build call, so an encoder that is
/// missing at startup but installed later is picked up without restarting,
/// and a missing encoder surfaces as a per-operation failure rather than a
/// constructor error.
pub struct MkisofsImageBuilder {
    tool_override: Option<PathBuf>,
}

impl MkisofsImageBuilder {
    /// Builder that discovers an encoder on PATH.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_override: None,
        }
    }

    /// Builder pinned to an explicit encoder binary.
    pub fn with_tool(tool: impl Into<PathBuf>) -> Self {
        Self {
            tool_override: Some(tool.into()),
        }
    }

    fn locate(&self) -> Result<Encoder, BuildError> {
        if let Some(tool) = &self.tool_override {
            return Ok(Encoder {
                as_mkisofs: is_xorriso(tool),
                binary: tool.clone(),
            });
        }

        for candidate in ENCODER_CANDIDATES {
            if let Ok(binary) = which::which(candidate) {
                return Ok(Encoder {
                    as_mkisofs: *candidate == "xorriso",
                    binary,
                });
            }
        }

        Err(BuildError::EncoderUnavailable)
    }
}

impl Default for MkisofsImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn is_xorriso(tool: &Path) -> bool {
    tool.file_stem().and_then(OsStr::to_str) == Some("xorriso")
}

impl ImageBuilder for MkisofsImageBuilder {
    fn build(&self, volume: &str, entries: &[FileEntry]) -> Result<Vec<u8>, BuildError> {
        let encoder = self.locate()?;

        // Dropped on every exit path, taking the staging tree and the
        // encoder output with it.
        let staging = TempDir::with_prefix("unattend-iso-")?;
        let tree = staging.path().join("root");
        fs::create_dir(&tree)?;

        for entry in entries {
            let name = checked_entry_name(&entry.name)?;
            fs::write(tree.join(name), &entry.content)?;
        }

        let output = staging.path().join("image.iso");
        let tool = encoder.binary.display().to_string();

        debug!(
            tool = %tool,
            volume = %volume,
            entry_count = entries.len(),
            "Encoding ISO image"
        );

        let mut cmd = Command::new(&encoder.binary);
        if encoder.as_mkisofs {
            cmd.args(["-as", "mkisofs"]);
        }
        cmd.arg("-quiet")
            .arg("-r")
            .arg("-V")
            .arg(volume)
            .arg("-o")
            .arg(&output)
            .arg(&tree)
            .env("SOURCE_DATE_EPOCH", "0");

        let run = cmd.output().map_err(|e| BuildError::EncoderFailed {
            tool: tool.clone(),
            status: "failed to start".to_string(),
            stderr: e.to_string(),
        })?;

        if !run.status.success() {
            return Err(BuildError::EncoderFailed {
                tool,
                status: run.status.to_string(),
                stderr: String::from_utf8_lossy(&run.stderr).trim().to_string(),
            });
        }

        let image = fs::read(&output)?;

        let digest = hex::encode(Sha256::digest(&image));
        info!(
            tool = %tool,
            volume = %volume,
            bytes = image.len(),
            sha256 = %digest,
            "ISO image encoded"
        );

        Ok(image)
    }
}

/// Mock image builder for testing and development.
pub struct MockImageBuilder {
    /// Whether builds should "fail" as if no encoder were available.
    fail_builds: bool,
}

impl MockImageBuilder {
    /// Create a new mock builder.
    #[must_use]
    pub fn new() -> Self {
        Self { fail_builds: false }
    }

    /// Create a mock builder that fails every build.
    #[must_use]
    pub fn failing() -> Self {
        Self { fail_builds: true }
    }
}

impl Default for MockImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBuilder for MockImageBuilder {
    fn build(&self, volume: &str, entries: &[FileEntry]) -> Result<Vec<u8>, BuildError> {
        if self.fail_builds {
            return Err(BuildError::EncoderUnavailable);
        }

        debug!(
            volume = %volume,
            entry_count = entries.len(),
            "[MOCK] Encoding ISO image"
        );

        // Deterministic pseudo-image: label line, then each entry's name
        // and content. Not a valid ISO, but stable per input.
        let mut image = format!("MOCKISO {volume}\n").into_bytes();
        for entry in entries {
            let name = checked_entry_name(&entry.name)?;
            image.extend_from_slice(name.as_bytes());
            image.push(b'\n');
            image.extend_from_slice(&entry.content);
            image.push(b'\n');
        }

        Ok(image)
    }
}
