//! Round-trip tests against a real ISO-9660 encoder.
//!
//! These need an mkisofs-family tool on PATH; each test skips itself with
//! a note when none is installed. Decoding uses the `cdfs` crate, i.e. an
//! independent reader, not the encoder that produced the image.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use cdfs::{DirectoryEntry, ISO9660};
use unattend_plugin::resource::{CreateRequest, Resource};
use unattend_provider::{
    FileEntry, ImageBuilder, MkisofsImageBuilder, UnattendFileModel, UnattendIsoResource,
    ANSWER_FILE_NAME,
};

fn encoder_available() -> bool {
    ["xorriso", "genisoimage", "mkisofs"]
        .iter()
        .any(|tool| which::which(tool).is_ok())
}

/// Reads the answer file out of an image, trying the Rock Ridge name first
/// and the plain ISO-9660 identifiers as fallbacks.
fn read_answer_file(path: &Path) -> Result<Option<Vec<u8>>> {
    let iso = ISO9660::new(File::open(path)?).map_err(|e| anyhow::anyhow!("open iso: {e:?}"))?;

    for candidate in [ANSWER_FILE_NAME, "UNATTEND.XML;1", "UNATTEND.XML"] {
        let entry = iso
            .open(candidate)
            .map_err(|e| anyhow::anyhow!("lookup '{candidate}': {e:?}"))?;
        if let Some(DirectoryEntry::File(file)) = entry {
            let mut content = Vec::new();
            file.read().read_to_end(&mut content)?;
            return Ok(Some(content));
        }
    }

    Ok(None)
}

#[test]
fn non_empty_payload_round_trips() -> Result<()> {
    if !encoder_available() {
        eprintln!("skipping: no mkisofs-family encoder on PATH");
        return Ok(());
    }

    let payload = "<unattend><settings pass=\"oobeSystem\"/></unattend>";
    let builder = MkisofsImageBuilder::new();
    let image = builder.build(
        "ANSWER",
        &[FileEntry::new(ANSWER_FILE_NAME, payload.as_bytes())],
    )?;

    // Volume descriptor magic at sector 16.
    assert_eq!(&image[0x8001..0x8006], b"CD001");

    let dir = tempfile::tempdir()?;
    let iso_path = dir.path().join("answer.iso");
    std::fs::write(&iso_path, &image)?;

    let content = read_answer_file(&iso_path)?.expect("image should contain the answer file");
    assert_eq!(content, payload.as_bytes());
    Ok(())
}

#[test]
fn empty_payload_produces_image_without_answer_file() -> Result<()> {
    if !encoder_available() {
        eprintln!("skipping: no mkisofs-family encoder on PATH");
        return Ok(());
    }

    let builder = MkisofsImageBuilder::new();
    let image = builder.build("ANSWER", &[])?;

    assert_eq!(&image[0x8001..0x8006], b"CD001");

    let dir = tempfile::tempdir()?;
    let iso_path = dir.path().join("empty.iso");
    std::fs::write(&iso_path, &image)?;

    assert!(read_answer_file(&iso_path)?.is_none());
    Ok(())
}

#[test]
fn create_end_to_end_produces_a_decodable_image() -> Result<()> {
    if !encoder_available() {
        eprintln!("skipping: no mkisofs-family encoder on PATH");
        return Ok(());
    }

    let resource = UnattendIsoResource::new();
    let out = tempfile::tempdir()?;
    let prefix = format!("{}/", out.path().display());

    let resp = resource.create(CreateRequest {
        plan: UnattendFileModel {
            id: None,
            file_name: "a.iso".to_string(),
            path_override: Some(prefix.clone()),
            xml_content: "<x/>".to_string(),
            result_path: None,
        },
    });

    assert!(!resp.diagnostics.has_errors(), "{:?}", resp.diagnostics);
    let state = resp.state.expect("create should commit state");

    assert!(state.id.as_deref().is_some_and(|id| !id.is_empty()));
    let result_path = state.result_path.as_deref().unwrap();
    assert_eq!(result_path, format!("{prefix}a.iso"));

    let content = read_answer_file(Path::new(result_path))?
        .expect("image should contain the answer file");
    assert_eq!(content, b"<x/>");
    Ok(())
}

#[test]
fn builds_are_reproducible_with_xorriso() -> Result<()> {
    let Ok(xorriso) = which::which("xorriso") else {
        eprintln!("skipping: xorriso not on PATH");
        return Ok(());
    };

    let builder = MkisofsImageBuilder::with_tool(xorriso);
    let entries = [FileEntry::new(ANSWER_FILE_NAME, "<x/>".as_bytes())];

    let first = builder.build("ANSWER", &entries)?;
    let second = builder.build("ANSWER", &entries)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn mock_and_real_builder_share_the_contract() -> Result<()> {
    if !encoder_available() {
        eprintln!("skipping: no mkisofs-family encoder on PATH");
        return Ok(());
    }

    // Both implementations reject the same invalid entry names.
    let real = MkisofsImageBuilder::new();
    let mock = unattend_provider::MockImageBuilder::new();
    let bad = [FileEntry::new("nested/answer.xml", "x".as_bytes())];

    let real_builder: &dyn ImageBuilder = &real;
    let mock_builder: &dyn ImageBuilder = &mock;
    assert!(real_builder.build("ANSWER", &bad).is_err());
    assert!(mock_builder.build("ANSWER", &bad).is_err());

    // And the failure leaves nothing behind for the next build to trip on.
    let image = real.build("ANSWER", &[])?;
    assert!(!image.is_empty());
    Ok(())
}
