//! Integration tests for the resource lifecycle.
//!
//! These drive the full create/read/update/delete/import flow the way the
//! host does, using the mock image builder so no external encoder is
//! needed. Image validity is covered separately in `image_roundtrip.rs`.

use std::sync::Arc;

use serde_json::json;
use unattend_plugin::resource::{
    CreateRequest, DeleteRequest, ImportStateRequest, ReadRequest, Resource, UpdateRequest,
};
use unattend_provider::{MockImageBuilder, UnattendFileModel, UnattendIsoResource};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}

fn mock_resource() -> UnattendIsoResource {
    UnattendIsoResource::with_builder(Arc::new(MockImageBuilder::new()))
}

fn plan(file_name: &str, xml_content: &str, path_override: Option<String>) -> UnattendFileModel {
    UnattendFileModel {
        id: None,
        file_name: file_name.to_string(),
        path_override,
        xml_content: xml_content.to_string(),
        result_path: None,
    }
}

#[test]
fn create_writes_image_and_records_state() {
    init_tracing();
    let resource = mock_resource();

    let dir = tempfile::tempdir().unwrap();
    let prefix = format!("{}/", dir.path().display());

    let resp = resource.create(CreateRequest {
        plan: plan("a.iso", "<x/>", Some(prefix.clone())),
    });

    assert!(!resp.diagnostics.has_errors());
    let state = resp.state.expect("create should commit state");

    let id = state.id.as_deref().expect("id assigned at creation");
    assert!(id.starts_with("iso_"));

    let expected_path = format!("{prefix}a.iso");
    assert_eq!(state.result_path.as_deref(), Some(expected_path.as_str()));

    let on_disk = std::fs::read(&expected_path).unwrap();
    assert!(!on_disk.is_empty());
}

#[test]
fn create_without_override_uses_temp_mechanism() {
    init_tracing();
    let resource = mock_resource();

    let resp = resource.create(CreateRequest {
        plan: plan("answer.iso", "<x/>", None),
    });

    let state = resp.state.expect("create should commit state");
    let result_path = std::path::PathBuf::from(state.result_path.unwrap());

    let canonical = result_path.canonicalize().unwrap();
    let temp_root = std::env::temp_dir().canonicalize().unwrap();
    assert!(canonical.starts_with(&temp_root));

    std::fs::remove_file(&result_path).unwrap();
}

#[test]
fn create_with_wire_default_sentinel_uses_temp_mechanism() {
    init_tracing();
    let resource = mock_resource();

    let resp = resource.create(CreateRequest {
        plan: plan("answer.iso", "<x/>", Some("tmp".to_string())),
    });

    let state = resp.state.expect("create should commit state");
    let result_path = std::path::PathBuf::from(state.result_path.unwrap());

    let canonical = result_path.canonicalize().unwrap();
    let temp_root = std::env::temp_dir().canonicalize().unwrap();
    assert!(canonical.starts_with(&temp_root));

    std::fs::remove_file(&result_path).unwrap();
}

#[test]
fn repeated_temp_creates_get_distinct_paths() {
    init_tracing();
    let resource = mock_resource();

    let first = resource
        .create(CreateRequest {
            plan: plan("answer.iso", "<x/>", None),
        })
        .state
        .unwrap();
    let second = resource
        .create(CreateRequest {
            plan: plan("answer.iso", "<x/>", None),
        })
        .state
        .unwrap();

    assert_ne!(first.result_path, second.result_path);
    assert_ne!(first.id, second.id);

    std::fs::remove_file(first.result_path.unwrap()).unwrap();
    std::fs::remove_file(second.result_path.unwrap()).unwrap();
}

#[test]
fn create_with_empty_payload_still_writes_an_image() {
    init_tracing();
    let resource = mock_resource();

    let dir = tempfile::tempdir().unwrap();
    let prefix = format!("{}/", dir.path().display());

    let resp = resource.create(CreateRequest {
        plan: plan("bare.iso", "", Some(prefix.clone())),
    });

    assert!(!resp.diagnostics.has_errors());
    let state = resp.state.unwrap();
    assert!(state.id.is_some());

    // An image exists even with nothing embedded in it.
    let on_disk = std::fs::read(format!("{prefix}bare.iso")).unwrap();
    assert!(!on_disk.is_empty());
}

#[test]
fn failed_build_commits_no_state() {
    init_tracing();
    let resource = UnattendIsoResource::with_builder(Arc::new(MockImageBuilder::failing()));

    let dir = tempfile::tempdir().unwrap();
    let prefix = format!("{}/", dir.path().display());

    let resp = resource.create(CreateRequest {
        plan: plan("a.iso", "<x/>", Some(prefix.clone())),
    });

    assert!(resp.state.is_none());
    assert!(resp.diagnostics.has_errors());
    let diag = resp.diagnostics.iter().next().unwrap();
    assert_eq!(diag.summary, "Build Error");

    // Nothing was written either.
    assert!(!std::path::Path::new(&format!("{prefix}a.iso")).exists());
}

#[test]
fn failed_write_commits_no_state() {
    init_tracing();
    let resource = mock_resource();

    let dir = tempfile::tempdir().unwrap();
    let prefix = format!("{}/no-such-subdir/", dir.path().display());

    let resp = resource.create(CreateRequest {
        plan: plan("a.iso", "<x/>", Some(prefix)),
    });

    assert!(resp.state.is_none());
    assert!(resp.diagnostics.has_errors());
    let diag = resp.diagnostics.iter().next().unwrap();
    assert_eq!(diag.summary, "I/O Error");
}

#[test]
fn read_is_a_passthrough_even_when_the_file_is_gone() {
    init_tracing();
    let resource = mock_resource();

    let dir = tempfile::tempdir().unwrap();
    let prefix = format!("{}/", dir.path().display());

    let created = resource
        .create(CreateRequest {
            plan: plan("a.iso", "<x/>", Some(prefix)),
        })
        .state
        .unwrap();

    // Remove the artifact out of band; read must not notice.
    std::fs::remove_file(created.result_path.as_deref().unwrap()).unwrap();

    let resp = resource.read(ReadRequest {
        state: created.clone(),
    });
    assert!(!resp.diagnostics.has_errors());
    assert_eq!(resp.state.as_ref(), Some(&created));
}

#[test]
fn update_with_changed_content_leaves_disk_unchanged() {
    init_tracing();
    let resource = mock_resource();

    let dir = tempfile::tempdir().unwrap();
    let prefix = format!("{}/", dir.path().display());

    let created = resource
        .create(CreateRequest {
            plan: plan("a.iso", "<original/>", Some(prefix)),
        })
        .state
        .unwrap();

    let path = created.result_path.clone().unwrap();
    let before = std::fs::read(&path).unwrap();

    // The host merges stable computed fields into the new plan.
    let mut new_plan = created.clone();
    new_plan.xml_content = "<changed/>".to_string();

    let resp = resource.update(UpdateRequest {
        plan: new_plan.clone(),
        prior_state: created,
    });

    assert!(!resp.diagnostics.has_errors());
    let state = resp.state.unwrap();
    assert_eq!(state, new_plan);

    // Regression guard: update does not regenerate the image. Flips if
    // content-aware regeneration is ever implemented.
    let after = std::fs::read(&path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn update_preserves_identifier_and_result_path() {
    init_tracing();
    let resource = mock_resource();

    let dir = tempfile::tempdir().unwrap();
    let prefix = format!("{}/", dir.path().display());

    let created = resource
        .create(CreateRequest {
            plan: plan("a.iso", "<x/>", Some(prefix)),
        })
        .state
        .unwrap();

    let mut new_plan = created.clone();
    new_plan.xml_content = "<changed/>".to_string();

    let state = resource
        .update(UpdateRequest {
            plan: new_plan,
            prior_state: created.clone(),
        })
        .state
        .unwrap();

    assert_eq!(state.id, created.id);
    assert_eq!(state.result_path, created.result_path);
}

#[test]
fn delete_forgets_state_but_keeps_the_artifact() {
    init_tracing();
    let resource = mock_resource();

    let dir = tempfile::tempdir().unwrap();
    let prefix = format!("{}/", dir.path().display());

    let created = resource
        .create(CreateRequest {
            plan: plan("a.iso", "<x/>", Some(prefix)),
        })
        .state
        .unwrap();

    let path = created.result_path.clone().unwrap();
    assert!(std::path::Path::new(&path).exists());

    let resp = resource.delete(DeleteRequest { state: created });
    assert!(!resp.diagnostics.has_errors());

    // Regression guard: delete only forgets tracked state.
    assert!(std::path::Path::new(&path).exists());
}

#[test]
fn import_then_read_round_trips_the_seeded_state() {
    init_tracing();
    let resource = mock_resource();

    let imported = resource
        .import_state(ImportStateRequest {
            id: "iso_01HV4Z2WQXKJNM8GPQY6VBKC3D".to_string(),
        })
        .state
        .unwrap();

    let resp = resource.read(ReadRequest {
        state: imported.clone(),
    });
    assert_eq!(resp.state.as_ref(), Some(&imported));
}

#[test]
fn host_flow_validates_and_defaults_declared_config() {
    init_tracing();
    let resource = mock_resource();
    let schema = resource.schema();

    // Structurally incomplete config never reaches the resource.
    let incomplete = json!({"file_name": "a.iso"});
    assert!(schema.validate(&incomplete).has_errors());

    // Complete config gets the wire default before dispatch.
    let mut config = json!({"file_name": "a.iso", "xml_content": "<x/>"});
    assert!(!schema.validate(&config).has_errors());
    schema.apply_defaults(&mut config);
    assert_eq!(config["path_override"], json!("tmp"));

    let model: UnattendFileModel = serde_json::from_value(config).unwrap();
    assert_eq!(model.path_override.as_deref(), Some("tmp"));
    assert_eq!(model.file_name, "a.iso");
}
