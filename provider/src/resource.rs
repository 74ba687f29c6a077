//! The unattend ISO file resource.
//!
//! Lifecycle controller for one declaratively managed image: validates
//! nothing itself (the schema layer already has), builds the image,
//! resolves where it goes, persists it, and hands identifying state back
//! to the host.
//!
//! Two behaviors are deliberate and pinned by tests rather than fixed:
//!
//! - `read` and `update` are passthroughs. Neither stats the file on disk
//!   nor regenerates the image, so out-of-band deletions and changed
//!   declarations are not reconciled onto disk after creation.
//! - `delete` forgets tracked state without removing the image file.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use unattend_id::IsoFileId;
use unattend_plugin::diagnostics::Diagnostics;
use unattend_plugin::resource::{
    ConfigureRequest, ConfigureResponse, CreateRequest, CreateResponse, DeleteRequest,
    DeleteResponse, ImportStateRequest, ImportStateResponse, ReadRequest, ReadResponse, Resource,
    UpdateRequest, UpdateResponse,
};
use unattend_plugin::schema::{Attribute, Schema};

use crate::config::Config;
use crate::dest::{self, Destination};
use crate::image::{volume_label, FileEntry, ImageBuilder, MkisofsImageBuilder};
use crate::write;

/// Name of the answer file embedded in every generated image.
pub const ANSWER_FILE_NAME: &str = "unattend.xml";

/// Declared configuration and tracked state for one managed image.
///
/// Field names are the wire contract with the host. `id` and
/// `result_path` are computed at creation and carried forward unchanged
/// afterwards; `path_override` is absent when the user wants the OS temp
/// mechanism.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnattendFileModel {
    /// Identifier assigned at creation; the reconciliation key.
    #[serde(default)]
    pub id: Option<String>,

    /// Base name of the image file to produce.
    #[serde(default)]
    pub file_name: String,

    /// Directory prefix to write under; `None` selects the OS temp
    /// mechanism.
    #[serde(default)]
    pub path_override: Option<String>,

    /// Payload written into the image as `unattend.xml`. Empty produces an
    /// image with no embedded file.
    #[serde(default)]
    pub xml_content: String,

    /// Path the image was actually written to.
    #[serde(default)]
    pub result_path: Option<String>,
}

/// Lifecycle controller for the unattend ISO file resource.
pub struct UnattendIsoResource {
    builder: Arc<dyn ImageBuilder>,
}

impl UnattendIsoResource {
    /// Production resource with a PATH-discovered encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_builder(Arc::new(MkisofsImageBuilder::new()))
    }

    /// Resource honoring the provider configuration's encoder override.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let builder = match &config.iso_tool {
            Some(tool) => MkisofsImageBuilder::with_tool(tool),
            None => MkisofsImageBuilder::new(),
        };
        Self::with_builder(Arc::new(builder))
    }

    /// Resource with an explicit image builder (tests, development).
    #[must_use]
    pub fn with_builder(builder: Arc<dyn ImageBuilder>) -> Self {
        Self { builder }
    }

    /// Entries embedded in the image: `unattend.xml` iff the payload is
    /// non-empty.
    fn entries(xml_content: &str) -> Vec<FileEntry> {
        if xml_content.is_empty() {
            Vec::new()
        } else {
            vec![FileEntry::new(ANSWER_FILE_NAME, xml_content.as_bytes())]
        }
    }
}

impl Default for UnattendIsoResource {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource for UnattendIsoResource {
    type Model = UnattendFileModel;

    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_iso_file")
    }

    fn schema(&self) -> Schema {
        Schema::new("Generated ISO-9660 image carrying an unattended-installation answer file.")
            .attribute(
                "path_override",
                Attribute::optional_with_default(
                    "Path to write the local ISO file, defaults to OS temp",
                    json!("tmp"),
                ),
            )
            .attribute("file_name", Attribute::required("Name for the created ISO file"))
            .attribute(
                "xml_content",
                Attribute::required("XML content for the unattend.xml file"),
            )
            .attribute("id", Attribute::computed("ISO identifier").stable())
            .attribute("result_path", Attribute::computed("Resultant file path").stable())
    }

    fn configure(&mut self, req: ConfigureRequest) -> ConfigureResponse {
        // Nothing to wire up; the host may call this before the provider
        // is configured, with no data at all.
        if req.provider_data.is_none() {
            debug!("Configured without provider data");
        }
        ConfigureResponse::default()
    }

    /// Builds the image, resolves the destination, persists the bytes, and
    /// records `id` and `result_path`. State is committed only if every
    /// step succeeds; any failure leaves the declaration unmanaged so the
    /// next apply starts a fresh create.
    fn create(&self, req: CreateRequest<Self::Model>) -> CreateResponse<Self::Model> {
        let mut resp = CreateResponse::default();
        let mut data = req.plan;

        let volume = volume_label(&data.file_name);
        let image = match self.builder.build(&volume, &Self::entries(&data.xml_content)) {
            Ok(image) => image,
            Err(e) => {
                resp.diagnostics
                    .add_error("Build Error", format!("unable to build ISO image: {e}"));
                return resp;
            }
        };

        let destination = Destination::from_wire(data.path_override.as_deref());
        let path = match dest::resolve(&destination, &data.file_name) {
            Ok(path) => path,
            Err(e) => {
                resp.diagnostics.add_error(
                    "I/O Error",
                    format!("unable to resolve destination path: {e}"),
                );
                return resp;
            }
        };

        if let Err(e) = write::write_image(&path, &image) {
            resp.diagnostics
                .add_error("I/O Error", format!("unable to persist ISO image: {e}"));
            return resp;
        }

        let id = IsoFileId::new();
        data.id = Some(id.to_string());
        data.result_path = Some(path.display().to_string());

        info!(
            id = %id,
            path = %path.display(),
            bytes = image.len(),
            "Created unattend ISO image"
        );

        resp.state = Some(data);
        resp
    }

    /// Re-emits tracked state unchanged.
    ///
    /// The image file is not stat'ed, so drift between disk and tracked
    /// state goes undetected: a file removed out of band is still reported
    /// as present.
    fn read(&self, req: ReadRequest<Self::Model>) -> ReadResponse<Self::Model> {
        debug!(
            id = req.state.id.as_deref().unwrap_or(""),
            "Read passthrough"
        );
        ReadResponse {
            state: Some(req.state),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Re-emits the host-merged plan without touching the filesystem.
    ///
    /// A changed `xml_content` or `file_name` is not reflected in the
    /// on-disk image; only create writes bytes. Stable computed fields
    /// (`id`, `result_path`) arrive already merged into the plan.
    fn update(&self, req: UpdateRequest<Self::Model>) -> UpdateResponse<Self::Model> {
        debug!(
            id = req.plan.id.as_deref().unwrap_or(""),
            "Update passthrough, image not regenerated"
        );
        UpdateResponse {
            state: Some(req.plan),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Forgets tracked state only; the image file stays on disk.
    fn delete(&self, req: DeleteRequest<Self::Model>) -> DeleteResponse {
        info!(
            id = req.state.id.as_deref().unwrap_or(""),
            result_path = req.state.result_path.as_deref().unwrap_or(""),
            "Forgetting unattend ISO image, file left on disk"
        );
        DeleteResponse::default()
    }

    /// Seeds state with the supplied identifier only. The remaining fields
    /// stay unset until some later reconciliation fills them.
    fn import_state(&self, req: ImportStateRequest) -> ImportStateResponse<Self::Model> {
        let mut resp = ImportStateResponse::default();

        if req.id.is_empty() {
            resp.diagnostics.add_error(
                "Configuration Error",
                "import identifier must not be empty",
            );
            return resp;
        }

        resp.state = Some(UnattendFileModel {
            id: Some(req.id),
            ..UnattendFileModel::default()
        });
        resp
    }
}
