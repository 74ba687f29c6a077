//! Provider registration and bootstrap.

use unattend_plugin::provider::{
    Provider, ProviderConfigureRequest, ProviderConfigureResponse,
};
use unattend_plugin::schema::Schema;

use crate::config::Config;
use crate::resource::UnattendIsoResource;

/// Wire type-name prefix for every resource of this provider.
const PROVIDER_TYPE_NAME: &str = "unattend";

/// The unattend provider.
///
/// Groups the ISO file resource under the `unattend` type name and carries
/// the version stamp set at release time ("dev" for local builds, "test"
/// under acceptance testing).
pub struct UnattendProvider {
    version: String,
    config: Config,
}

impl UnattendProvider {
    /// Creates the provider with a version stamp.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            config: Config::from_env(),
        }
    }

    /// Creates the provider with explicit configuration (tests).
    pub fn with_config(version: impl Into<String>, config: Config) -> Self {
        Self {
            version: version.into(),
            config,
        }
    }

    /// Constructs every resource this provider serves.
    #[must_use]
    pub fn resources(&self) -> Vec<UnattendIsoResource> {
        vec![UnattendIsoResource::from_config(&self.config)]
    }
}

impl Provider for UnattendProvider {
    fn type_name(&self) -> &str {
        PROVIDER_TYPE_NAME
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn schema(&self) -> Schema {
        // No provider-level attributes.
        Schema::new("Generates local unattended-installation ISO images.")
    }

    fn configure(&mut self, _req: ProviderConfigureRequest) -> ProviderConfigureResponse {
        // Nothing to configure; absent config is fine and resources get no
        // provider data.
        ProviderConfigureResponse::default()
    }
}
