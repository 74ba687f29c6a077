//! Provider registration interface.
//!
//! A provider groups resources under a wire type-name prefix and carries a
//! version stamp set at build or release time.

use crate::diagnostics::Diagnostics;
use crate::schema::Schema;

/// Request to configure the provider itself.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfigureRequest {
    /// User-declared provider configuration. Absent when the host probes
    /// the provider without configuration, so implementations must not
    /// fail on `None`.
    pub config: Option<serde_json::Value>,
}

/// Response from a provider configure call.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfigureResponse {
    /// Data handed to each resource's configure step.
    pub provider_data: Option<serde_json::Value>,
    /// Diagnostics for the host.
    pub diagnostics: Diagnostics,
}

/// A resource provider known to the host.
pub trait Provider {
    /// Wire type-name prefix for all resources of this provider.
    fn type_name(&self) -> &str;

    /// Version stamp ("dev" for local builds).
    fn version(&self) -> &str;

    /// Provider-level attribute schema.
    fn schema(&self) -> Schema;

    /// Applies provider-level configuration. Must tolerate `config: None`.
    fn configure(&mut self, req: ProviderConfigureRequest) -> ProviderConfigureResponse;
}
