//! Resource lifecycle interface.
//!
//! One trait method per lifecycle operation, dispatched by the host with
//! typed snapshots. The host owns state persistence: it stores whatever
//! model a response carries and forgets state when a delete response comes
//! back clean. A response that carries no state commits nothing, which is
//! what makes a failed create all-or-nothing.

use crate::diagnostics::Diagnostics;
use crate::schema::Schema;

/// Request to configure a resource with provider-level data.
#[derive(Debug, Clone, Default)]
pub struct ConfigureRequest {
    /// Data from the provider's own configure step. Absent when the host
    /// configures resources before the provider itself, so implementations
    /// must not fail on `None`.
    pub provider_data: Option<serde_json::Value>,
}

/// Response from a configure call.
#[derive(Debug, Clone, Default)]
pub struct ConfigureResponse {
    /// Diagnostics for the host.
    pub diagnostics: Diagnostics,
}

/// Request to create a resource from a declared plan.
#[derive(Debug, Clone)]
pub struct CreateRequest<M> {
    /// The declared configuration snapshot, defaults already applied.
    pub plan: M,
}

/// Response from a create call.
#[derive(Debug, Clone)]
pub struct CreateResponse<M> {
    /// Full post-create state, or `None` if the operation failed.
    pub state: Option<M>,
    /// Diagnostics for the host.
    pub diagnostics: Diagnostics,
}

impl<M> Default for CreateResponse<M> {
    fn default() -> Self {
        Self {
            state: None,
            diagnostics: Diagnostics::new(),
        }
    }
}

/// Request to refresh a resource from prior tracked state.
#[derive(Debug, Clone)]
pub struct ReadRequest<M> {
    /// State tracked by the host from the previous operation.
    pub state: M,
}

/// Response from a read call.
#[derive(Debug, Clone)]
pub struct ReadResponse<M> {
    /// Refreshed state, or `None` to tell the host the resource is gone.
    pub state: Option<M>,
    /// Diagnostics for the host.
    pub diagnostics: Diagnostics,
}

impl<M> Default for ReadResponse<M> {
    fn default() -> Self {
        Self {
            state: None,
            diagnostics: Diagnostics::new(),
        }
    }
}

/// Request to update a resource toward a new declared plan.
#[derive(Debug, Clone)]
pub struct UpdateRequest<M> {
    /// The new declared configuration, merged with stable computed fields.
    pub plan: M,
    /// State tracked from before this update.
    pub prior_state: M,
}

/// Response from an update call.
#[derive(Debug, Clone)]
pub struct UpdateResponse<M> {
    /// Post-update state, or `None` if the operation failed.
    pub state: Option<M>,
    /// Diagnostics for the host.
    pub diagnostics: Diagnostics,
}

impl<M> Default for UpdateResponse<M> {
    fn default() -> Self {
        Self {
            state: None,
            diagnostics: Diagnostics::new(),
        }
    }
}

/// Request to delete a resource.
#[derive(Debug, Clone)]
pub struct DeleteRequest<M> {
    /// State tracked by the host.
    pub state: M,
}

/// Response from a delete call.
///
/// The host forgets tracked state when this comes back without errors.
#[derive(Debug, Clone, Default)]
pub struct DeleteResponse {
    /// Diagnostics for the host.
    pub diagnostics: Diagnostics,
}

/// Request to import an externally created resource by identifier.
#[derive(Debug, Clone)]
pub struct ImportStateRequest {
    /// Externally supplied identifier, treated as opaque.
    pub id: String,
}

/// Response from an import call.
#[derive(Debug, Clone)]
pub struct ImportStateResponse<M> {
    /// Seeded state, or `None` if the import was rejected.
    pub state: Option<M>,
    /// Diagnostics for the host.
    pub diagnostics: Diagnostics,
}

impl<M> Default for ImportStateResponse<M> {
    fn default() -> Self {
        Self {
            state: None,
            diagnostics: Diagnostics::new(),
        }
    }
}

/// A declaratively managed resource.
///
/// Implementations are single concrete types; the host dispatches each
/// lifecycle operation exactly once per reconciliation pass and never
/// overlaps operations on the same declaration.
pub trait Resource {
    /// Typed configuration and state snapshot for this resource.
    type Model;

    /// Wire type name, composed from the provider's type name.
    fn type_name(&self, provider_type_name: &str) -> String;

    /// Attribute schema for this resource.
    fn schema(&self) -> Schema;

    /// Receives provider-level data. Must tolerate `provider_data: None`.
    fn configure(&mut self, req: ConfigureRequest) -> ConfigureResponse;

    /// Creates the resource from a declared plan.
    fn create(&self, req: CreateRequest<Self::Model>) -> CreateResponse<Self::Model>;

    /// Refreshes tracked state.
    fn read(&self, req: ReadRequest<Self::Model>) -> ReadResponse<Self::Model>;

    /// Converges the resource toward a changed plan.
    fn update(&self, req: UpdateRequest<Self::Model>) -> UpdateResponse<Self::Model>;

    /// Tears down tracking for the resource.
    fn delete(&self, req: DeleteRequest<Self::Model>) -> DeleteResponse;

    /// Seeds state for a resource created outside the host.
    fn import_state(&self, req: ImportStateRequest) -> ImportStateResponse<Self::Model>;
}
