//! Plugin scaffolding for declarative resource providers.
//!
//! This library is the binding surface between a host orchestration engine
//! and a resource implementation. It carries no resource logic of its own.
//! Key concepts:
//!
//! - **Diagnostics**: operation-scoped, host-visible error and warning
//!   reports. A failed operation never panics or aborts the process; it
//!   attaches diagnostics to its response and returns.
//! - **Schema**: declarative attribute metadata (required / optional /
//!   computed / defaults). Required-field enforcement happens here, at the
//!   host boundary, so resource implementations do not re-validate.
//! - **Resource**: one trait method per lifecycle operation, with typed
//!   request and response snapshots. The host persists whatever state a
//!   response carries; a response with no state commits nothing.
//!
//! # Invariants
//!
//! - Responses are all-or-nothing: state is either the full post-operation
//!   snapshot or absent.
//! - `Provider::configure` tolerates absent provider data.

pub mod diagnostics;
pub mod provider;
pub mod resource;
pub mod schema;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use provider::{Provider, ProviderConfigureRequest, ProviderConfigureResponse};
pub use resource::{
    ConfigureRequest, ConfigureResponse, CreateRequest, CreateResponse, DeleteRequest,
    DeleteResponse, ImportStateRequest, ImportStateResponse, ReadRequest, ReadResponse, Resource,
    UpdateRequest, UpdateResponse,
};
pub use schema::{Attribute, Schema};
