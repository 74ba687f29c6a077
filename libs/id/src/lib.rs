//! # unattend-id
//!
//! Typed identifier for resources managed by the unattend-iso provider.
//!
//! ## Design Principles
//!
//! - Identifiers are system-generated at creation time and stable thereafter
//! - Every identifier has a canonical string form with strict parsing
//! - Identifiers round-trip through serialization (parse → format → parse)
//! - The prefix encodes the resource type, so identifiers of different
//!   resources cannot be mixed up silently
//!
//! ## Format
//!
//! `{prefix}_{ulid}`, e.g. `iso_01HV4Z2WQXKJNM8GPQY6VBKC3D`.
//!
//! The ULID body gives time-ordered sortability and 80 bits of randomness,
//! which is what makes repeated creations on the same host collision-free
//! without any coordination.

mod error;
mod macros;
mod types;

pub use error::IdError;
pub use types::*;

/// Re-export ulid for consumers that need raw ULID operations
pub use ulid::Ulid;
