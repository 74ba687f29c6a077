//! Unattend ISO provider library.
//!
//! Manages a single declarative resource: a locally generated ISO-9660
//! image that carries an unattended-installation answer file
//! (`unattend.xml`). The host orchestration engine declares the desired
//! file name, destination, and XML payload; the provider converges on-disk
//! state to match and reports identifying state back.
//!
//! ## Architecture
//!
//! ```text
//! UnattendProvider                 (registration, version stamp)
//! └── UnattendIsoResource          (lifecycle controller)
//!     ├── image::ImageBuilder      (ISO-9660 construction, trait + mock)
//!     ├── dest::resolve            (destination path resolution)
//!     └── write::write_image       (best-effort persistence)
//! ```
//!
//! ## Modules
//!
//! - `config`: environment-driven provider configuration
//! - `image`: ISO-9660 image construction behind an external encoder
//! - `dest`: destination path resolution, temp-dir mechanism included
//! - `write`: image persistence
//! - `resource`: the lifecycle controller and its data model
//! - `provider`: provider registration and bootstrap

pub mod config;
pub mod dest;
pub mod image;
pub mod provider;
pub mod resource;
pub mod write;

// Re-export commonly used types
pub use image::{BuildError, FileEntry, ImageBuilder, MkisofsImageBuilder, MockImageBuilder};
pub use provider::UnattendProvider;
pub use resource::{UnattendFileModel, UnattendIsoResource, ANSWER_FILE_NAME};
