//! Core data structures.
//!
//! - Version discovery from the info header
//! - Extension descriptors
//! - Package metadata
//! - Host platform identification

pub mod extension;
pub mod metadata;
pub mod platform;
pub mod version;

pub use extension::ExtensionDescriptor;
pub use metadata::PackageMetadata;
pub use platform::HostOs;
pub use version::{read_version, VersionString};
