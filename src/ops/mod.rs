//! High-level operations.
//!
//! This module contains the implementation of the tttrlib-build commands.

pub mod docs;
pub mod doctor;
pub mod setup;

pub use docs::{DocOutcome, DocsOptions, DocumentationGenerator};
pub use doctor::{doctor, format_report, CheckResult, DoctorReport};
pub use setup::{Distribution, PackagingDriver, SetupOptions, SetupReport, Stage, BUILD_EXT};
