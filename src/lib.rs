//! tttrlib-build - build orchestration for the tttrlib Python extension
//!
//! This crate drives the native build of tttrlib's SWIG-generated Python
//! module: it reads the library version from the C++ info header, generates
//! the SWIG documentation bridge with doxygen and doxy2swig when it is
//! missing, and runs an out-of-tree CMake configure and build.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a recording process executor and source-tree
/// fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{ExtensionDescriptor, HostOs, PackageMetadata, VersionString};
pub use builder::{BuildConfiguration, BuildMode, BuildPlanner, CMakeBuilder};
pub use ops::{PackagingDriver, SetupOptions, SetupReport};
pub use util::context::GlobalContext;
pub use util::errors::SetupError;
