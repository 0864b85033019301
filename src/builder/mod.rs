//! Native extension build.
//!
//! [`plan`] decides the CMake arguments for the host; [`cmake`] runs the
//! configure and build steps.

pub mod cmake;
pub mod plan;

pub use cmake::{BuildInputs, CMakeBuilder, ExtensionHandler};
pub use plan::{BuildConfiguration, BuildMode, BuildPlanner};
