//! Logical types: markers, descriptors and the process-wide registry.

pub mod descriptor;
pub mod marker;
pub mod registry;

pub use descriptor::TypeDescriptor;
pub use marker::{ArrayKind, TypeMarker};
pub use registry::{Registry, bootstrap, freeze, global};
