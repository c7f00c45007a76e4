//! CLI command implementations.

mod axes;
mod registry;
mod resolve;

pub use axes::{describe_face, list_axes};
pub use registry::{describe_axis, print_registry};
pub use resolve::{describe_instance, resolve};
