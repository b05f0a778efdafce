mod descriptor;
mod error;
mod registry;

pub use descriptor::{CaptureDescriptor, PredicateRef};
pub use error::{CaptureError, CaptureResult};
pub use registry::{CaptureRegistry, CaptureWalk};
