//! Policy domain: input edges and errors.

pub mod edge;
pub mod errors;

pub use edge::{EdgeDetector, InputLevel};
pub use errors::PolicyError;
