//! ff-core: stable foundation for fermflow.
//!
//! Contains:
//! - numeric (Real + tolerances + float floors + grids)
//! - error (shared error types)

pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
