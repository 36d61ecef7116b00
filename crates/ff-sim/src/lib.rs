//! Fixed-step ODE integration for fermflow.
//!
//! Provides:
//! - `OdeSystem` capability for pluggable right-hand sides
//! - Fixed-step RK4 integrator (plus forward Euler for quick comparisons)
//! - `integrate` boundary writing into a caller-owned row-major buffer
//! - Owned `Trajectory` convenience wrapper

pub mod error;
pub mod integrator;
pub mod model;
pub mod sim;

// Re-exports for public API
pub use error::{SimError, SimResult, status_code};
pub use integrator::{ForwardEuler, Integrator, RK4, Scratch};
pub use model::OdeSystem;
pub use sim::{IntegratorType, Trajectory, integrate, integrate_with};
