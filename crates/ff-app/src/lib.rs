//! Application service layer for fermflow.
//!
//! Runs simulation requests in batch or fed-batch mode and packages the
//! trajectories for JSON clients: preset lookup, request resolution, parallel
//! sweeps and result queries.

pub mod error;
pub mod preset_service;
pub mod query;
pub mod run_service;
pub mod sweep;

pub use error::{AppError, AppResult};
pub use preset_service::{get_preset, list_microbes, list_substrates};
pub use query::{RunSummary, state_variables, summarize};
pub use run_service::{
    RunMeta, RunMode, RunResponse, StateSeries, run_simulation, run_simulation_with,
};
pub use sweep::{run_sweep, run_sweep_with};
