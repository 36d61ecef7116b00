//! Parallel execution of independent requests.

use ff_project::{PresetCatalog, SimulationRequest};
use rayon::prelude::*;
use tracing::info;

use crate::error::AppResult;
use crate::run_service::{RunMode, RunResponse, run_simulation_with};

/// Run every request with the built-in presets; results keep input order.
///
/// Fails only if the preset catalog cannot be loaded. Per-request failures
/// are reported in place.
pub fn run_sweep(
    requests: &[SimulationRequest],
    mode: RunMode,
) -> AppResult<Vec<AppResult<RunResponse>>> {
    let catalog = PresetCatalog::builtin()?;
    Ok(run_sweep_with(&catalog, requests, mode))
}

pub fn run_sweep_with(
    catalog: &PresetCatalog,
    requests: &[SimulationRequest],
    mode: RunMode,
) -> Vec<AppResult<RunResponse>> {
    info!(
        mode = mode.as_str(),
        runs = requests.len(),
        threads = rayon::current_num_threads(),
        "sweep start"
    );
    requests
        .par_iter()
        .map(|request| run_simulation_with(catalog, request, mode))
        .collect()
}
