//! Query helpers for run responses and variable metadata.

use ff_kinetics::StateVariable;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::run_service::{RunMode, RunResponse};

/// Name, label and unit of each state reported by `mode`.
pub fn state_variables(mode: RunMode) -> &'static [StateVariable] {
    ff_kinetics::state_variables(mode.state_dim())
}

/// Time range and end-of-run values of a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub mode: RunMode,
    pub time_range: (f64, f64),
    pub n_points: usize,
    /// `(name, final value)` per state; `None` where the run diverged.
    pub final_values: Vec<(&'static str, Option<f64>)>,
    pub non_finite: usize,
}

pub fn summarize(response: &RunResponse) -> AppResult<RunSummary> {
    let (Some(&t_min), Some(&t_max)) = (response.time.first(), response.time.last()) else {
        return Err(AppError::InvalidInput("No time points in run".to_string()));
    };

    let final_values = response
        .states
        .iter()
        .map(|s| (s.name, s.values.last().copied().flatten()))
        .collect();

    Ok(RunSummary {
        mode: response.meta.mode,
        time_range: (t_min, t_max),
        n_points: response.time.len(),
        final_values,
        non_finite: response.non_finite_count(),
    })
}
