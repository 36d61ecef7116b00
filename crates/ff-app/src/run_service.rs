//! Run execution service.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use ff_kinetics::FermentationModel;
use ff_kinetics::state::STATE_NAMES;
use ff_project::{PresetCatalog, SimulationRequest};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Model variant to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Fixed volume, 5 states `[X, S, P, DO, T]`.
    #[default]
    Batch,
    /// Fed volume, 6 states `[X, S, P, DO, T, V]`.
    FedBatch,
}

impl RunMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RunMode::Batch => "batch",
            RunMode::FedBatch => "fed_batch",
        }
    }

    pub fn state_dim(self) -> usize {
        match self {
            RunMode::Batch => ff_kinetics::state::SIMPLE_DIM,
            RunMode::FedBatch => ff_kinetics::state::EXTENDED_DIM,
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "batch" => Ok(RunMode::Batch),
            "fed_batch" => Ok(RunMode::FedBatch),
            other => Err(AppError::InvalidInput(format!(
                "unsupported mode '{other}', expected batch or fed_batch"
            ))),
        }
    }
}

/// Run metadata echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMeta {
    pub mode: RunMode,
    pub n_points: usize,
    pub state_dim: usize,
    /// Request after preset merge with defaults filled in.
    pub request: SimulationRequest,
    pub elapsed_s: f64,
}

/// One state variable over the run. Non-finite samples are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSeries {
    pub name: &'static str,
    pub values: Vec<Option<f64>>,
}

/// Packaged trajectory, serialized as `{meta, time, states}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResponse {
    pub meta: RunMeta,
    pub time: Vec<f64>,
    #[serde(serialize_with = "serialize_states")]
    pub states: Vec<StateSeries>,
}

// States serialize as an object keyed by name, in state index order.
fn serialize_states<S: Serializer>(
    states: &[StateSeries],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(states.len()))?;
    for series in states {
        map.serialize_entry(series.name, &series.values)?;
    }
    map.end()
}

impl RunResponse {
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Series for state `name` (`"X"`, `"S"`, `"P"`, `"DO"`, `"T"` or `"V"`).
    pub fn series(&self, name: &str) -> Option<&[Option<f64>]> {
        self.states
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.values.as_slice())
    }

    /// Last sample of state `name`, `None` if absent or non-finite.
    pub fn final_value(&self, name: &str) -> Option<f64> {
        self.series(name)?.last().copied().flatten()
    }

    /// Number of non-finite samples across all states.
    pub fn non_finite_count(&self) -> usize {
        self.states
            .iter()
            .map(|s| s.values.iter().filter(|v| v.is_none()).count())
            .sum()
    }
}

/// Run `request` with the built-in preset catalog.
pub fn run_simulation(request: &SimulationRequest, mode: RunMode) -> AppResult<RunResponse> {
    let catalog = PresetCatalog::builtin()?;
    run_simulation_with(&catalog, request, mode)
}

/// Merge presets, resolve, integrate and package one request.
pub fn run_simulation_with(
    catalog: &PresetCatalog,
    request: &SimulationRequest,
    mode: RunMode,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    info!(
        mode = mode.as_str(),
        microbe_id = request.microbe_id.as_deref().unwrap_or("-"),
        substrate_id = request.substrate_id.as_deref().unwrap_or("-"),
        "simulation start"
    );

    let merged = catalog.merge_request(request);
    let resolved = merged.resolve()?;
    let time = resolved.grid.points()?;

    let model = match mode {
        RunMode::Batch => FermentationModel::simple(resolved.params, resolved.ops),
        RunMode::FedBatch => FermentationModel::extended(resolved.params, resolved.ops),
    };
    let state_dim = model.state_dim();
    let y0 = resolved.initial.to_vec(state_dim);
    let trajectory = model.simulate(&time, &y0)?;

    let states = STATE_NAMES[..state_dim]
        .iter()
        .enumerate()
        .map(|(i, &name)| StateSeries {
            name,
            values: trajectory
                .rows()
                .map(|row| Some(row[i]).filter(|v| v.is_finite()))
                .collect(),
        })
        .collect();

    let response = RunResponse {
        meta: RunMeta {
            mode,
            n_points: time.len(),
            state_dim,
            request: merged.with_defaults(),
            elapsed_s: started.elapsed().as_secs_f64(),
        },
        time,
        states,
    };

    let non_finite = response.non_finite_count();
    if non_finite > 0 {
        warn!(
            mode = mode.as_str(),
            non_finite, "trajectory contains non-finite values"
        );
    }
    info!(
        mode = mode.as_str(),
        n_points = response.meta.n_points,
        elapsed_s = response.meta.elapsed_s,
        "simulation finished"
    );

    Ok(response)
}
