//! Integration boundary and trajectory recording.

use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4, Scratch, try_zeroed};
use crate::model::OdeSystem;

/// Integrator selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, most accurate, 4 rhs calls per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, faster, 1 rhs call per step).
    ForwardEuler,
}

/// Integrate `system` with classical RK4 across `time_points`.
///
/// `out` is a caller-owned, row-major buffer of `time_points.len() * y0.len()`
/// values. Row 0 receives `y0` verbatim and row `i` the state at
/// `time_points[i]`. Step sizes are taken from consecutive grid points; the
/// grid is trusted to be increasing and is not checked.
///
/// Fails with [`SimError::InvalidArg`] before touching `out` when the grid has
/// fewer than two points, the state is empty, or `out` has the wrong length.
pub fn integrate<S: OdeSystem + ?Sized>(
    system: &S,
    time_points: &[f64],
    y0: &[f64],
    out: &mut [f64],
) -> SimResult<()> {
    integrate_with(IntegratorType::RK4, system, time_points, y0, out)
}

/// Same as [`integrate`] with an explicit integrator choice.
pub fn integrate_with<S: OdeSystem + ?Sized>(
    integrator: IntegratorType,
    system: &S,
    time_points: &[f64],
    y0: &[f64],
    out: &mut [f64],
) -> SimResult<()> {
    match integrator {
        IntegratorType::RK4 => run(&RK4, system, time_points, y0, out),
        IntegratorType::ForwardEuler => run(&ForwardEuler, system, time_points, y0, out),
    }
}

fn run<I: Integrator, S: OdeSystem + ?Sized>(
    integrator: &I,
    system: &S,
    time_points: &[f64],
    y0: &[f64],
    out: &mut [f64],
) -> SimResult<()> {
    let n_points = time_points.len();
    let state_dim = y0.len();

    if n_points < 2 {
        return Err(SimError::InvalidArg {
            what: "time grid needs at least two points",
        });
    }
    if state_dim == 0 {
        return Err(SimError::InvalidArg {
            what: "state dimension must be positive",
        });
    }
    if n_points.checked_mul(state_dim) != Some(out.len()) {
        return Err(SimError::InvalidArg {
            what: "output buffer must hold n_points * state_dim values",
        });
    }

    let mut y = try_zeroed(state_dim)?;
    let mut scratch = Scratch::try_new(state_dim)?;

    debug!(
        integrator = integrator.name(),
        n_points,
        state_dim,
        rhs_calls = integrator.stages() * (n_points - 1),
        "integrating"
    );

    y.copy_from_slice(y0);
    let mut rows = out.chunks_exact_mut(state_dim);
    if let Some(first) = rows.next() {
        first.copy_from_slice(y0);
    }

    for (window, row) in time_points.windows(2).zip(rows) {
        let t = window[0];
        let dt = window[1] - window[0];
        integrator.step(system, t, dt, &mut y, &mut scratch);
        row.copy_from_slice(&y);
    }

    Ok(())
}

/// Owned record of an integration: time grid plus row-major states.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    time: Vec<f64>,
    states: Vec<f64>,
    state_dim: usize,
}

impl Trajectory {
    /// Allocate an output buffer and integrate `system` with RK4.
    pub fn simulate<S: OdeSystem + ?Sized>(
        system: &S,
        time_points: &[f64],
        y0: &[f64],
    ) -> SimResult<Self> {
        Self::simulate_with(IntegratorType::RK4, system, time_points, y0)
    }

    /// Allocate an output buffer and integrate with the chosen integrator.
    ///
    /// A buffer that cannot be reserved fails with [`SimError::ScratchAlloc`].
    pub fn simulate_with<S: OdeSystem + ?Sized>(
        integrator: IntegratorType,
        system: &S,
        time_points: &[f64],
        y0: &[f64],
    ) -> SimResult<Self> {
        let len = time_points
            .len()
            .checked_mul(y0.len())
            .ok_or(SimError::InvalidArg {
                what: "trajectory size overflows",
            })?;
        let mut states = try_zeroed(len)?;
        integrate_with(integrator, system, time_points, y0, &mut states)?;

        Ok(Self {
            time: time_points.to_vec(),
            states,
            state_dim: y0.len(),
        })
    }

    /// Number of recorded time points.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn state_dim(&self) -> usize {
        self.state_dim
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Flat row-major state buffer.
    pub fn states(&self) -> &[f64] {
        &self.states
    }

    /// State at time index `i`.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        let start = i.checked_mul(self.state_dim)?;
        let end = start.checked_add(self.state_dim)?;
        self.states.get(start..end)
    }

    /// Iterate over state rows in time order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.states.chunks_exact(self.state_dim)
    }

    /// Time series of state component `index`.
    pub fn series(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.state_dim {
            return None;
        }
        Some(self.rows().map(|row| row[index]).collect())
    }

    /// Last recorded state.
    pub fn final_state(&self) -> &[f64] {
        let start = self.states.len() - self.state_dim;
        &self.states[start..]
    }

    /// Split into `(time, states, state_dim)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, usize) {
        (self.time, self.states, self.state_dim)
    }
}
