//! Binding of the fermentation derivative to the RK4 integrator.

use ff_sim::{OdeSystem, SimError, SimResult, Trajectory};
use tracing::debug;

use crate::kinetics::{KineticRates, derivative, rates};
use crate::params::{KineticParams, OperatingConditions};
use crate::state::SIMPLE_DIM;
use crate::terms::ModelTerms;

/// Parameters, operating conditions and term switches for one integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FermentationModel {
    params: KineticParams,
    ops: OperatingConditions,
    terms: ModelTerms,
}

impl FermentationModel {
    pub fn new(params: KineticParams, ops: OperatingConditions, terms: ModelTerms) -> Self {
        Self { params, ops, terms }
    }

    /// Fed-batch model with state `[X, S, P, DO, T, V]`.
    pub fn extended(params: KineticParams, ops: OperatingConditions) -> Self {
        Self::new(params, ops, ModelTerms::extended())
    }

    /// Batch model with state `[X, S, P, DO, T]` at fixed volume.
    pub fn simple(params: KineticParams, ops: OperatingConditions) -> Self {
        Self::new(params, ops, ModelTerms::simple())
    }

    pub fn params(&self) -> &KineticParams {
        &self.params
    }

    pub fn operating_conditions(&self) -> &OperatingConditions {
        &self.ops
    }

    pub fn terms(&self) -> &ModelTerms {
        &self.terms
    }

    pub fn state_dim(&self) -> usize {
        self.terms.state_dim()
    }

    /// Intermediate rates at `(t, y)`, or `None` if `y` is the wrong length.
    pub fn rates(&self, t: f64, y: &[f64]) -> Option<KineticRates> {
        if y.len() != self.state_dim() {
            return None;
        }
        Some(rates(t, y, &self.params, &self.ops, &self.terms))
    }

    /// Integrate over `time_points` into an owned [`Trajectory`].
    ///
    /// `y0` must match [`state_dim`](Self::state_dim).
    pub fn simulate(&self, time_points: &[f64], y0: &[f64]) -> SimResult<Trajectory> {
        self.check_initial(y0)?;
        debug!(
            state_dim = self.state_dim(),
            feed_mode = self.ops.feed_mode.as_str(),
            "fermentation simulation"
        );
        Trajectory::simulate(self, time_points, y0)
    }

    fn check_initial(&self, y0: &[f64]) -> SimResult<()> {
        if y0.len() != self.state_dim() {
            return Err(SimError::InvalidArg {
                what: "initial state does not match model dimension",
            });
        }
        Ok(())
    }

    /// Integrate over `time_points` into the caller-owned `out` buffer.
    ///
    /// `y0` must match [`state_dim`](Self::state_dim); everything else is
    /// checked by [`ff_sim::integrate`].
    pub fn integrate(&self, time_points: &[f64], y0: &[f64], out: &mut [f64]) -> SimResult<()> {
        self.check_initial(y0)?;
        debug!(
            state_dim = self.state_dim(),
            feed_mode = self.ops.feed_mode.as_str(),
            "fermentation integration"
        );
        ff_sim::integrate(self, time_points, y0, out)
    }
}

impl OdeSystem for FermentationModel {
    /// States shorter than the batch layout have no derivative; every entry
    /// of `dydt` becomes NaN. A 6-state model given 5 states runs at the
    /// fixed `ops.volume`.
    fn rhs(&self, t: f64, y: &[f64], dydt: &mut [f64]) {
        if y.len() < SIMPLE_DIM || dydt.len() < SIMPLE_DIM {
            dydt.fill(f64::NAN);
            return;
        }
        derivative(t, y, &self.params, &self.ops, &self.terms, dydt);
    }
}

/// Integrate the 6-state fed-batch model.
///
/// `out` holds `time_points.len() * 6` values in row-major order. See
/// [`ff_sim::status_code`] for the numeric outcome.
pub fn integrate_fermentation(
    time_points: &[f64],
    y0: &[f64],
    params: &KineticParams,
    ops: &OperatingConditions,
    out: &mut [f64],
) -> SimResult<()> {
    FermentationModel::extended(*params, *ops).integrate(time_points, y0, out)
}
