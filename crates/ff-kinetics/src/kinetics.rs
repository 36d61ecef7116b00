//! Fermentation right-hand side.
//!
//! Monod growth limited by substrate and dissolved oxygen, optional Q10
//! temperature scaling and product inhibition, oxygen transfer from a
//! corrected kLa, and a jacketed heat balance. Concentrations and volume are
//! floored before use so the derivative never divides by zero.

use ff_core::floor_positive;

use crate::feed::feed_rate;
use crate::params::{KineticParams, OperatingConditions};
use crate::state::{DO, P, S, T, V, X};
use crate::terms::ModelTerms;

const CONC_FLOOR: f64 = 1e-8;
const VOLUME_FLOOR: f64 = 1e-6;

/// Intermediate rates at one point of the trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KineticRates {
    /// Specific growth rate (1/h).
    pub mu: f64,
    /// Feed rate (L/h).
    pub feed: f64,
    /// Dilution rate `feed / V` (1/h).
    pub dilution: f64,
    /// Volume used by the balances (L).
    pub volume: f64,
    /// Effective kLa (1/h).
    pub kla: f64,
    /// Oxygen transfer rate (g/L/h).
    pub otr: f64,
    /// Oxygen uptake rate (g/L/h).
    pub our: f64,
    /// Reaction heat (W-equivalent units of the parameter set).
    pub q_gen: f64,
    /// Jacket heat removal.
    pub q_loss: f64,
    /// Agitation heat.
    pub q_agit: f64,
}

/// Evaluate the intermediate rates at `(t, y)`.
///
/// `y` holds at least the five concentration/temperature states. `V` is read
/// only when `terms.volume_dynamics` is set and `y` carries it; otherwise
/// `ops.volume` is used.
pub fn rates(
    t: f64,
    y: &[f64],
    params: &KineticParams,
    ops: &OperatingConditions,
    terms: &ModelTerms,
) -> KineticRates {
    let x = y[X];
    let p = y[P];
    let temp = y[T];
    let s_safe = floor_positive(y[S], CONC_FLOOR);
    let do_safe = floor_positive(y[DO], CONC_FLOOR);
    let raw_volume = match y.get(V) {
        Some(&v) if terms.volume_dynamics => v,
        _ => ops.volume,
    };
    let volume = floor_positive(raw_volume, VOLUME_FLOOR);

    let temp_factor = if terms.temperature_dependence {
        params.q10.powf((temp - params.t_ref) / 10.0).max(0.0)
    } else {
        1.0
    };
    let inhibition = if terms.product_inhibition {
        1.0 / (1.0 + p / params.kp)
    } else {
        1.0
    };
    let mu = params.mu_max
        * temp_factor
        * (s_safe / (params.ks + s_safe))
        * (do_safe / (params.kio + do_safe))
        * inhibition;

    let feed = if terms.feed_schedule {
        feed_rate(t, ops, do_safe)
    } else {
        0.0
    };
    let dilution = feed / volume;

    let kla = terms
        .mass_transfer
        .apply(params.kla, ops.aeration_rate, ops.agitation_speed);
    let otr = kla * (params.c_star - y[DO]).max(0.0);
    let our = params.o2_maintenance * x;

    let q_gen = params.delta_h * mu * x * volume;
    let q_loss = params.u * params.a * (temp - ops.cooling_temp);
    let q_agit = if terms.agitation_heat {
        ops.agit_heat_eff * ops.agit_power_coeff * volume * ops.agitation_speed.max(0.0).powi(3)
    } else {
        0.0
    };

    KineticRates {
        mu,
        feed,
        dilution,
        volume,
        kla,
        otr,
        our,
        q_gen,
        q_loss,
        q_agit,
    }
}

/// Fill `dydt` with the state derivatives at `(t, y)`.
///
/// `y` and `dydt` have at least five entries; `dV/dt` is written only when
/// volume is modelled and `dydt` has room for it. Infallible: physical
/// singularities are clamped, not reported.
pub fn derivative(
    t: f64,
    y: &[f64],
    params: &KineticParams,
    ops: &OperatingConditions,
    terms: &ModelTerms,
    dydt: &mut [f64],
) {
    let r = rates(t, y, params, ops, terms);
    let x = y[X];
    let d = r.dilution;

    let maintenance = if terms.substrate_maintenance {
        params.maintenance * x
    } else {
        0.0
    };

    dydt[X] = (r.mu - params.kd - d) * x;
    dydt[S] = -(r.mu / params.yxs) * x - maintenance + d * (ops.feed_substrate_conc - y[S]);
    dydt[P] = params.ypx * r.mu * x - d * y[P];
    dydt[DO] = r.otr - r.our - d * y[DO];
    dydt[T] = (r.q_gen + r.q_agit - r.q_loss) / (params.rho * r.volume * params.cp);

    if terms.volume_dynamics
        && let Some(dv) = dydt.get_mut(V)
    {
        *dv = r.feed;
    }
}
