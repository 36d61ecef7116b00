//! Simulation request with optional overrides.
//!
//! Every field is optional. A value left unset is taken from the selected
//! organism preset (see [`crate::presets`]) and otherwise from [`defaults`].

use ff_core::{CoreResult, linspace};
use ff_kinetics::{FeedMode, KineticParams, OperatingConditions, ReactorState};
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, validate_request};

/// Values used when neither the request nor a preset sets a field.
pub mod defaults {
    pub const X0: f64 = 1.0;
    pub const S0: f64 = 20.0;
    pub const P0: f64 = 0.0;
    pub const DO0: f64 = 0.005;
    pub const T0: f64 = 30.0;

    pub const T_START: f64 = 0.0;
    pub const T_END: f64 = 24.0;
    pub const N_POINTS: usize = 241;

    pub const MU_MAX: f64 = 0.4;
    pub const KS: f64 = 0.1;
    pub const YXS: f64 = 0.5;
    pub const YPX: f64 = 0.1;
    pub const KD: f64 = 0.01;
    pub const KIO: f64 = 1e-4;
    pub const KP: f64 = 50.0;
    pub const MAINTENANCE: f64 = 0.005;
    pub const Q10: f64 = 2.0;
    pub const T_REF: f64 = 30.0;
    pub const KLA: f64 = 200.0;
    pub const C_STAR: f64 = 0.007;
    pub const O2_MAINTENANCE: f64 = 5e-4;
    pub const DELTA_H: f64 = 4e5;
    pub const CP: f64 = 4180.0;
    pub const U: f64 = 500.0;
    pub const A: f64 = 2.0;
    pub const RHO: f64 = 1000.0;

    pub const VOLUME: f64 = 5.0;
    pub const FEED_RATE: f64 = 0.0;
    pub const FEED_START: f64 = 0.0;
    pub const FEED_SUBSTRATE_CONC: f64 = 500.0;
    pub const FEED_RATE_END: f64 = 0.0;
    pub const FEED_TAU: f64 = 2.0;
    pub const FEED_MODE: &str = "constant";
    pub const DO_SETPOINT: f64 = 0.0;
    pub const DO_KP: f64 = 0.0;
    pub const AERATION_RATE: f64 = 1.0;
    pub const AGITATION_SPEED: f64 = 300.0;
    pub const COOLING_TEMP: f64 = 25.0;
    pub const COOLANT_FLOW: f64 = 1.0;
    pub const AGIT_POWER_COEFF: f64 = 2.0;
    pub const AGIT_HEAT_EFF: f64 = 0.5;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationRequest {
    // Preset selectors
    pub microbe_id: Option<String>,
    pub substrate_id: Option<String>,

    // Initial conditions
    #[serde(rename = "X0")]
    pub x0: Option<f64>,
    #[serde(rename = "S0")]
    pub s0: Option<f64>,
    #[serde(rename = "P0")]
    pub p0: Option<f64>,
    #[serde(rename = "DO0")]
    pub do0: Option<f64>,
    #[serde(rename = "T0")]
    pub t0: Option<f64>,

    // Time grid
    pub t_start: Option<f64>,
    pub t_end: Option<f64>,
    pub n_points: Option<usize>,

    // Kinetics
    pub mu_max: Option<f64>,
    #[serde(rename = "Ks")]
    pub ks: Option<f64>,
    #[serde(rename = "Yxs")]
    pub yxs: Option<f64>,
    #[serde(rename = "Ypx")]
    pub ypx: Option<f64>,
    pub kd: Option<f64>,
    #[serde(rename = "Kio")]
    pub kio: Option<f64>,
    #[serde(rename = "Kp")]
    pub kp: Option<f64>,
    pub maintenance: Option<f64>,
    #[serde(rename = "Q10")]
    pub q10: Option<f64>,
    #[serde(rename = "T_ref")]
    pub t_ref: Option<f64>,
    #[serde(rename = "Kla")]
    pub kla: Option<f64>,
    #[serde(rename = "C_star")]
    pub c_star: Option<f64>,
    #[serde(rename = "O2_maintenance")]
    pub o2_maintenance: Option<f64>,
    #[serde(rename = "delta_H")]
    pub delta_h: Option<f64>,
    #[serde(rename = "Cp")]
    pub cp: Option<f64>,
    #[serde(rename = "U")]
    pub u: Option<f64>,
    #[serde(rename = "A")]
    pub a: Option<f64>,
    pub rho: Option<f64>,

    // Operating conditions
    pub volume: Option<f64>,
    pub feed_rate: Option<f64>,
    pub feed_start: Option<f64>,
    pub feed_substrate_conc: Option<f64>,
    pub feed_rate_end: Option<f64>,
    pub feed_tau: Option<f64>,
    pub feed_mode: Option<String>,
    pub do_setpoint: Option<f64>,
    #[serde(rename = "do_Kp")]
    pub do_kp: Option<f64>,
    pub aeration_rate: Option<f64>,
    pub agitation_speed: Option<f64>,
    pub cooling_temp: Option<f64>,
    pub coolant_flow: Option<f64>,
    pub agit_power_coeff: Option<f64>,
    pub agit_heat_eff: Option<f64>,
}

/// Uniform output grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    pub t_start: f64,
    pub t_end: f64,
    pub n_points: usize,
}

impl TimeGrid {
    /// Evenly spaced points from `t_start` to `t_end` inclusive.
    pub fn points(&self) -> CoreResult<Vec<f64>> {
        linspace(self.t_start, self.t_end, self.n_points)
    }
}

/// Fully specified, validated inputs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub initial: ReactorState,
    pub grid: TimeGrid,
    pub params: KineticParams,
    pub ops: OperatingConditions,
}

impl SimulationRequest {
    /// Copy of the request with every unset field filled from [`defaults`].
    pub fn with_defaults(&self) -> SimulationRequest {
        use crate::request::defaults as d;
        SimulationRequest {
            microbe_id: self.microbe_id.clone(),
            substrate_id: self.substrate_id.clone(),
            x0: self.x0.or(Some(d::X0)),
            s0: self.s0.or(Some(d::S0)),
            p0: self.p0.or(Some(d::P0)),
            do0: self.do0.or(Some(d::DO0)),
            t0: self.t0.or(Some(d::T0)),
            t_start: self.t_start.or(Some(d::T_START)),
            t_end: self.t_end.or(Some(d::T_END)),
            n_points: self.n_points.or(Some(d::N_POINTS)),
            mu_max: self.mu_max.or(Some(d::MU_MAX)),
            ks: self.ks.or(Some(d::KS)),
            yxs: self.yxs.or(Some(d::YXS)),
            ypx: self.ypx.or(Some(d::YPX)),
            kd: self.kd.or(Some(d::KD)),
            kio: self.kio.or(Some(d::KIO)),
            kp: self.kp.or(Some(d::KP)),
            maintenance: self.maintenance.or(Some(d::MAINTENANCE)),
            q10: self.q10.or(Some(d::Q10)),
            t_ref: self.t_ref.or(Some(d::T_REF)),
            kla: self.kla.or(Some(d::KLA)),
            c_star: self.c_star.or(Some(d::C_STAR)),
            o2_maintenance: self.o2_maintenance.or(Some(d::O2_MAINTENANCE)),
            delta_h: self.delta_h.or(Some(d::DELTA_H)),
            cp: self.cp.or(Some(d::CP)),
            u: self.u.or(Some(d::U)),
            a: self.a.or(Some(d::A)),
            rho: self.rho.or(Some(d::RHO)),
            volume: self.volume.or(Some(d::VOLUME)),
            feed_rate: self.feed_rate.or(Some(d::FEED_RATE)),
            feed_start: self.feed_start.or(Some(d::FEED_START)),
            feed_substrate_conc: self.feed_substrate_conc.or(Some(d::FEED_SUBSTRATE_CONC)),
            feed_rate_end: self.feed_rate_end.or(Some(d::FEED_RATE_END)),
            feed_tau: self.feed_tau.or(Some(d::FEED_TAU)),
            feed_mode: self
                .feed_mode
                .clone()
                .or_else(|| Some(d::FEED_MODE.to_string())),
            do_setpoint: self.do_setpoint.or(Some(d::DO_SETPOINT)),
            do_kp: self.do_kp.or(Some(d::DO_KP)),
            aeration_rate: self.aeration_rate.or(Some(d::AERATION_RATE)),
            agitation_speed: self.agitation_speed.or(Some(d::AGITATION_SPEED)),
            cooling_temp: self.cooling_temp.or(Some(d::COOLING_TEMP)),
            coolant_flow: self.coolant_flow.or(Some(d::COOLANT_FLOW)),
            agit_power_coeff: self.agit_power_coeff.or(Some(d::AGIT_POWER_COEFF)),
            agit_heat_eff: self.agit_heat_eff.or(Some(d::AGIT_HEAT_EFF)),
        }
    }

    /// Fill defaults, validate, and build the typed model inputs.
    ///
    /// Preset merging is a separate step; call
    /// [`PresetCatalog::merge_request`](crate::PresetCatalog::merge_request)
    /// first if selectors should apply.
    pub fn resolve(&self) -> Result<ResolvedRequest, ValidationError> {
        use crate::request::defaults as d;
        validate_request(self)?;

        let feed_mode_name = self.feed_mode.as_deref().unwrap_or(d::FEED_MODE);
        let feed_mode =
            FeedMode::from_name(feed_mode_name).ok_or_else(|| ValidationError::InvalidValue {
                field: "feed_mode".to_string(),
                value: feed_mode_name.to_string(),
                reason: "expected constant, ramp, exponential or do_control".to_string(),
            })?;

        let volume = self.volume.unwrap_or(d::VOLUME);

        Ok(ResolvedRequest {
            initial: ReactorState {
                biomass: self.x0.unwrap_or(d::X0),
                substrate: self.s0.unwrap_or(d::S0),
                product: self.p0.unwrap_or(d::P0),
                dissolved_oxygen: self.do0.unwrap_or(d::DO0),
                temperature: self.t0.unwrap_or(d::T0),
                volume,
            },
            grid: TimeGrid {
                t_start: self.t_start.unwrap_or(d::T_START),
                t_end: self.t_end.unwrap_or(d::T_END),
                n_points: self.n_points.unwrap_or(d::N_POINTS),
            },
            params: KineticParams {
                mu_max: self.mu_max.unwrap_or(d::MU_MAX),
                ks: self.ks.unwrap_or(d::KS),
                yxs: self.yxs.unwrap_or(d::YXS),
                ypx: self.ypx.unwrap_or(d::YPX),
                kd: self.kd.unwrap_or(d::KD),
                kio: self.kio.unwrap_or(d::KIO),
                kp: self.kp.unwrap_or(d::KP),
                maintenance: self.maintenance.unwrap_or(d::MAINTENANCE),
                q10: self.q10.unwrap_or(d::Q10),
                t_ref: self.t_ref.unwrap_or(d::T_REF),
                kla: self.kla.unwrap_or(d::KLA),
                c_star: self.c_star.unwrap_or(d::C_STAR),
                o2_maintenance: self.o2_maintenance.unwrap_or(d::O2_MAINTENANCE),
                delta_h: self.delta_h.unwrap_or(d::DELTA_H),
                cp: self.cp.unwrap_or(d::CP),
                u: self.u.unwrap_or(d::U),
                a: self.a.unwrap_or(d::A),
                rho: self.rho.unwrap_or(d::RHO),
            },
            ops: OperatingConditions {
                volume,
                feed_rate: self.feed_rate.unwrap_or(d::FEED_RATE),
                feed_substrate_conc: self.feed_substrate_conc.unwrap_or(d::FEED_SUBSTRATE_CONC),
                feed_start: self.feed_start.unwrap_or(d::FEED_START),
                feed_rate_end: self.feed_rate_end.unwrap_or(d::FEED_RATE_END),
                feed_tau: self.feed_tau.unwrap_or(d::FEED_TAU),
                feed_mode,
                do_setpoint: self.do_setpoint.unwrap_or(d::DO_SETPOINT),
                do_kp: self.do_kp.unwrap_or(d::DO_KP),
                aeration_rate: self.aeration_rate.unwrap_or(d::AERATION_RATE),
                agitation_speed: self.agitation_speed.unwrap_or(d::AGITATION_SPEED),
                cooling_temp: self.cooling_temp.unwrap_or(d::COOLING_TEMP),
                coolant_flow: self.coolant_flow.unwrap_or(d::COOLANT_FLOW),
                agit_power_coeff: self.agit_power_coeff.unwrap_or(d::AGIT_POWER_COEFF),
                agit_heat_eff: self.agit_heat_eff.unwrap_or(d::AGIT_HEAT_EFF),
            },
        })
    }
}
