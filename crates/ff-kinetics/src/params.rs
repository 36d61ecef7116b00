//! Kinetic parameters and operating conditions.

use serde::{Deserialize, Serialize};

/// Growth, yield, oxygen and thermal constants for one run.
///
/// Serialized with the conventional bioprocess symbols (`Ks`, `Yxs`, `Q10`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KineticParams {
    /// Maximum specific growth rate (1/h).
    pub mu_max: f64,
    /// Monod half-saturation constant (g/L).
    #[serde(rename = "Ks")]
    pub ks: f64,
    /// Biomass yield on substrate (g/g).
    #[serde(rename = "Yxs")]
    pub yxs: f64,
    /// Product yield on biomass growth (g/g).
    #[serde(rename = "Ypx")]
    pub ypx: f64,
    /// Death rate (1/h).
    pub kd: f64,
    /// Oxygen half-saturation constant (g/L).
    #[serde(rename = "Kio")]
    pub kio: f64,
    /// Product inhibition constant (g/L).
    #[serde(rename = "Kp")]
    pub kp: f64,
    /// Substrate maintenance coefficient (g/g/h).
    pub maintenance: f64,
    #[serde(rename = "Q10")]
    pub q10: f64,
    /// Reference temperature for the Q10 factor (°C).
    #[serde(rename = "T_ref")]
    pub t_ref: f64,
    /// Base volumetric oxygen transfer coefficient (1/h).
    #[serde(rename = "Kla")]
    pub kla: f64,
    /// Oxygen saturation concentration (g/L).
    #[serde(rename = "C_star")]
    pub c_star: f64,
    /// Oxygen maintenance uptake (g O2/g X/h).
    #[serde(rename = "O2_maintenance")]
    pub o2_maintenance: f64,
    /// Heat of reaction per unit growth (J/g).
    #[serde(rename = "delta_H")]
    pub delta_h: f64,
    /// Broth heat capacity (J/kg/K).
    #[serde(rename = "Cp")]
    pub cp: f64,
    /// Jacket heat transfer coefficient (W/m²/K).
    #[serde(rename = "U")]
    pub u: f64,
    /// Jacket area (m²).
    #[serde(rename = "A")]
    pub a: f64,
    /// Broth density (kg/m³).
    pub rho: f64,
}

/// Feed schedule shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedMode {
    #[default]
    Constant,
    Ramp,
    Exponential,
    DoControl,
}

impl FeedMode {
    /// Numeric code of the mode (0..=3).
    pub fn code(self) -> i32 {
        match self {
            FeedMode::Constant => 0,
            FeedMode::Ramp => 1,
            FeedMode::Exponential => 2,
            FeedMode::DoControl => 3,
        }
    }

    /// Mode for a numeric code; unknown codes fall back to constant feeding.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => FeedMode::Ramp,
            2 => FeedMode::Exponential,
            3 => FeedMode::DoControl,
            _ => FeedMode::Constant,
        }
    }

    /// Name used in requests and serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            FeedMode::Constant => "constant",
            FeedMode::Ramp => "ramp",
            FeedMode::Exponential => "exponential",
            FeedMode::DoControl => "do_control",
        }
    }

    /// Strict lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "constant" => Some(FeedMode::Constant),
            "ramp" => Some(FeedMode::Ramp),
            "exponential" => Some(FeedMode::Exponential),
            "do_control" => Some(FeedMode::DoControl),
            _ => None,
        }
    }

    pub const ALL: [FeedMode; 4] = [
        FeedMode::Constant,
        FeedMode::Ramp,
        FeedMode::Exponential,
        FeedMode::DoControl,
    ];
}

/// Reactor operating conditions for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingConditions {
    /// Working volume (L). Initial volume in fed-batch runs.
    pub volume: f64,
    /// Base feed rate (L/h).
    pub feed_rate: f64,
    /// Substrate concentration of the feed (g/L).
    pub feed_substrate_conc: f64,
    /// Feeding begins at this time (h).
    pub feed_start: f64,
    /// Ramp end / exponential target feed rate (L/h).
    pub feed_rate_end: f64,
    /// Ramp duration / exponential time constant (h).
    pub feed_tau: f64,
    pub feed_mode: FeedMode,
    /// DO setpoint for DO-controlled feeding (g/L).
    pub do_setpoint: f64,
    /// Proportional gain of DO-controlled feeding.
    #[serde(rename = "do_Kp")]
    pub do_kp: f64,
    /// Aeration rate (vvm).
    pub aeration_rate: f64,
    /// Agitation speed (rpm).
    pub agitation_speed: f64,
    /// Jacket coolant temperature (°C).
    pub cooling_temp: f64,
    /// Coolant flow; carried for reporting only.
    pub coolant_flow: f64,
    pub agit_power_coeff: f64,
    /// Fraction of agitation power dissipated as heat (0..=1).
    pub agit_heat_eff: f64,
}
