//! Request validation.

use ff_kinetics::FeedMode;

use crate::request::SimulationRequest;

/// Largest accepted output grid.
pub const MAX_N_POINTS: usize = 1_000_000;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid time grid: {reason}")]
    InvalidTimeGrid { reason: String },
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn check_finite(field: &str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() => Err(invalid(field, v, "must be finite")),
        _ => Ok(()),
    }
}

fn check_positive(field: &str, value: Option<f64>) -> Result<(), ValidationError> {
    check_finite(field, value)?;
    match value {
        Some(v) if v <= 0.0 => Err(invalid(field, v, "must be > 0")),
        _ => Ok(()),
    }
}

fn check_non_negative(field: &str, value: Option<f64>) -> Result<(), ValidationError> {
    check_finite(field, value)?;
    match value {
        Some(v) if v < 0.0 => Err(invalid(field, v, "must be >= 0")),
        _ => Ok(()),
    }
}

fn check_fraction(field: &str, value: Option<f64>) -> Result<(), ValidationError> {
    check_non_negative(field, value)?;
    match value {
        Some(v) if v > 1.0 => Err(invalid(field, v, "must be <= 1")),
        _ => Ok(()),
    }
}

/// Check every field the request sets; unset fields fall back to valid defaults.
pub fn validate_request(req: &SimulationRequest) -> Result<(), ValidationError> {
    for (field, value) in [
        ("X0", req.x0),
        ("S0", req.s0),
        ("DO0", req.do0),
        ("T0", req.t0),
        ("t_end", req.t_end),
        ("mu_max", req.mu_max),
        ("Ks", req.ks),
        ("Yxs", req.yxs),
        ("Kio", req.kio),
        ("Kp", req.kp),
        ("T_ref", req.t_ref),
        ("Kla", req.kla),
        ("C_star", req.c_star),
        ("Cp", req.cp),
        ("rho", req.rho),
        ("volume", req.volume),
        ("aeration_rate", req.aeration_rate),
        ("agitation_speed", req.agitation_speed),
        ("cooling_temp", req.cooling_temp),
    ] {
        check_positive(field, value)?;
    }

    for (field, value) in [
        ("P0", req.p0),
        ("t_start", req.t_start),
        ("Ypx", req.ypx),
        ("kd", req.kd),
        ("maintenance", req.maintenance),
        ("Q10", req.q10),
        ("O2_maintenance", req.o2_maintenance),
        ("delta_H", req.delta_h),
        ("U", req.u),
        ("A", req.a),
        ("feed_rate", req.feed_rate),
        ("feed_start", req.feed_start),
        ("feed_substrate_conc", req.feed_substrate_conc),
        ("feed_rate_end", req.feed_rate_end),
        ("feed_tau", req.feed_tau),
        ("do_setpoint", req.do_setpoint),
        ("do_Kp", req.do_kp),
        ("coolant_flow", req.coolant_flow),
        ("agit_power_coeff", req.agit_power_coeff),
    ] {
        check_non_negative(field, value)?;
    }

    check_fraction("agit_heat_eff", req.agit_heat_eff)?;

    if let Some(mode) = req.feed_mode.as_deref()
        && FeedMode::from_name(mode).is_none()
    {
        return Err(ValidationError::InvalidValue {
            field: "feed_mode".to_string(),
            value: mode.to_string(),
            reason: "expected constant, ramp, exponential or do_control".to_string(),
        });
    }

    validate_time_grid(req)
}

fn validate_time_grid(req: &SimulationRequest) -> Result<(), ValidationError> {
    use crate::request::defaults;

    let n_points = req.n_points.unwrap_or(defaults::N_POINTS);
    if n_points < 2 {
        return Err(ValidationError::InvalidTimeGrid {
            reason: format!("n_points = {n_points}, need at least 2"),
        });
    }
    if n_points > MAX_N_POINTS {
        return Err(ValidationError::InvalidTimeGrid {
            reason: format!("n_points = {n_points}, at most {MAX_N_POINTS} allowed"),
        });
    }

    let t_start = req.t_start.unwrap_or(defaults::T_START);
    let t_end = req.t_end.unwrap_or(defaults::T_END);
    if t_end <= t_start {
        return Err(ValidationError::InvalidTimeGrid {
            reason: format!("t_end = {t_end} must exceed t_start = {t_start}"),
        });
    }

    Ok(())
}
