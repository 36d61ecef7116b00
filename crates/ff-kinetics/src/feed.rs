//! Feed-rate policy.

use crate::params::{FeedMode, OperatingConditions};

/// Feed rate (L/h) at time `t` for the given operating conditions.
///
/// `dissolved_oxygen` is only read by [`FeedMode::DoControl`]. Nothing is fed
/// before `feed_start`.
pub fn feed_rate(t: f64, ops: &OperatingConditions, dissolved_oxygen: f64) -> f64 {
    if t < ops.feed_start {
        return 0.0;
    }
    let elapsed = t - ops.feed_start;

    match ops.feed_mode {
        FeedMode::Constant => ops.feed_rate,
        FeedMode::Ramp => {
            if ops.feed_rate_end > ops.feed_rate && ops.feed_tau > 0.0 {
                let slope = (ops.feed_rate_end - ops.feed_rate) / ops.feed_tau;
                (ops.feed_rate + slope * elapsed).min(ops.feed_rate_end)
            } else {
                ops.feed_rate
            }
        }
        FeedMode::Exponential => {
            let target = if ops.feed_rate_end > 0.0 {
                ops.feed_rate_end
            } else {
                ops.feed_rate
            };
            let tau = ops.feed_tau.max(1e-6);
            target + (ops.feed_rate - target) * (-elapsed / tau).exp()
        }
        FeedMode::DoControl => {
            let correction = ops.do_kp * (ops.do_setpoint - dissolved_oxygen);
            (ops.feed_rate + correction).max(0.0)
        }
    }
}
