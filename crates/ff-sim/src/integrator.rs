//! Fixed-step time integrators.

use crate::error::{SimError, SimResult};
use crate::model::OdeSystem;

/// Stage vectors reused across steps of one integration call.
///
/// Every buffer is sized to the state dimension when created and dropped
/// with the value, on success and on early return alike.
#[derive(Debug)]
pub struct Scratch {
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    k4: Vec<f64>,
    tmp: Vec<f64>,
}

impl Scratch {
    /// Reserve stage vectors for a state of dimension `dim`.
    ///
    /// Fails with [`SimError::ScratchAlloc`] if any buffer cannot be reserved.
    pub fn try_new(dim: usize) -> SimResult<Self> {
        Ok(Self {
            k1: try_zeroed(dim)?,
            k2: try_zeroed(dim)?,
            k3: try_zeroed(dim)?,
            k4: try_zeroed(dim)?,
            tmp: try_zeroed(dim)?,
        })
    }
}

/// Zero-filled vector of length `len`, reporting allocation failure instead of aborting.
pub(crate) fn try_zeroed(len: usize) -> SimResult<Vec<f64>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| SimError::ScratchAlloc { len })?;
    v.resize(len, 0.0);
    Ok(v)
}

/// Trait for time integrators.
pub trait Integrator {
    /// Human-readable method name.
    fn name(&self) -> &'static str;

    /// Number of rhs evaluations per step.
    fn stages(&self) -> usize;

    /// Advance `y` in place from `t` to `t + dt`.
    ///
    /// `y` and `scratch` must share the same dimension.
    fn step<S: OdeSystem + ?Sized>(
        &self,
        system: &S,
        t: f64,
        dt: f64,
        y: &mut [f64],
        scratch: &mut Scratch,
    );
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Copy, Debug, Default)]
pub struct RK4;

impl Integrator for RK4 {
    fn name(&self) -> &'static str {
        "Runge-Kutta 4"
    }

    fn stages(&self) -> usize {
        4
    }

    fn step<S: OdeSystem + ?Sized>(
        &self,
        system: &S,
        t: f64,
        dt: f64,
        y: &mut [f64],
        scratch: &mut Scratch,
    ) {
        let Scratch {
            k1,
            k2,
            k3,
            k4,
            tmp,
        } = scratch;
        let half = 0.5 * dt;

        system.rhs(t, y, k1);

        for ((s, &yj), &k) in tmp.iter_mut().zip(y.iter()).zip(k1.iter()) {
            *s = yj + half * k;
        }
        system.rhs(t + half, tmp, k2);

        for ((s, &yj), &k) in tmp.iter_mut().zip(y.iter()).zip(k2.iter()) {
            *s = yj + half * k;
        }
        system.rhs(t + half, tmp, k3);

        for ((s, &yj), &k) in tmp.iter_mut().zip(y.iter()).zip(k3.iter()) {
            *s = yj + dt * k;
        }
        system.rhs(t + dt, tmp, k4);

        // Combine: y_new = y + dt * (k1 + 2*k2 + 2*k3 + k4) / 6
        for (j, yj) in y.iter_mut().enumerate() {
            *yj += dt * (k1[j] + 2.0 * k2[j] + 2.0 * k3[j] + k4[j]) / 6.0;
        }
    }
}

/// Forward Euler (explicit, 1st order, fast for testing).
/// Calls rhs() once per step instead of 4 times (RK4).
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn name(&self) -> &'static str {
        "Forward Euler"
    }

    fn stages(&self) -> usize {
        1
    }

    fn step<S: OdeSystem + ?Sized>(
        &self,
        system: &S,
        t: f64,
        dt: f64,
        y: &mut [f64],
        scratch: &mut Scratch,
    ) {
        let k1 = &mut scratch.k1;
        system.rhs(t, y, k1);
        for (yj, &k) in y.iter_mut().zip(k1.iter()) {
            *yj += dt * k;
        }
    }
}
