//! OdeSystem trait for pluggable right-hand sides.

/// A system of first-order ODEs `dy/dt = f(t, y)`.
///
/// The implementing value is the context of the evaluation: parameters it
/// owns are visible to `rhs` without globals. Any closure of the form
/// `Fn(f64, &[f64], &mut [f64])` is an `OdeSystem`.
pub trait OdeSystem {
    /// Write `f(t, y)` into `dydt`.
    ///
    /// `dydt` has the same length as `y`. Implementations must not fail;
    /// numerical singularities are handled inside the model.
    fn rhs(&self, t: f64, y: &[f64], dydt: &mut [f64]);
}

impl<F> OdeSystem for F
where
    F: Fn(f64, &[f64], &mut [f64]),
{
    fn rhs(&self, t: f64, y: &[f64], dydt: &mut [f64]) {
        self(t, y, dydt)
    }
}
