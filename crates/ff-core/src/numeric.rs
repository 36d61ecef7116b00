use crate::{CoreError, CoreResult};

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Clamp `v` from below to a small positive `floor`.
///
/// NaN maps to the floor, which keeps divisions well defined.
#[inline]
pub fn floor_positive(v: Real, floor: Real) -> Real {
    v.max(floor)
}

/// Evenly spaced points over `[start, end]`, both ends included.
///
/// The last point is exactly `end`. `n == 1` yields `[start]`. A point count
/// too large to allocate is reported as [`CoreError::Alloc`].
pub fn linspace(start: Real, end: Real, n: usize) -> CoreResult<Vec<Real>> {
    if n == 0 {
        return Err(CoreError::InvalidArg {
            what: "linspace needs at least one point",
        });
    }
    ensure_finite(start, "linspace start")?;
    ensure_finite(end, "linspace end")?;

    if n == 1 {
        return Ok(vec![start]);
    }

    let mut points = Vec::new();
    points
        .try_reserve_exact(n)
        .map_err(|_| CoreError::Alloc { len: n })?;

    let step = (end - start) / (n - 1) as Real;
    points.extend((0..n - 1).map(|i| start + i as Real * step));
    points.push(end);
    Ok(points)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn linspace_is_increasing(
            start in -100.0_f64..100.0,
            span in 0.01_f64..100.0,
            n in 2_usize..500,
        ) {
            let pts = linspace(start, start + span, n).unwrap();
            prop_assert_eq!(pts.len(), n);
            for w in pts.windows(2) {
                prop_assert!(w[1] > w[0]);
            }
        }
    }
}
