use crate::{CoreError, CoreResult};

/// Floating point type used throughout system
pub type Real = f64;

/// Allowed overshoot of a composition above 100 % (one part per trillion).
pub const COMPOSITION_TOLERANCE: Real = 1e-12;

/// Decimal places kept when comparing concentrations for equality.
pub const FRACTION_DECIMALS: i32 = 12;

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

/// Round `v` to a fixed number of decimal places.
///
/// Used to absorb floating-point noise when comparing concentrations that were
/// produced by different arithmetic paths (e.g. `0.25 * 1%` vs `0.0025`).
pub fn round_to(v: Real, places: i32) -> Real {
    let scale = 10f64.powi(places);
    (v * scale).round() / scale
}
