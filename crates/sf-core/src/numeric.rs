use crate::CoreError;

/// Floating point type used throughout the solver
pub type Real = f64;

/// Relative slack below which `span / dt` is treated as a whole number.
pub const STEP_SNAP: Real = 1e-9;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Like [`ensure_finite`], but also rejects zero and negative values.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v <= 0.0 {
        return Err(CoreError::InvalidArg { what });
    }
    Ok(v)
}

/// Number of fixed steps of length `dt` needed to cover `span`.
///
/// Ratios within [`STEP_SNAP`] of an integer snap to it, so `1.0 / 0.1`
/// gives 10 steps rather than 11. Anything else rounds up.
pub fn whole_steps(span: Real, dt: Real) -> usize {
    if span.is_nan() || dt.is_nan() || span <= 0.0 || dt <= 0.0 {
        return 0;
    }
    let ratio = span / dt;
    let nearest = ratio.round();
    if (ratio - nearest).abs() <= STEP_SNAP * nearest.max(1.0) {
        nearest as usize
    } else {
        ratio.ceil() as usize
    }
}
