//! Dense 3-vector and 3x3-matrix algebra.
//!
//! The value types are `nalgebra`'s statically sized `Vector3` / `Matrix3`,
//! so `+`, `-`, scalar `*`, matrix products, `transpose()`, `trace()`,
//! `dot()` and `cross()` come from nalgebra directly. This module adds the
//! few operations the spin equations need that nalgebra spells differently
//! (outer product, column-wise cross product) and an explicit policy for
//! normalizing a degenerate vector.
//!
//! Conventions:
//! - `outer(a, b)` is `a b^T`, i.e. `(a ⊗ b)_ij = a_i b_j`
//! - `cross_columns(w, m)` replaces every column `m_j` by `w × m_j`,
//!   which is the matrix product `[w]× m`

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

pub type Vector3 = nalgebra::Vector3<Real>;
pub type Matrix3 = nalgebra::Matrix3<Real>;

/// Norms at or below this are treated as zero when normalizing.
pub const MIN_NORM: Real = Real::EPSILON;

#[inline]
pub fn vec3(x: Real, y: Real, z: Real) -> Vector3 {
    Vector3::new(x, y, z)
}

/// Outer product `a ⊗ b = a b^T`.
#[inline]
pub fn outer(a: &Vector3, b: &Vector3) -> Matrix3 {
    a * b.transpose()
}

/// Column-wise cross product `w × M`.
#[inline]
pub fn cross_columns(w: &Vector3, m: &Matrix3) -> Matrix3 {
    w.cross_matrix() * m
}

/// Return `v / |v|`.
///
/// # Errors
/// [`CoreError::DegenerateVector`] when `|v|` is zero (at or below
/// [`MIN_NORM`]) or not finite. There is no fallback direction.
pub fn try_normalize(v: &Vector3, what: &'static str) -> CoreResult<Vector3> {
    let n = v.norm();
    if !n.is_finite() || n <= MIN_NORM {
        return Err(CoreError::DegenerateVector { what, norm: n });
    }
    Ok(v / n)
}

/// Unit vector along a named axis: `"+x"`, `"-y"`, `"z"`, ...
pub fn direction(axis: &str) -> CoreResult<Vector3> {
    let trimmed = axis.trim().to_ascii_lowercase();
    let (sign, letter) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed.as_str())),
    };
    let unit = match letter {
        "x" => Vector3::x(),
        "y" => Vector3::y(),
        "z" => Vector3::z(),
        _ => {
            return Err(CoreError::InvalidArg {
                what: "direction must be one of ±x, ±y, ±z",
            });
        }
    };
    Ok(unit * sign)
}
