//! sf-core: stable foundation for spinflow.
//!
//! Contains:
//! - algebra (Vector3 / Matrix3 on top of nalgebra + named helpers)
//! - constants (explicit physical constants context)
//! - integrator (fixed-step Euler / RK4 over any vector-space state)
//! - numeric (Real + validation and step-count helpers)
//! - units (uom temperature at the API boundary)
//! - error (shared error types)

pub mod algebra;
pub mod constants;
pub mod error;
pub mod integrator;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use algebra::{Matrix3, Vector3};
pub use constants::PhysicalConstants;
pub use error::{CoreError, CoreResult};
pub use integrator::{ForwardEuler, Integrator, RK4, VectorSpace};
pub use numeric::*;
pub use units::*;
