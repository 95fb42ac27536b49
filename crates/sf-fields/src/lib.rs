//! Local field assembly for spinflow.
//!
//! Recomputes every atom's pulsation vector `ω` from its configured
//! interactions (Zeeman, uniaxial anisotropy, exchange) between integration
//! steps.

pub mod boundary;
pub mod error;
pub mod interaction;
pub mod traits;

pub use boundary::Boundary;
pub use error::{FieldError, FieldResult};
pub use interaction::{ExchangeCoupling, Interaction};
pub use traits::{FieldAssembly, StaticFields};
