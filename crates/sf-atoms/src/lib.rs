//! Per-atom spin state and its equations of motion.
//!
//! Provides:
//! - `MomentState`: first/second moment pair used by the dLLB equations
//! - `AtomState`: one lattice site, with precession (sLLG) and moment (dLLB) advances
//! - precession updaters: Euler, RK4, implicit-symplectic, closed-form rotation
//! - the dLLB right-hand side
//! - lattice generation and magnetization observables

pub mod atom;
pub mod dllb;
pub mod error;
pub mod lattice;
pub mod moments;
pub mod observables;
pub mod precession;

pub use atom::{AtomBuilder, AtomState};
pub use dllb::{Bath, MomentMethod, moment_rhs};
pub use error::{AtomError, AtomResult};
pub use lattice::{AtomTemplate, Supercell, UnitCell, build_lattice};
pub use moments::MomentState;
pub use observables::{magnetization, magnetization_length};
pub use precession::{PrecessionMethod, precess};
