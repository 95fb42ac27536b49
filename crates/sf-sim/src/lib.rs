//! Multi-atom time integration for spinflow.
//!
//! Provides:
//! - fixed-step trajectory driver over a whole atom collection (sLLG or dLLB)
//! - optional data-parallel per-atom advance with a serial field barrier
//! - Strang-splitting precession sweep
//! - Curie-temperature scan
//! - cancellation token and progress callback

pub mod curie;
pub mod driver;
pub mod error;
pub mod splitting;

pub use curie::{CurieCurve, CuriePoint, CurieSweep, curie_scan, curie_scan_with};
pub use driver::{
    CancelToken, Equations, Observables, Scheme, SimOptions, SimProgress, Trajectory,
    TrajectoryRow, run_trajectory, run_trajectory_with,
};
pub use error::{SimError, SimResult};
pub use splitting::strang_sweep;
