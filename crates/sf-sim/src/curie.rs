//! Curie-temperature scan: equilibrium magnetization versus bath temperature.

use crate::driver::{CancelToken, Equations, Scheme, SimOptions, Trajectory, run_trajectory_with};
use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use sf_atoms::{AtomState, Bath, magnetization};
use sf_core::{PhysicalConstants, Real, Vector3};
use sf_fields::FieldAssembly;
use tracing::{debug, info};

fn one() -> usize {
    1
}

/// Temperature sweep parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurieSweep {
    /// First temperature (K)
    pub t_initial: Real,
    /// Temperature increment (K)
    pub t_step: Real,
    /// Exclusive upper bound (K)
    pub t_final: Real,
    /// Integration time per temperature (ps)
    pub stop: Real,
    /// Time step (ps)
    pub dt: Real,
    /// Gilbert damping
    pub alpha: Real,
    /// Start every temperature from the initial atoms instead of the
    /// previous temperature's final state
    #[serde(default)]
    pub restart: bool,
    #[serde(default = "one")]
    pub record_every: usize,
    #[serde(default)]
    pub parallel: bool,
}

impl CurieSweep {
    pub fn validate(&self) -> SimResult<()> {
        if !self.t_step.is_finite() || self.t_step <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "t_step must be positive",
            });
        }
        if !self.t_initial.is_finite() || self.t_initial < 0.0 {
            return Err(SimError::InvalidArg {
                what: "t_initial must be a non-negative temperature",
            });
        }
        if !self.t_final.is_finite() {
            return Err(SimError::InvalidArg {
                what: "t_final must be finite",
            });
        }
        Ok(())
    }

    /// `T_k = t_initial + k·t_step` for every `k` with `T_k < t_final`.
    pub fn temperatures(&self) -> Vec<Real> {
        if self.validate().is_err() {
            return Vec::new();
        }
        (0..)
            .map(|k| self.t_initial + k as Real * self.t_step)
            .take_while(|t| *t < self.t_final)
            .collect()
    }

    /// Run options at temperature `t_k` (kelvin).
    pub fn options_at(&self, t_k: Real, constants: &PhysicalConstants) -> SimResult<SimOptions> {
        Ok(SimOptions {
            stop: self.stop,
            dt: self.dt,
            scheme: Scheme::Rk4,
            equations: Equations::Dllb,
            bath: Bath::from_kelvin(t_k, self.alpha)?,
            constants: *constants,
            record_every: self.record_every,
            parallel: self.parallel,
        })
    }
}

/// Magnetization at the end of one temperature's run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CuriePoint {
    /// Bath temperature (K)
    pub temperature: Real,
    pub m: Vector3,
    pub length: Real,
}

/// Result of a sweep: one point and one trajectory per temperature.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CurieCurve {
    pub points: Vec<CuriePoint>,
    pub trajectories: Vec<Trajectory>,
}

impl CurieCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub fn curie_scan<F>(
    atoms: &mut [AtomState],
    fields: &mut F,
    sweep: &CurieSweep,
    constants: &PhysicalConstants,
) -> SimResult<CurieCurve>
where
    F: FieldAssembly + ?Sized,
{
    curie_scan_with(atoms, fields, sweep, constants, &CancelToken::new(), |_| {})
}

/// Run a dLLB/RK4 trajectory at each temperature of the sweep.
///
/// `on_point` is called after every completed temperature.
pub fn curie_scan_with<F, P>(
    atoms: &mut [AtomState],
    fields: &mut F,
    sweep: &CurieSweep,
    constants: &PhysicalConstants,
    cancel: &CancelToken,
    mut on_point: P,
) -> SimResult<CurieCurve>
where
    F: FieldAssembly + ?Sized,
    P: FnMut(&CuriePoint),
{
    sweep.validate()?;
    let temperatures = sweep.temperatures();
    debug!(
        count = temperatures.len(),
        t_initial = sweep.t_initial,
        t_step = sweep.t_step,
        t_final = sweep.t_final,
        restart = sweep.restart,
        "starting Curie scan"
    );

    let initial = sweep.restart.then(|| atoms.to_vec());
    let mut curve = CurieCurve::default();

    for t_k in temperatures {
        if let Some(initial) = &initial {
            atoms.clone_from_slice(initial);
        }
        let opts = sweep.options_at(t_k, constants)?;
        let trajectory = run_trajectory_with(atoms, fields, &opts, cancel, |_| {})?;

        let m = magnetization(atoms);
        let point = CuriePoint {
            temperature: t_k,
            m,
            length: m.norm(),
        };
        info!(temperature = t_k, magnetization = point.length, "Curie point");
        on_point(&point);

        curve.points.push(point);
        curve.trajectories.push(trajectory);
    }

    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep(t_initial: Real, t_step: Real, t_final: Real) -> CurieSweep {
        CurieSweep {
            t_initial,
            t_step,
            t_final,
            stop: 0.1,
            dt: 0.01,
            alpha: 0.1,
            restart: false,
            record_every: 1,
            parallel: false,
        }
    }

    #[test]
    fn temperatures_exclude_final() {
        let temps = sweep(0.0, 25.0, 250.0).temperatures();
        assert_eq!(temps.len(), 10);
        assert_eq!(temps[0], 0.0);
        assert_eq!(temps[9], 225.0);
    }

    #[test]
    fn partial_last_interval_is_included() {
        // ceil((100 - 10) / 20) = 5
        let temps = sweep(10.0, 20.0, 100.0).temperatures();
        assert_eq!(temps, vec![10.0, 30.0, 50.0, 70.0, 90.0]);
    }

    #[test]
    fn empty_range_gives_no_temperatures() {
        assert!(sweep(300.0, 10.0, 300.0).temperatures().is_empty());
    }

    #[test]
    fn non_positive_step_is_rejected() {
        assert!(sweep(0.0, 0.0, 100.0).validate().is_err());
        assert!(sweep(0.0, -5.0, 100.0).validate().is_err());
        assert!(sweep(-1.0, 5.0, 100.0).validate().is_err());
    }

    #[test]
    fn options_use_moment_equations_with_rk4() {
        let opts = sweep(0.0, 25.0, 250.0)
            .options_at(75.0, &PhysicalConstants::default())
            .unwrap();
        assert_eq!(opts.equations, Equations::Dllb);
        assert_eq!(opts.scheme, Scheme::Rk4);
        assert_eq!(opts.bath.temperature_k(), 75.0);
    }
}
