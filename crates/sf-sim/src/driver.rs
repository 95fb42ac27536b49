//! Fixed-step trajectory driver over a whole atom collection.

use crate::error::{SimError, SimResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sf_atoms::{
    AtomError, AtomResult, AtomState, Bath, MomentMethod, PrecessionMethod, magnetization,
};
use sf_core::{PhysicalConstants, Real, Vector3, whole_steps};
use sf_fields::FieldAssembly;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Stepping scheme shared by both equation families.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Forward Euler (1st order)
    Euler,
    /// Classical fourth-order Runge-Kutta
    #[default]
    Rk4,
}

impl Scheme {
    pub const ALL: [Scheme; 2] = [Self::Euler, Self::Rk4];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Euler => "euler",
            Self::Rk4 => "rk4",
        }
    }

    /// Per-atom update used on the precession path.
    pub fn precession(self) -> PrecessionMethod {
        match self {
            Self::Euler => PrecessionMethod::Euler,
            Self::Rk4 => PrecessionMethod::Rk4,
        }
    }

    /// Per-atom update used on the moment path.
    pub fn moments(self) -> MomentMethod {
        match self {
            Self::Euler => MomentMethod::Euler,
            Self::Rk4 => MomentMethod::Rk4,
        }
    }
}

/// Equations of motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equations {
    /// Undamped precession of unit spins
    #[default]
    Sllg,
    /// First/second moment (Landau-Lifshitz-Bloch) equations
    Dllb,
}

impl Equations {
    pub const ALL: [Equations; 2] = [Self::Sllg, Self::Dllb];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sllg => "sllg",
            Self::Dllb => "dllb",
        }
    }
}

macro_rules! lowercase_enum_str {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = SimError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.trim().to_ascii_lowercase();
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == lower)
                    .ok_or_else(|| SimError::UnknownName {
                        what: $what,
                        name: s.to_string(),
                    })
            }
        }
    };
}

lowercase_enum_str!(Scheme, "integration scheme");
lowercase_enum_str!(Equations, "equation family");

/// Upper bound on rows reserved before the first step; longer runs grow.
const MAX_RESERVED_ROWS: usize = 1 << 16;

/// Options for trajectory runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Final simulation time (ps)
    pub stop: Real,
    /// Fixed time step (ps)
    pub dt: Real,
    pub scheme: Scheme,
    pub equations: Equations,
    /// Thermal bath (only read by the dLLB path)
    pub bath: Bath,
    pub constants: PhysicalConstants,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    /// Advance atoms on the rayon pool
    pub parallel: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            stop: 1.0,
            dt: 1e-3,
            scheme: Scheme::default(),
            equations: Equations::default(),
            bath: Bath::default(),
            constants: PhysicalConstants::default(),
            record_every: 1,
            parallel: false,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !self.stop.is_finite() || self.stop < 0.0 {
            return Err(SimError::InvalidArg {
                what: "stop must be non-negative",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        Ok(())
    }

    /// Number of steps `n` with `n·dt` the first multiple of `dt` reaching `stop`.
    pub fn step_count(&self) -> usize {
        whole_steps(self.stop, self.dt)
    }
}

/// What a trajectory row reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Observables {
    /// Every atom's spin, in collection order
    Spins(Vec<Vector3>),
    /// Average spin and its norm
    Magnetization { m: Vector3, length: Real },
}

impl Observables {
    pub fn spins(atoms: &[AtomState]) -> Self {
        Self::Spins(atoms.iter().map(|a| a.spin).collect())
    }

    pub fn magnetization(atoms: &[AtomState]) -> Self {
        let m = magnetization(atoms);
        Self::Magnetization { m, length: m.norm() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRow {
    /// Time at the start of the recorded step (ps)
    pub t: Real,
    pub observables: Observables,
}

/// Recorded trajectory of one run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub equations: Equations,
    pub rows: Vec<TrajectoryRow>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn times(&self) -> impl Iterator<Item = Real> + '_ {
        self.rows.iter().map(|r| r.t)
    }
}

/// Progress snapshot handed to the progress callback after each step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimProgress {
    /// Steps completed so far
    pub step: usize,
    /// Current simulation time (ps)
    pub t: Real,
    pub stop: Real,
}

impl SimProgress {
    pub fn fraction(&self) -> Real {
        if self.stop > 0.0 {
            (self.t / self.stop).min(1.0)
        } else {
            1.0
        }
    }
}

/// Shared flag to stop a running trajectory between two steps.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Run a trajectory from `t = 0` to `stop`.
pub fn run_trajectory<F>(
    atoms: &mut [AtomState],
    fields: &mut F,
    opts: &SimOptions,
) -> SimResult<Trajectory>
where
    F: FieldAssembly + ?Sized,
{
    run_trajectory_with(atoms, fields, opts, &CancelToken::new(), |_| {})
}

/// Run a trajectory with cancellation and progress reporting.
///
/// Fields are assembled once before the first step and again after every
/// step, once all atoms have been advanced. sLLG rows hold the spins before
/// the step; dLLB rows hold the magnetization after it. Both are tagged with
/// the time at the start of the step.
///
/// # Errors
/// The lowest-indexed failing atom aborts the run ([`SimError::Atom`]); atoms
/// already advanced in that step keep their new state.
pub fn run_trajectory_with<F, P>(
    atoms: &mut [AtomState],
    fields: &mut F,
    opts: &SimOptions,
    cancel: &CancelToken,
    mut progress: P,
) -> SimResult<Trajectory>
where
    F: FieldAssembly + ?Sized,
    P: FnMut(SimProgress),
{
    opts.validate()?;
    let steps = opts.step_count();
    debug!(
        atoms = atoms.len(),
        steps,
        dt = opts.dt,
        equations = %opts.equations,
        scheme = %opts.scheme,
        temperature_k = opts.bath.temperature_k(),
        parallel = opts.parallel,
        "starting trajectory"
    );

    fields.recompute(atoms)?;

    let mut trajectory = Trajectory {
        equations: opts.equations,
        rows: Vec::with_capacity((steps / opts.record_every + 1).min(MAX_RESERVED_ROWS)),
    };

    for step in 0..steps {
        let t = step as Real * opts.dt;
        if cancel.is_cancelled() {
            warn!(step, t, "trajectory cancelled");
            return Err(SimError::Cancelled { step });
        }
        let record = step % opts.record_every == 0;

        if record && opts.equations == Equations::Sllg {
            trajectory.rows.push(TrajectoryRow {
                t,
                observables: Observables::spins(atoms),
            });
        }

        advance_all(atoms, opts).map_err(|(atom, source)| SimError::Atom {
            step,
            atom,
            source,
        })?;
        fields.recompute(atoms)?;

        if record && opts.equations == Equations::Dllb {
            trajectory.rows.push(TrajectoryRow {
                t,
                observables: Observables::magnetization(atoms),
            });
        }

        progress(SimProgress {
            step: step + 1,
            t: (step + 1) as Real * opts.dt,
            stop: opts.stop,
        });
    }

    Ok(trajectory)
}

/// Advance every atom at fixed ω. Errors carry the lowest failing index.
///
/// The serial sweep stops at the first failure; the parallel sweep advances
/// every atom and then reports the lowest failing index.
fn advance_all(atoms: &mut [AtomState], opts: &SimOptions) -> Result<(), (usize, AtomError)> {
    if opts.parallel {
        let failure = atoms
            .par_iter_mut()
            .enumerate()
            .filter_map(|(i, atom)| advance_one(atom, opts).err().map(|e| (i, e)))
            .min_by_key(|(i, _)| *i);
        match failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    } else {
        atoms
            .iter_mut()
            .enumerate()
            .try_for_each(|(i, atom)| advance_one(atom, opts).map_err(|e| (i, e)))
    }
}

fn advance_one(atom: &mut AtomState, opts: &SimOptions) -> AtomResult<()> {
    match opts.equations {
        Equations::Sllg => atom.advance_spin(opts.scheme.precession(), opts.dt),
        Equations::Dllb => atom.advance_moments(
            opts.scheme.moments(),
            opts.dt,
            &opts.bath,
            &opts.constants,
        ),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn step_count_covers_stop_exactly_once(stop in 0.0_f64..50.0, dt in 1e-3_f64..1.0) {
            let opts = SimOptions { stop, dt, ..Default::default() };
            let n = opts.step_count() as Real;
            prop_assert!(n * dt >= stop * (1.0 - 1e-9));
            prop_assert!(n == 0.0 || (n - 1.0) * dt < stop);
        }
    }
}
