//! Whitespace-separated text output.
//!
//! Trajectories: one line per recorded step, `t sx sy sz [sx sy sz]...` for
//! spin rows or `t Mx My Mz |M|` for magnetization rows. Curie curves: one
//! line per temperature, `T Mx My Mz |M|`, tab separated.

use crate::ResultsResult;
use sf_sim::{CurieCurve, Observables, Trajectory, TrajectoryRow};
use std::fmt::Write as _;
use std::path::Path;

fn push_row(out: &mut String, row: &TrajectoryRow) {
    let _ = write!(out, "{}", row.t);
    match &row.observables {
        Observables::Spins(spins) => {
            for s in spins {
                let _ = write!(out, " {} {} {}", s.x, s.y, s.z);
            }
        }
        Observables::Magnetization { m, length } => {
            let _ = write!(out, " {} {} {} {}", m.x, m.y, m.z, length);
        }
    }
    out.push('\n');
}

pub fn format_trajectory(trajectory: &Trajectory) -> String {
    let mut out = String::new();
    for row in &trajectory.rows {
        push_row(&mut out, row);
    }
    out
}

pub fn write_trajectory(path: &Path, trajectory: &Trajectory) -> ResultsResult<()> {
    std::fs::write(path, format_trajectory(trajectory))?;
    Ok(())
}

pub fn format_curie_curve(curve: &CurieCurve) -> String {
    let mut out = String::new();
    for p in &curve.points {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            p.temperature, p.m.x, p.m.y, p.m.z, p.length
        );
    }
    out
}

pub fn write_curie_curve(path: &Path, curve: &CurieCurve) -> ResultsResult<()> {
    std::fs::write(path, format_curie_curve(curve))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::algebra::vec3;
    use sf_sim::{CuriePoint, Equations};

    #[test]
    fn spin_rows_list_every_atom() {
        let trajectory = Trajectory {
            equations: Equations::Sllg,
            rows: vec![
                TrajectoryRow {
                    t: 0.0,
                    observables: Observables::Spins(vec![vec3(1.0, 0.0, 0.0), vec3(0.0, 0.5, -0.5)]),
                },
                TrajectoryRow {
                    t: 0.25,
                    observables: Observables::Spins(vec![vec3(0.0, 1.0, 0.0), vec3(0.0, 0.0, 1.0)]),
                },
            ],
        };
        assert_eq!(
            format_trajectory(&trajectory),
            "0 1 0 0 0 0.5 -0.5\n0.25 0 1 0 0 0 1\n"
        );
    }

    #[test]
    fn magnetization_rows_end_with_length() {
        let trajectory = Trajectory {
            equations: Equations::Dllb,
            rows: vec![TrajectoryRow {
                t: 0.5,
                observables: Observables::Magnetization {
                    m: vec3(0.0, 0.6, 0.8),
                    length: 1.0,
                },
            }],
        };
        assert_eq!(format_trajectory(&trajectory), "0.5 0 0.6 0.8 1\n");
    }

    #[test]
    fn curie_lines_are_tab_separated() {
        let curve = CurieCurve {
            points: vec![CuriePoint {
                temperature: 25.0,
                m: vec3(0.0, 0.0, 0.5),
                length: 0.5,
            }],
            trajectories: vec![],
        };
        assert_eq!(format_curie_curve(&curve), "25\t0\t0\t0.5\t0.5\n");
    }
}
