//! Integration tests: Curie-temperature scan.

use sf_atoms::{AtomTemplate, MomentState, Supercell, UnitCell, build_lattice};
use sf_core::{PhysicalConstants, Real, Vector3};
use sf_fields::{ExchangeCoupling, Interaction, StaticFields};
use sf_sim::{CancelToken, CurieSweep, SimError, curie_scan, curie_scan_with};

fn nickel_fcc() -> Vec<sf_atoms::AtomState> {
    let template = AtomTemplate {
        name: "Ni".to_string(),
        kind: 1,
        g: 2.02,
        spin: Vector3::z(),
        moments: MomentState::polarized(Vector3::z()),
    };
    build_lattice(&UnitCell::fcc(), Supercell::new(1, 1, 1), 0.35, &template).unwrap()
}

fn sweep(restart: bool) -> CurieSweep {
    CurieSweep {
        t_initial: 0.0,
        t_step: 25.0,
        t_final: 250.0,
        stop: 0.5,
        dt: 0.01,
        alpha: 0.1,
        restart,
        record_every: 10,
        parallel: false,
    }
}

#[test]
fn scan_gives_one_record_per_temperature_with_decaying_order() {
    let mut atoms = nickel_fcc();
    let curve = curie_scan(
        &mut atoms,
        &mut StaticFields,
        &sweep(false),
        &PhysicalConstants::default(),
    )
    .unwrap();

    assert_eq!(curve.len(), 10);
    assert_eq!(curve.trajectories.len(), 10);
    assert_eq!(curve.trajectories[0].len(), 5);
    assert_eq!(curve.points[0].temperature, 0.0);
    assert_eq!(curve.points[9].temperature, 225.0);

    // No field and no bath at T = 0: nothing moves.
    assert!((curve.points[0].length - 1.0).abs() < 1e-15);
    for pair in curve.points.windows(2) {
        assert!(
            pair[1].length < pair[0].length,
            "|M| rose from {} to {} between {} K and {} K",
            pair[0].length,
            pair[1].length,
            pair[0].temperature,
            pair[1].temperature
        );
    }
}

#[test]
fn restarted_scan_follows_longitudinal_relaxation() {
    // With ω = 0 the first moment decays as exp(−2 D c² t).
    let constants = PhysicalConstants::default();
    let sweep = sweep(true);
    let mut atoms = nickel_fcc();
    let curve = curie_scan(&mut atoms, &mut StaticFields, &sweep, &constants).unwrap();

    let c = 1.0 / (1.0 + sweep.alpha * sweep.alpha);
    for point in &curve.points {
        let d = sweep.alpha * constants.k_b * point.temperature / constants.hbar;
        let expected: Real = (-2.0 * d * c * c * sweep.stop).exp();
        assert!(
            (point.length - expected).abs() < 1e-5 * expected,
            "T = {}: {} vs {}",
            point.temperature,
            point.length,
            expected
        );
    }
}

#[test]
fn exchange_coupled_scan_stays_finite() {
    let mut atoms = nickel_fcc();
    let mut fields = Interaction::new()
        .exchange(ExchangeCoupling {
            type_i: 1,
            type_j: 1,
            value: 2.0,
            cutoff: 0.25,
        })
        .unwrap();
    let mut seen = Vec::new();
    let curve = curie_scan_with(
        &mut atoms,
        &mut fields,
        &sweep(false),
        &PhysicalConstants::default(),
        &CancelToken::new(),
        |p| seen.push(p.temperature),
    )
    .unwrap();
    assert_eq!(seen.len(), 10);
    assert!(curve.points.iter().all(|p| p.length.is_finite() && p.length <= 1.0 + 1e-12));
}

#[test]
fn zero_temperature_step_is_rejected() {
    let mut atoms = nickel_fcc();
    let bad = CurieSweep {
        t_step: 0.0,
        ..sweep(false)
    };
    let err = curie_scan(
        &mut atoms,
        &mut StaticFields,
        &bad,
        &PhysicalConstants::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SimError::InvalidArg { .. }));
}
