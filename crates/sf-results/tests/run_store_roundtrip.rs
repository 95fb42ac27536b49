use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sf_atoms::{AtomState, Bath};
use sf_core::Vector3;
use sf_core::algebra::vec3;
use sf_fields::StaticFields;
use sf_results::{ResultsError, RunManifest, RunStore, RunSummary, RunType};
use sf_sim::{CurieSweep, Equations, Scheme, SimOptions, curie_scan, run_trajectory};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn atoms() -> Vec<AtomState> {
    vec![
        AtomState::builder("Fe")
            .kind(1)
            .g(2.0)
            .spin(Vector3::x())
            .omega(vec3(0.0, 0.0, 1.0))
            .moments(sf_atoms::MomentState::polarized(Vector3::x()))
            .build()
            .unwrap(),
    ]
}

fn manifest(run_id: &str, run_type: RunType) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        config_name: "macrospin".to_string(),
        timestamp: "2026-10-17T00:00:00Z".to_string(),
        run_type,
        solver_version: "0.1.0".to_string(),
        summary: Some(RunSummary {
            rows: 0,
            magnetization: [1.0, 0.0, 0.0],
            magnetization_length: 1.0,
            wall_time_s: 0.0,
        }),
    }
}

#[test]
fn trajectory_save_list_load_roundtrip() {
    let config_dir = unique_temp_dir("sf_results_config");
    fs::create_dir_all(&config_dir).unwrap();
    let store = RunStore::for_config(&config_dir.join("macrospin.yaml")).unwrap();

    let opts = SimOptions {
        stop: 0.5,
        dt: 0.1,
        ..Default::default()
    };
    let mut atoms = atoms();
    let trajectory = run_trajectory(&mut atoms, &mut StaticFields, &opts).unwrap();

    let manifest = manifest(
        "run-1",
        RunType::Trajectory {
            equations: Equations::Sllg,
            scheme: Scheme::Rk4,
            dt_ps: 0.1,
            stop_ps: 0.5,
            temperature_k: 0.0,
            atoms: 1,
        },
    );
    store.save_trajectory(&manifest, &trajectory).unwrap();

    assert!(store.has_run("run-1"));
    let runs = store.list_runs("macrospin").unwrap();
    assert_eq!(runs, vec![manifest.clone()]);
    assert!(store.list_runs("other").unwrap().is_empty());

    assert_eq!(store.load_manifest("run-1").unwrap(), manifest);
    assert_eq!(store.load_trajectory("run-1").unwrap(), trajectory);

    let text = fs::read_to_string(store.run_dir("run-1").join("trajectory.dat")).unwrap();
    assert_eq!(text.lines().count(), 5);
    assert!(text.starts_with("0 1 0 0\n"));

    store.delete_run("run-1").unwrap();
    assert!(!store.has_run("run-1"));
    assert!(matches!(
        store.load_manifest("run-1"),
        Err(ResultsError::RunNotFound { .. })
    ));
}

#[test]
fn curie_scan_writes_summary_and_per_temperature_files() {
    let store = RunStore::new(unique_temp_dir("sf_results_curie")).unwrap();
    let sweep = CurieSweep {
        t_initial: 0.0,
        t_step: 100.0,
        t_final: 300.0,
        stop: 0.1,
        dt: 0.01,
        alpha: 0.1,
        restart: false,
        record_every: 1,
        parallel: false,
    };
    let mut atoms = atoms();
    let curve = curie_scan(
        &mut atoms,
        &mut StaticFields,
        &sweep,
        &Default::default(),
    )
    .unwrap();

    let manifest = manifest(
        "curie-1",
        RunType::Curie {
            t_initial_k: 0.0,
            t_step_k: 100.0,
            t_final_k: 300.0,
            temperatures: 3,
            atoms: 1,
            restart: false,
        },
    );
    store.save_curie(&manifest, &curve).unwrap();

    let dir = store.run_dir("curie-1");
    let summary = fs::read_to_string(dir.join("curie.dat")).unwrap();
    assert_eq!(summary.lines().count(), 3);
    for t in ["0", "100", "200"] {
        let per_t = fs::read_to_string(dir.join(format!("curie_T{t}.dat"))).unwrap();
        assert_eq!(per_t.lines().count(), 10);
    }
    assert_eq!(store.load_curie("curie-1").unwrap(), curve);
    // The bath reached by the sweep is a valid one.
    assert!(Bath::from_kelvin(curve.points[2].temperature, sweep.alpha).is_ok());
}
