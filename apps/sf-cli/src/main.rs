mod error;

use clap::{Parser, Subcommand};
use error::{AppError, AppResult};
use sf_atoms::magnetization;
use sf_results::{
    RunManifest, RunStore, RunSummary, RunType, compute_run_id, write_curie_curve,
    write_trajectory,
};
use sf_sim::{CancelToken, SimProgress, curie_scan_with, run_trajectory_with};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "spinflow")]
#[command(about = "spinflow - atomistic spin dynamics (sLLG / dLLB)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration file syntax and values
    Validate {
        /// Path to the YAML or JSON configuration
        config_path: PathBuf,
    },
    /// Print the generated lattice sites
    Lattice {
        /// Path to the YAML or JSON configuration
        config_path: PathBuf,
        /// Print every atom as one JSON object per line
        #[arg(long)]
        json: bool,
    },
    /// Integrate one trajectory
    Run {
        /// Path to the YAML or JSON configuration
        config_path: PathBuf,
        /// Also write the text trajectory to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Advance atoms in parallel
        #[arg(long)]
        parallel: bool,
        /// Do not save the run under .spinflow/runs
        #[arg(long)]
        no_store: bool,
    },
    /// Scan magnetization versus temperature
    Curie {
        /// Path to the YAML or JSON configuration
        config_path: PathBuf,
        /// Also write the `T Mx My Mz |M|` summary to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Restart every temperature from the initial state
        #[arg(long)]
        restart: bool,
        /// Do not save the run under .spinflow/runs
        #[arg(long)]
        no_store: bool,
    },
    /// List stored runs of a configuration
    Runs {
        /// Path to the YAML or JSON configuration
        config_path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Lattice { config_path, json } => cmd_lattice(&config_path, json),
        Commands::Run {
            config_path,
            output,
            parallel,
            no_store,
        } => cmd_run(&config_path, output.as_deref(), parallel, !no_store),
        Commands::Curie {
            config_path,
            output,
            restart,
            no_store,
        } => cmd_curie(&config_path, output.as_deref(), restart, !no_store),
        Commands::Runs { config_path } => cmd_runs(&config_path),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let config = sf_project::load(config_path)?;
    let compiled = sf_project::compile(&config)?;
    println!("✓ Configuration is valid");
    println!("  Atoms: {}", compiled.atoms.len());
    println!(
        "  Equations: {}, scheme: {}",
        compiled.options.equations, compiled.options.scheme
    );
    Ok(())
}

fn cmd_lattice(config_path: &Path, json: bool) -> AppResult<()> {
    let config = sf_project::load(config_path)?;
    let atoms = sf_project::compile_lattice(&config.lattice)?;
    if json {
        for atom in &atoms {
            println!("{}", atom.to_json()?);
        }
        return Ok(());
    }
    for (i, atom) in atoms.iter().enumerate() {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            i, atom.name, atom.kind, atom.position.x, atom.position.y, atom.position.z
        );
    }
    Ok(())
}

fn cmd_run(
    config_path: &Path,
    output: Option<&Path>,
    parallel: bool,
    store_run: bool,
) -> AppResult<()> {
    let config = sf_project::load(config_path)?;
    let mut compiled = sf_project::compile(&config)?;
    compiled.options.parallel |= parallel;
    let opts = &compiled.options;

    println!(
        "Running {} / {} on {} atoms: dt = {} ps, stop = {} ps, T = {} K",
        opts.equations,
        opts.scheme,
        compiled.atoms.len(),
        opts.dt,
        opts.stop,
        opts.bath.temperature_k()
    );

    let started = Instant::now();
    let mut last_emit = Instant::now();
    let trajectory = run_trajectory_with(
        &mut compiled.atoms,
        &mut compiled.fields,
        opts,
        &CancelToken::new(),
        |p| {
            if last_emit.elapsed().as_millis() >= 100 {
                render_progress(&p);
                last_emit = Instant::now();
            }
        },
    )?;
    clear_progress_line();
    let wall_time_s = started.elapsed().as_secs_f64();

    let m = magnetization(&compiled.atoms);
    println!("✓ Simulation completed in {:.3}s", wall_time_s);
    println!("  Rows: {}", trajectory.len());
    println!("  Final M = ({}, {}, {}), |M| = {}", m.x, m.y, m.z, m.norm());

    if let Some(path) = output {
        write_trajectory(path, &trajectory)?;
        println!("  Trajectory written to {}", path.display());
    }

    if store_run {
        let store = RunStore::for_config(config_path)?;
        let run_type = RunType::Trajectory {
            equations: opts.equations,
            scheme: opts.scheme,
            dt_ps: opts.dt,
            stop_ps: opts.stop,
            temperature_k: opts.bath.temperature_k(),
            atoms: compiled.atoms.len(),
        };
        let run_id = compute_run_id(&config, &run_type, SOLVER_VERSION);
        let manifest = RunManifest::new(run_id.clone(), &config.name, run_type, SOLVER_VERSION)
        .with_summary(RunSummary {
            rows: trajectory.len(),
            magnetization: [m.x, m.y, m.z],
            magnetization_length: m.norm(),
            wall_time_s,
        });
        store.save_trajectory(&manifest, &trajectory)?;
        info!(run_id = %run_id, "run stored");
        println!("  Stored as {}", run_id);
    }
    Ok(())
}

fn cmd_curie(
    config_path: &Path,
    output: Option<&Path>,
    restart: bool,
    store_run: bool,
) -> AppResult<()> {
    let config = sf_project::load(config_path)?;
    let mut compiled = sf_project::compile(&config)?;
    let mut sweep = compiled.curie.take().ok_or_else(|| AppError::MissingCurie {
        path: config_path.to_path_buf(),
    })?;
    sweep.restart |= restart;

    println!(
        "Curie scan on {} atoms: T = {} K to {} K in steps of {} K",
        compiled.atoms.len(),
        sweep.t_initial,
        sweep.t_final,
        sweep.t_step
    );

    let started = Instant::now();
    let curve = curie_scan_with(
        &mut compiled.atoms,
        &mut compiled.fields,
        &sweep,
        &compiled.options.constants,
        &CancelToken::new(),
        |p| println!("  T = {:>8.2} K  |M| = {:.6}", p.temperature, p.length),
    )?;
    let wall_time_s = started.elapsed().as_secs_f64();
    println!("✓ Scan completed in {:.3}s ({} temperatures)", wall_time_s, curve.len());

    if let Some(path) = output {
        write_curie_curve(path, &curve)?;
        println!("  Curve written to {}", path.display());
    }

    if store_run {
        let store = RunStore::for_config(config_path)?;
        let run_type = RunType::Curie {
            t_initial_k: sweep.t_initial,
            t_step_k: sweep.t_step,
            t_final_k: sweep.t_final,
            temperatures: curve.len(),
            atoms: compiled.atoms.len(),
            restart: sweep.restart,
        };
        let run_id = compute_run_id(&config, &run_type, SOLVER_VERSION);
        let mut manifest =
            RunManifest::new(run_id.clone(), &config.name, run_type, SOLVER_VERSION);
        if let Some(last) = curve.points.last() {
            manifest = manifest.with_summary(RunSummary {
                rows: curve.len(),
                magnetization: [last.m.x, last.m.y, last.m.z],
                magnetization_length: last.length,
                wall_time_s,
            });
        }
        store.save_curie(&manifest, &curve)?;
        info!(run_id = %run_id, "Curie scan stored");
        println!("  Stored as {}", run_id);
    }
    Ok(())
}

fn cmd_runs(config_path: &Path) -> AppResult<()> {
    let config = sf_project::load(config_path)?;
    let store = RunStore::for_config(config_path)?;
    let runs = store.list_runs(&config.name)?;

    if runs.is_empty() {
        println!("No stored runs for configuration: {}", config.name);
    } else {
        println!("Stored runs for '{}':", config.name);
        for manifest in runs {
            let kind = match manifest.run_type {
                RunType::Trajectory { .. } => "run",
                RunType::Curie { .. } => "curie",
            };
            println!("  {} [{}] ({})", manifest.run_id, kind, manifest.timestamp);
        }
    }
    Ok(())
}

fn clear_progress_line() {
    eprint!("\r{}\r", " ".repeat(80));
    let _ = io::stderr().flush();
}

fn render_progress(p: &SimProgress) {
    let width = 28usize;
    let fraction = p.fraction();
    let filled = ((fraction * width as f64).round() as usize).min(width);
    eprint!(
        "\r[{}{}] {:>6.2}%  t={:.3}/{:.3} ps  step={}",
        "#".repeat(filled),
        "-".repeat(width - filled),
        fraction * 100.0,
        p.t,
        p.stop,
        p.step
    );
    let _ = io::stderr().flush();
}
