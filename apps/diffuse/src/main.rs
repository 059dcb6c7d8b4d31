//! `diffuse` — run a reaction–diffusion environment from a JSON configuration.
//!
//! Loads the environment, prints its summary, then steps the LOD solver to
//! `simulation_time`, writing CSV snapshots on the output cadence.
//!
//! Run with:
//!   cargo run -p diffuse --release -- demos/settings.json
//!
//! Exit status: 0 on success, 1 when the configuration cannot be loaded, 2
//! when the run aborts on a solver or serialization failure.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};

use rd_env::Environment;
use rd_output::{CsvSnapshotWriter, NoopWriter, SnapshotWriter};
use rd_sim::{ConsoleReporter, DEFAULT_PREFIX, RunSummary, SimBuilder};
use rd_solver::build_solver;


const EXIT_CONFIG:  u8 = 1;
const EXIT_RUNTIME: u8 = 2;

// ── CLI Arguments ─────────────────────────────────────────────────────────────

#[derive(clap::Parser, Debug)]
#[command(name = "diffuse")]
#[command(about = "Fixed-timestep reaction-diffusion driver")]
struct Args {
    /// Environment configuration (JSON).
    #[clap(default_value = "settings.json")]
    config: PathBuf,

    /// Write snapshots here instead of `output.directory`.
    #[clap(long)]
    output_dir: Option<PathBuf>,

    /// Override `output_interval` (simulated time between snapshots).
    #[clap(long)]
    output_interval: Option<f64>,

    /// Report progress but write no snapshot files.
    #[clap(long)]
    no_output: bool,
}

fn main() -> ExitCode {
    let args = <Args as clap::Parser>::parse();
    let code = run(&args, &mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(code)
}

/// Load, run, and map the outcome onto the process exit status.
fn run<O: Write, E: Write>(args: &Args, out: &mut O, err: &mut E) -> u8 {
    let _ = writeln!(
        out,
        "{DEFAULT_PREFIX} Loading configuration from: {}",
        args.config.display()
    );

    let env = match configure(args) {
        Ok(env) => env,
        Err(e) => {
            let _ = writeln!(err, "{DEFAULT_PREFIX} Error: {e:#}");
            return EXIT_CONFIG;
        }
    };

    match execute(env, out) {
        Ok(_) => 0,
        Err(e) => {
            let _ = writeln!(err, "{DEFAULT_PREFIX} Error: {e:#}");
            EXIT_RUNTIME
        }
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Everything that can fail before the output directory or the solver exist.
fn configure(args: &Args) -> Result<Environment> {
    let mut env = Environment::from_config_path(&args.config)?;

    if let Some(interval) = args.output_interval {
        env.time.output_interval = interval;
        env.time.validate().context("invalid --output-interval")?;
    }
    if let Some(dir) = &args.output_dir {
        env.output.directory = dir.clone();
    }
    if args.no_output {
        env.output.enabled = false;
    }
    Ok(env)
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn execute<O: Write>(env: Environment, out: &mut O) -> Result<RunSummary> {
    env.print_info(out)?;

    let writer: Box<dyn SnapshotWriter> = if env.output.enabled {
        let csv = CsvSnapshotWriter::new(&env.output.directory).with_context(|| {
            format!("cannot create output directory {}", env.output.directory.display())
        })?;
        Box::new(csv)
    } else {
        Box::new(NoopWriter)
    };
    let solver = build_solver(&env.solver);

    let mut sim = SimBuilder::new(env, solver, writer).build()?;
    let mut reporter = ConsoleReporter::new(&mut *out);
    let summary = sim.run(&mut reporter)?;

    if let Some(e) = reporter.take_error() {
        return Err(e).context("writing progress report");
    }
    Ok(summary)
}
