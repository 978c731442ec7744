//! gbm-paths command-line driver
//!
//! Simulates a correlated GBM path and prints `<label>(<t>) = <value>` for
//! every grid point and dimension. Logs go to stderr so stdout stays
//! machine-readable.

use anyhow::{Context, Result};
use clap::Parser;
use gbm_paths::analytics::path_statistics;
use gbm_paths::math_utils::Timer;
use gbm_paths::mc::mc_engine::{simulate_paths, simulate_single, SimulationConfig};
use gbm_paths::output;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Simulate correlated geometric Brownian motion paths
#[derive(Parser, Debug)]
#[command(name = "gbm-paths")]
#[command(version, about, long_about = None)]
struct Args {
    /// Simulation configuration (JSON); defaults to the x/y/z demonstration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of time steps
    #[arg(long)]
    steps: Option<usize>,

    /// Time horizon
    #[arg(long)]
    maturity: Option<f64>,

    /// Base seed; path i uses seed + i
    #[arg(long, env = "GBM_PATHS_SEED")]
    seed: Option<u64>,

    /// Number of independent paths; more than one adds a correlation report
    #[arg(short, long)]
    paths: Option<usize>,

    /// Also write the first path as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<String>,

    /// Write a key/value run summary
    #[arg(long, value_name = "FILE")]
    summary: Option<String>,

    /// Decimal places for printed times and values; full precision if omitted
    #[arg(long)]
    precision: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GBM_PATHS_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

impl Args {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut cfg = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        if let Some(steps) = self.steps {
            cfg.steps = steps;
        }
        if let Some(maturity) = self.maturity {
            cfg.maturity = maturity;
        }
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if let Some(paths) = self.paths {
            cfg.paths = paths;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(args: Args) -> Result<()> {
    let cfg = args.simulation_config()?;
    info!(
        steps = cfg.steps,
        maturity = cfg.maturity,
        seed = cfg.seed,
        paths = cfg.paths,
        "configuration loaded"
    );

    let mut timer = Timer::new();
    timer.start();
    let paths = if cfg.paths > 1 {
        simulate_paths(&cfg)?
    } else {
        vec![simulate_single(&cfg)?]
    };
    let elapsed_ms = timer.elapsed_ms();
    info!(elapsed_ms, "simulation finished");

    let first = &paths[0];
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    output::write_path_with_precision(&mut out, first, &cfg.labels, args.precision)?;

    let mut summary = vec![
        ("paths", cfg.paths.to_string()),
        ("steps", cfg.steps.to_string()),
        ("maturity", cfg.maturity.to_string()),
        ("seed", cfg.seed.to_string()),
        ("elapsed_ms", format!("{:.3}", elapsed_ms)),
    ];

    if paths.len() > 1 {
        let estimated = path_statistics::log_return_correlation(&paths)?;
        let requested = cfg.correlation_matrix()?;
        writeln!(out)?;
        for i in 0..cfg.dimension() {
            for j in (i + 1)..cfg.dimension() {
                writeln!(
                    out,
                    "corr({}, {}) = {:.4} (requested {})",
                    cfg.labels[i],
                    cfg.labels[j],
                    estimated[(i, j)],
                    requested.get(i, j)
                )?;
            }
        }
        let deviation =
            path_statistics::max_abs_deviation(&estimated, requested.as_matrix());
        summary.push(("max_correlation_deviation", format!("{:.6}", deviation)));
    }
    out.flush()?;

    if let Some(csv) = &args.csv {
        output::write_path_to_csv(csv, first, &cfg.labels)
            .with_context(|| format!("writing {}", csv))?;
        info!(file = %csv, "path written");
    }
    if let Some(file) = &args.summary {
        output::write_summary_to_csv(file, &summary)
            .with_context(|| format!("writing {}", file))?;
        info!(file = %file, "summary written");
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
