// scripts/benchmark.rs
use anyhow::{Context, Result};
use chrono::Utc;
use gbm_paths::analytics::path_statistics;
use gbm_paths::linalg::CorrelationMatrix;
use gbm_paths::math_utils::Timer;
use gbm_paths::mc::mc_engine::{simulate_paths, SimulationConfig};
use gbm_paths::models::gbm::Gbm;
use std::env;
use std::fs::File;
use std::io::Write;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    physical_cores: usize,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            physical_cores: num_cpus::get_physical(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    paths: usize,
    steps: usize,
    dimension: usize,
    time_ms: f64,
    throughput_paths_per_sec: f64,
    correlation_deviation: f64,
}

fn config(dimension: usize, rho: f64, paths: usize, steps: usize) -> Result<SimulationConfig> {
    let processes = (0..dimension)
        .map(|d| Gbm::new(1.0 + d as f64, 0.05 - 0.01 * d as f64, 0.1 + 0.05 * d as f64))
        .collect();
    Ok(SimulationConfig {
        paths,
        steps,
        maturity: 1.0,
        seed: 42,
        labels: (0..dimension).map(|d| format!("s{}", d)).collect(),
        processes,
        correlation: CorrelationMatrix::constant(dimension, rho)?.to_rows(),
    })
}

fn run_batch_benchmarks() -> Result<Vec<BenchmarkResult>> {
    let mut results = Vec::new();

    for &(dimension, rho) in &[(3, 0.0), (3, 0.5), (10, 0.3)] {
        for &paths in &[1_000, 10_000, 100_000] {
            let steps = 252;
            println!(
                "Running {}-dimensional batch (rho = {}) with {} paths...",
                dimension, rho, paths
            );
            let cfg = config(dimension, rho, paths, steps)?;

            let mut timer = Timer::new();
            timer.start();
            let simulated = simulate_paths(&cfg)?;
            let time_ms = timer.elapsed_ms();

            let estimated = path_statistics::log_return_correlation(&simulated)?;
            let requested = cfg.correlation_matrix()?;

            results.push(BenchmarkResult {
                name: format!("{}D rho={} ({}k paths)", dimension, rho, paths / 1000),
                paths,
                steps,
                dimension,
                time_ms,
                throughput_paths_per_sec: paths as f64 / (time_ms / 1000.0),
                correlation_deviation: path_statistics::max_abs_deviation(
                    &estimated,
                    requested.as_matrix(),
                ),
            });
        }
    }

    Ok(results)
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> Result<()> {
    let mut file = File::create(filename).with_context(|| format!("creating {}", filename))?;

    writeln!(file, "# Generated: {}", Utc::now().to_rfc3339())?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(
        file,
        "# CPU Cores: {} logical / {} physical",
        system_info.cpu_cores, system_info.physical_cores
    )?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(
        file,
        "name,paths,steps,dimension,time_ms,paths_per_sec,max_correlation_deviation"
    )?;
    for r in results {
        writeln!(
            file,
            "{},{},{},{},{:.3},{:.1},{:.6}",
            r.name,
            r.paths,
            r.steps,
            r.dimension,
            r.time_ms,
            r.throughput_paths_per_sec,
            r.correlation_deviation
        )?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let system_info = SystemInfo::gather();
    println!("gbm-paths benchmark");
    println!("===================");
    println!("{:#?}\n", system_info);

    let results = run_batch_benchmarks()?;

    println!(
        "\n{:<28} {:>10} {:>14} {:>12}",
        "Benchmark", "Time (ms)", "Paths/sec", "Corr. dev."
    );
    for r in &results {
        println!(
            "{:<28} {:>10.2} {:>14.0} {:>12.5}",
            r.name, r.time_ms, r.throughput_paths_per_sec, r.correlation_deviation
        );
    }

    let filename = env::args()
        .nth(1)
        .unwrap_or_else(|| "benchmark_results.csv".to_string());
    write_results_to_csv(&results, &system_info, &filename)?;
    println!("\nResults written to {}", filename);
    Ok(())
}
