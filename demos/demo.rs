// demos/demo.rs
use gbm_paths::analytics::path_statistics;
use gbm_paths::linalg::CorrelationMatrix;
use gbm_paths::math_utils::Timer;
use gbm_paths::mc::mc_engine::{simulate_paths, SimulationConfig};
use gbm_paths::mc::path_simulator::PathSimulator;
use gbm_paths::models::gbm::Gbm;
use gbm_paths::output;
use gbm_paths::rng;

fn main() {
    println!("Correlated GBM demo");
    println!("===================\n");

    // Three assets, independent dimensions, one year in 100 steps
    let params = [
        Gbm::new(1.0, 0.05, 0.2),
        Gbm::new(2.0, 0.03, 0.15),
        Gbm::new(3.0, 0.02, 0.1),
    ];
    let labels = vec!["x".to_string(), "y".to_string(), "z".to_string()];
    let mut rng = rng::seed_rng_from_u64(42);

    let path = PathSimulator::simulate(&params, &CorrelationMatrix::identity(3), 1.0, 100, &mut rng)
        .expect("Valid configuration");
    let stdout = std::io::stdout();
    output::write_path(&mut stdout.lock(), &path, &labels).expect("stdout is writable");

    // Same assets with a full correlation structure, many paths in parallel
    println!("\nCorrelation recovery over 10,000 paths");
    let cfg = SimulationConfig {
        paths: 10_000,
        steps: 100,
        seed: 7,
        correlation: vec![
            vec![1.0, 0.8, 0.3],
            vec![0.8, 1.0, 0.5],
            vec![0.3, 0.5, 1.0],
        ],
        ..Default::default()
    };

    let mut timer = Timer::new();
    timer.start();
    let paths = simulate_paths(&cfg).expect("Valid configuration");
    let elapsed = timer.elapsed_ms();

    let estimated = path_statistics::log_return_correlation(&paths).expect("non-empty batch");
    let means = path_statistics::terminal_mean(&paths).expect("non-empty batch");
    println!("Simulated {} paths in {:.1} ms", paths.len(), elapsed);
    println!("Empirical log-return correlation:{}", estimated);
    for (d, process) in cfg.processes.iter().enumerate() {
        println!(
            "{}: E[S_T] = {:.5}, simulated mean = {:.5}",
            cfg.labels[d],
            process.expected_value(cfg.maturity),
            means[d]
        );
    }
}
