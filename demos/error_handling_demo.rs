// demos/error_handling_demo.rs
use gbm_paths::linalg::CorrelationMatrix;
use gbm_paths::mc::mc_engine::{simulate_single, SimulationConfig};
use gbm_paths::mc::path_generator::PathGenerator;
use gbm_paths::mc::path_simulator::PathSimulator;
use gbm_paths::models::correlated_gbm::CorrelatedGbm;
use gbm_paths::models::gbm::Gbm;
use gbm_paths::rng;
use gbm_paths::{SdeError, TimeGrid};
use std::sync::atomic::AtomicBool;

fn report<T>(result: Result<T, SdeError>) {
    match result {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }
}

fn main() {
    println!("Error Handling Demo for gbm-paths");
    println!("=================================\n");

    let params = [
        Gbm::new(1.0, 0.05, 0.2),
        Gbm::new(2.0, 0.03, 0.15),
        Gbm::new(3.0, 0.02, 0.1),
    ];
    let mut rng = rng::seed_rng_from_u64(1);

    println!("1. Zero time steps...");
    report(PathSimulator::simulate(
        &params,
        &CorrelationMatrix::identity(3),
        1.0,
        0,
        &mut rng,
    ));

    println!("\n2. Correlation entry outside [-1, 1]...");
    report(CorrelationMatrix::from_rows(&[
        vec![1.0, 2.0, 0.0],
        vec![2.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
    ]));

    println!("\n3. Correlation matrix that is not positive semi-definite...");
    let indefinite = CorrelationMatrix::from_rows(&[
        vec![1.0, 0.9, -0.9],
        vec![0.9, 1.0, 0.9],
        vec![-0.9, 0.9, 1.0],
    ])
    .expect("entries are individually valid");
    report(PathSimulator::simulate(&params, &indefinite, 1.0, 10, &mut rng));

    println!("\n4. Two processes for a 3x3 correlation matrix...");
    report(PathSimulator::simulate(
        &params[..2],
        &CorrelationMatrix::identity(3),
        1.0,
        10,
        &mut rng,
    ));

    println!("\n5. Negative volatility in a configuration...");
    let mut cfg = SimulationConfig::default();
    cfg.processes[1].sigma = -0.15;
    report(simulate_single(&cfg));

    println!("\n6. Drift large enough to overflow f64...");
    let process = CorrelatedGbm::uncorrelated(vec![Gbm::new(1.0, 1_000.0, 0.0)])
        .expect("Valid parameters");
    let generator = PathGenerator::new(process, TimeGrid::uniform(1.0, 4).expect("Valid grid"));
    report(generator.next(&mut rng));

    println!("\n7. Cancellation requested before the first step...");
    let cancel = AtomicBool::new(true);
    report(PathSimulator::simulate_cancellable(
        &params,
        &CorrelationMatrix::identity(3),
        1.0,
        100,
        &mut rng,
        &cancel,
    ));

    println!("\n8. Perfect correlation is accepted (semi-definite)...");
    match PathSimulator::simulate(
        &params,
        &CorrelationMatrix::constant(3, 1.0).expect("Valid correlation"),
        1.0,
        10,
        &mut rng,
    ) {
        Ok(path) => println!("   ✓ Simulated {} points", path.len()),
        Err(e) => println!("   Error: {}", e),
    }
}
