// tests/integration_test.rs
use approx::assert_relative_eq;
use gbm_paths::analytics::path_statistics;
use gbm_paths::linalg::CorrelationMatrix;
use gbm_paths::mc::path_simulator::PathSimulator;
use gbm_paths::models::gbm::Gbm;
use gbm_paths::rng::{self, NormalSource};
use gbm_paths::{SdeError, TimeGrid};
use proptest::prelude::*;

fn reference_params() -> Vec<Gbm> {
    vec![
        Gbm::new(1.0, 0.05, 0.2),
        Gbm::new(2.0, 0.03, 0.15),
        Gbm::new(3.0, 0.02, 0.1),
    ]
}

/// Draws that would blow up any diffusion term they touch
struct Extreme;

impl NormalSource for Extreme {
    fn next_standard_normal(&mut self) -> f64 {
        1e6
    }
}

#[test]
fn test_reference_scenario() {
    let mut rng = rng::seed_rng_from_u64(2024);
    let path = PathSimulator::simulate(
        &reference_params(),
        &CorrelationMatrix::identity(3),
        1.0,
        100,
        &mut rng,
    )
    .expect("Valid configuration");

    assert_eq!(path.len(), 101);
    assert_eq!(path.dimension(), 3);
    assert_eq!(path.initial().to_vec(), vec![1.0, 2.0, 3.0]);
    assert_eq!(path.times()[0], 0.0);
    assert_eq!(path.times()[100], 1.0);
    for v in path.values().iter() {
        assert!(v.is_finite() && *v > 0.0, "value {} is not positive and finite", v);
    }
}

#[test]
fn test_same_seed_gives_identical_paths() {
    let params = reference_params();
    let corr = CorrelationMatrix::constant(3, 0.4).unwrap();

    let a = PathSimulator::simulate(&params, &corr, 2.0, 64, &mut rng::seed_rng_from_u64(99))
        .unwrap();
    let b = PathSimulator::simulate(&params, &corr, 2.0, 64, &mut rng::seed_rng_from_u64(99))
        .unwrap();

    for (x, y) in a.values().iter().zip(b.values().iter()) {
        assert_eq!(x.to_bits(), y.to_bits());
    }

    let c = PathSimulator::simulate(&params, &corr, 2.0, 64, &mut rng::seed_rng_from_u64(100))
        .unwrap();
    assert_ne!(a, c);
}

#[test]
fn test_zero_volatility_matches_analytic_drift() {
    let params = vec![
        Gbm::new(1.0, 0.05, 0.0),
        Gbm::new(2.0, 0.03, 0.0),
        Gbm::new(3.0, -0.02, 0.0),
    ];
    let corr = CorrelationMatrix::from_rows(&[
        vec![1.0, 0.3, 0.1],
        vec![0.3, 1.0, 0.2],
        vec![0.1, 0.2, 1.0],
    ])
    .unwrap();

    // the random source must not matter: compare a seeded run with absurd draws
    let seeded =
        PathSimulator::simulate(&params, &corr, 1.0, 100, &mut rng::seed_rng_from_u64(1)).unwrap();
    let extreme = PathSimulator::simulate(&params, &corr, 1.0, 100, &mut Extreme).unwrap();
    assert_eq!(seeded, extreme);

    let expected = path_statistics::deterministic_path(&params, seeded.grid());
    for i in 0..seeded.len() {
        for d in 0..3 {
            assert_relative_eq!(
                seeded.value(i, d),
                expected[[i, d]],
                max_relative = 1e-12
            );
        }
    }
}

#[test]
fn test_invalid_inputs() {
    let params = reference_params();
    let mut rng = rng::seed_rng_from_u64(1);

    let err = PathSimulator::simulate(&params, &CorrelationMatrix::identity(3), 1.0, 0, &mut rng)
        .unwrap_err();
    assert!(matches!(err, SdeError::InvalidParameter { .. }), "{:?}", err);

    let err = CorrelationMatrix::from_rows(&[
        vec![1.0, 2.0, 0.0],
        vec![2.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
    ])
    .unwrap_err();
    assert!(matches!(err, SdeError::InvalidCorrelation { .. }), "{:?}", err);

    let err = PathSimulator::simulate(
        &params[..2],
        &CorrelationMatrix::identity(3),
        1.0,
        10,
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(err, SdeError::InvalidParameter { .. }), "{:?}", err);

    let mut negative_vol = params.clone();
    negative_vol[0].sigma = -0.2;
    let err = PathSimulator::simulate(
        &negative_vol,
        &CorrelationMatrix::identity(3),
        1.0,
        10,
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(err, SdeError::InvalidParameter { .. }), "{:?}", err);
}

#[test]
fn test_not_positive_semi_definite_correlation() {
    let corr = CorrelationMatrix::from_rows(&[
        vec![1.0, 0.95, -0.95],
        vec![0.95, 1.0, 0.95],
        vec![-0.95, 0.95, 1.0],
    ])
    .expect("entries are individually valid");

    let err = PathSimulator::simulate(
        &reference_params(),
        &corr,
        1.0,
        10,
        &mut rng::seed_rng_from_u64(3),
    )
    .unwrap_err();
    assert!(matches!(err, SdeError::InvalidCorrelation { .. }), "{:?}", err);
}

#[test]
fn test_non_uniform_grid_zero_volatility() {
    use gbm_paths::mc::path_generator::PathGenerator;
    use gbm_paths::models::correlated_gbm::CorrelatedGbm;

    let grid = TimeGrid::from_times(vec![0.0, 0.01, 0.25, 0.26, 1.5]).unwrap();
    let params = vec![Gbm::new(4.0, 0.1, 0.0)];
    let process = CorrelatedGbm::uncorrelated(params.clone()).unwrap();
    let path = PathGenerator::new(process, grid.clone())
        .next(&mut rng::seed_rng_from_u64(0))
        .unwrap();

    assert_eq!(path.times(), grid.times());
    for (i, &t) in grid.times().iter().enumerate() {
        assert_relative_eq!(path.value(i, 0), 4.0 * (0.1 * t).exp(), max_relative = 1e-12);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_path_shape_and_positivity(
        s0 in 0.01f64..1_000.0,
        mu in -0.5f64..0.5,
        sigma in 0.0f64..1.5,
        rho in -0.99f64..0.99,
        maturity in 0.01f64..10.0,
        steps in 1usize..200,
        seed in any::<u64>(),
    ) {
        let params = [Gbm::new(s0, mu, sigma), Gbm::new(2.0 * s0, -mu, sigma * 0.5)];
        let corr = CorrelationMatrix::constant(2, rho).unwrap();
        let path = PathSimulator::simulate(
            &params,
            &corr,
            maturity,
            steps,
            &mut rng::seed_rng_from_u64(seed),
        ).unwrap();

        prop_assert_eq!(path.len(), steps + 1);
        prop_assert_eq!(path.value(0, 0), s0);
        prop_assert_eq!(path.value(0, 1), 2.0 * s0);
        prop_assert_eq!(path.grid().maturity(), maturity);
        for v in path.values().iter() {
            prop_assert!(v.is_finite() && *v > 0.0);
        }
    }
}
