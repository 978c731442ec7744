// src/mc/path_generator.rs
//! Path generation for correlated geometric Brownian motion
//!
//! # Algorithm
//!
//! For each grid step i = 1..n with Δt_i = t_i - t_{i-1}:
//! 1. Draw D independent standard normals z
//! 2. Correlate: c = L z
//! 3. Update each dimension in log space:
//!    `Y_d += (μ_d - σ_d²/2) Δt_i + σ_d √Δt_i c_d`
//! 4. Record `S_d = exp(Y_d)`
//!
//! Log-space accumulation avoids repeated multiplication error and keeps
//! every value strictly positive.

use crate::error::{SdeError, SdeResult};
use crate::grid::TimeGrid;
use crate::math_utils::checked_exp;
use crate::models::correlated_gbm::CorrelatedGbm;
use crate::path::MultiPath;
use crate::rng::NormalSource;
use crate::solvers::euler_maruyama::EulerMaruyama;
use bitflags::bitflags;
use ndarray::Array2;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

bitflags! {
    /// Numeric checks applied after every step
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PathChecks: u32 {
        const NONE      = 0;
        /// exp(Y) became +∞
        const OVERFLOW  = 1 << 0;
        /// exp(Y) underflowed to 0
        const UNDERFLOW = 1 << 1;
    }
}

impl Default for PathChecks {
    fn default() -> Self {
        PathChecks::OVERFLOW | PathChecks::UNDERFLOW
    }
}

/// Generator bound to one process and one grid
///
/// Holds no randomness of its own: every call to [`PathGenerator::next`]
/// consumes draws from the caller's source and returns a fresh path. The
/// grid is shared with every path it produces.
#[derive(Debug, Clone)]
pub struct PathGenerator {
    process: CorrelatedGbm,
    grid: Arc<TimeGrid>,
    checks: PathChecks,
}

impl PathGenerator {
    pub fn new(process: CorrelatedGbm, grid: TimeGrid) -> Self {
        PathGenerator {
            process,
            grid: Arc::new(grid),
            checks: PathChecks::default(),
        }
    }

    pub fn with_checks(mut self, checks: PathChecks) -> Self {
        self.checks = checks;
        self
    }

    pub fn process(&self) -> &CorrelatedGbm {
        &self.process
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn checks(&self) -> PathChecks {
        self.checks
    }

    pub fn next<N: NormalSource + ?Sized>(&self, rng: &mut N) -> SdeResult<MultiPath> {
        self.generate(rng, None)
    }

    /// Like [`PathGenerator::next`], aborting with [`SdeError::Cancelled`]
    /// once `cancel` is set. The flag is read before every step.
    pub fn next_cancellable<N: NormalSource + ?Sized>(
        &self,
        rng: &mut N,
        cancel: &AtomicBool,
    ) -> SdeResult<MultiPath> {
        self.generate(rng, Some(cancel))
    }

    fn generate<N: NormalSource + ?Sized>(
        &self,
        rng: &mut N,
        cancel: Option<&AtomicBool>,
    ) -> SdeResult<MultiPath> {
        let dim = self.process.dimension();
        let steps = self.grid.steps();
        debug!(dimension = dim, steps, "generating path");

        let mut values = Array2::<f64>::zeros((self.grid.len(), dim));
        let initial = self.process.initial_values();
        let mut log_state: Vec<f64> = initial.iter().map(|s| s.ln()).collect();
        for (d, &s0) in initial.iter().enumerate() {
            values[[0, d]] = s0;
        }

        let mut independent = vec![0.0; dim];
        let mut correlated = vec![0.0; dim];

        for i in 1..=steps {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    debug!(completed_steps = i - 1, steps, "path generation cancelled");
                    return Err(SdeError::Cancelled {
                        completed_steps: i - 1,
                        steps,
                    });
                }
            }

            EulerMaruyama::correlated_log_step(
                &self.process,
                &mut log_state,
                self.grid.dt(i),
                &mut independent,
                &mut correlated,
                rng,
            );

            for (d, &y) in log_state.iter().enumerate() {
                values[[i, d]] = self.value_from_log(y, d, i)?;
            }
        }

        trace!(terminal = ?values.row(steps).to_vec(), "path complete");
        Ok(MultiPath::new(Arc::clone(&self.grid), values))
    }

    fn value_from_log(&self, log_value: f64, dimension: usize, step: usize) -> SdeResult<f64> {
        let overflow = SdeError::NumericOverflow {
            dimension,
            step,
            log_value,
        };
        match checked_exp(log_value) {
            Some(v) => Ok(v),
            None if log_value.is_nan() => Err(overflow),
            None if log_value > 0.0 && self.checks.contains(PathChecks::OVERFLOW) => Err(overflow),
            None if log_value < 0.0 && self.checks.contains(PathChecks::UNDERFLOW) => {
                Err(overflow)
            }
            None => Ok(log_value.exp()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::CorrelationMatrix;
    use crate::models::gbm::Gbm;
    use crate::rng::seed_rng_from_u64;
    use approx::assert_relative_eq;

    struct Scripted(Vec<f64>, usize);

    impl NormalSource for Scripted {
        fn next_standard_normal(&mut self) -> f64 {
            let z = self.0[self.1 % self.0.len()];
            self.1 += 1;
            z
        }
    }

    fn generator(steps: usize) -> PathGenerator {
        let process = CorrelatedGbm::uncorrelated(vec![
            Gbm::new(1.0, 0.05, 0.2),
            Gbm::new(2.0, 0.03, 0.15),
        ])
        .unwrap();
        PathGenerator::new(process, TimeGrid::uniform(1.0, steps).unwrap())
    }

    #[test]
    fn test_scripted_draws_follow_log_recursion() {
        let pg = generator(2);
        let path = pg.next(&mut Scripted(vec![1.0, -1.0], 0)).unwrap();

        let dt: f64 = 0.5;
        let y0 = (0.05 - 0.02) * dt + 0.2 * dt.sqrt();
        let y1 = 2.0f64.ln() + (0.03 - 0.5 * 0.0225) * dt - 0.15 * dt.sqrt();
        assert_relative_eq!(path.value(1, 0), y0.exp(), epsilon = 1e-14);
        assert_relative_eq!(path.value(1, 1), y1.exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_cancelled_before_first_step() {
        let pg = generator(10);
        let cancel = AtomicBool::new(true);
        let err = pg
            .next_cancellable(&mut seed_rng_from_u64(1), &cancel)
            .unwrap_err();
        assert_eq!(
            err,
            SdeError::Cancelled {
                completed_steps: 0,
                steps: 10
            }
        );
    }

    #[test]
    fn test_uncancelled_flag_matches_plain_generation() {
        let pg = generator(25);
        let cancel = AtomicBool::new(false);
        let a = pg.next(&mut seed_rng_from_u64(9)).unwrap();
        let b = pg
            .next_cancellable(&mut seed_rng_from_u64(9), &cancel)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_overflow_detected() {
        let process =
            CorrelatedGbm::new(vec![Gbm::new(1.0, 800.0, 0.0)], CorrelationMatrix::identity(1))
                .unwrap();
        let pg = PathGenerator::new(process, TimeGrid::uniform(1.0, 1).unwrap());
        let err = pg.next(&mut seed_rng_from_u64(1)).unwrap_err();
        assert!(matches!(
            err,
            SdeError::NumericOverflow {
                dimension: 0,
                step: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_overflow_check_can_be_disabled() {
        let process =
            CorrelatedGbm::new(vec![Gbm::new(1.0, 800.0, 0.0)], CorrelationMatrix::identity(1))
                .unwrap();
        let pg = PathGenerator::new(process, TimeGrid::uniform(1.0, 1).unwrap())
            .with_checks(PathChecks::NONE);
        let path = pg.next(&mut seed_rng_from_u64(1)).unwrap();
        assert!(path.value(1, 0).is_infinite());
    }

    #[test]
    fn test_paths_share_the_generator_grid() {
        let pg = generator(5);
        let mut rng = seed_rng_from_u64(3);
        let a = pg.next(&mut rng).unwrap();
        let b = pg.next(&mut rng).unwrap();
        assert!(std::ptr::eq(a.grid(), b.grid()));
        assert!(std::ptr::eq(a.grid(), pg.grid()));
    }

    #[test]
    fn test_underflow_check_can_be_disabled() {
        let process =
            CorrelatedGbm::new(vec![Gbm::new(1.0, -800.0, 0.0)], CorrelationMatrix::identity(1))
                .unwrap();
        let pg = PathGenerator::new(process, TimeGrid::uniform(1.0, 1).unwrap())
            .with_checks(PathChecks::OVERFLOW);
        let path = pg.next(&mut seed_rng_from_u64(1)).unwrap();
        assert_eq!(path.value(1, 0), 0.0);

        let pg = pg.with_checks(PathChecks::NONE);
        let path = pg.next(&mut seed_rng_from_u64(1)).unwrap();
        assert_eq!(path.value(1, 0), 0.0);
    }

    #[test]
    fn test_underflow_detected() {
        let process =
            CorrelatedGbm::new(vec![Gbm::new(1.0, -800.0, 0.0)], CorrelationMatrix::identity(1))
                .unwrap();
        let pg = PathGenerator::new(process, TimeGrid::uniform(1.0, 1).unwrap());
        assert!(matches!(
            pg.next(&mut seed_rng_from_u64(1)),
            Err(SdeError::NumericOverflow { .. })
        ));
    }
}
