// src/grid.rs
use crate::error::{validation::*, SdeError, SdeResult};
use std::ops::Index;

/// Ordered simulation times starting at 0
///
/// Strictly increasing after the initial point; the last point is the
/// maturity.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<f64>,
}

impl TimeGrid {
    /// `steps + 1` equally spaced points on `[0, maturity]`
    pub fn uniform(maturity: f64, steps: usize) -> SdeResult<Self> {
        validate_finite("maturity", maturity)?;
        validate_positive("maturity", maturity)?;
        validate_steps(steps)?;

        // (i / n) is exactly 1 at i = n, so the last point is exactly T
        let times = (0..=steps)
            .map(|i| maturity * (i as f64 / steps as f64))
            .collect::<Vec<_>>();

        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SdeError::invalid_parameter(
                "steps",
                format!("{} steps are too fine to resolve maturity {}", steps, maturity),
            ));
        }

        Ok(TimeGrid { times })
    }

    /// Grid from explicit times; the first must be 0
    pub fn from_times(times: Vec<f64>) -> SdeResult<Self> {
        if times.len() < 2 {
            return Err(SdeError::invalid_parameter(
                "times",
                "a grid needs the initial point and at least one step",
            ));
        }
        if times[0] != 0.0 {
            return Err(SdeError::invalid_parameter(
                "times",
                format!("grid must start at 0, got {}", times[0]),
            ));
        }
        for (i, w) in times.windows(2).enumerate() {
            validate_finite("times", w[1])?;
            if w[1] <= w[0] {
                return Err(SdeError::invalid_parameter(
                    "times",
                    format!(
                        "grid must be strictly increasing, t[{}] = {} ≤ t[{}] = {}",
                        i + 1,
                        w[1],
                        i,
                        w[0]
                    ),
                ));
            }
        }
        Ok(TimeGrid { times })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of grid points, including t = 0
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn steps(&self) -> usize {
        self.times.len() - 1
    }

    pub fn maturity(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Length of step `i` (1-based), `t[i] - t[i-1]`
    pub fn dt(&self, i: usize) -> f64 {
        self.times[i] - self.times[i - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.times.iter()
    }
}

impl Index<usize> for TimeGrid {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.times[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_grid() {
        let grid = TimeGrid::uniform(1.0, 100).unwrap();
        assert_eq!(grid.len(), 101);
        assert_eq!(grid.steps(), 100);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid.maturity(), 1.0);
        assert_relative_eq!(grid[50], 0.5, epsilon = 1e-15);
        for i in 1..=100 {
            assert_relative_eq!(grid.dt(i), 0.01, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_uniform_last_point_is_maturity() {
        for &(t, n) in &[(0.7, 3), (2.5, 7), (1.0 / 3.0, 11)] {
            let grid = TimeGrid::uniform(t, n).unwrap();
            assert_eq!(grid.maturity(), t);
        }
    }

    #[test]
    fn test_invalid_uniform_inputs() {
        assert!(matches!(
            TimeGrid::uniform(1.0, 0),
            Err(SdeError::InvalidParameter { .. })
        ));
        assert!(TimeGrid::uniform(0.0, 10).is_err());
        assert!(TimeGrid::uniform(-1.0, 10).is_err());
        assert!(TimeGrid::uniform(f64::NAN, 10).is_err());
    }

    #[test]
    fn test_from_times() {
        let grid = TimeGrid::from_times(vec![0.0, 0.1, 0.5, 1.0]).unwrap();
        assert_eq!(grid.steps(), 3);
        assert_relative_eq!(grid.dt(2), 0.4, epsilon = 1e-15);

        assert!(TimeGrid::from_times(vec![0.0]).is_err());
        assert!(TimeGrid::from_times(vec![0.1, 0.5]).is_err());
        assert!(TimeGrid::from_times(vec![0.0, 0.5, 0.5]).is_err());
        assert!(TimeGrid::from_times(vec![0.0, 0.5, f64::INFINITY]).is_err());
    }
}
