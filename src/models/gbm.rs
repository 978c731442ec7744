// src/models/gbm.rs
use super::model::{LogSDEModel, SDEModel};
use crate::error::{validation::*, SdeResult};
use serde::{Deserialize, Serialize};
use std::f64;

/// One geometric Brownian motion dimension
///
/// ```text
/// dS_t = μ S_t dt + σ S_t dW_t
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gbm {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(s0: f64, mu: f64, sigma: f64) -> Self {
        Gbm { s0, mu, sigma }
    }

    pub fn validate(&self) -> SdeResult<()> {
        validate_finite("s0", self.s0)?;
        validate_positive("s0", self.s0)?;
        validate_finite("mu", self.mu)?;
        validate_finite("sigma", self.sigma)?;
        validate_non_negative("sigma", self.sigma)?;
        Ok(())
    }

    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        s_t * ((self.mu - 0.5 * self.sigma * self.sigma) * dt
            + self.sigma * dt.sqrt() * normal_draw)
            .exp()
    }

    /// E[S_t] = S_0 e^{μt}; also the whole path when σ = 0
    pub fn expected_value(&self, t: f64) -> f64 {
        self.s0 * (self.mu * t).exp()
    }

    pub fn is_deterministic(&self) -> bool {
        self.sigma == 0.0
    }
}

impl SDEModel for Gbm {
    fn drift(&self, s: f64, _t: f64) -> f64 {
        self.mu * s
    }

    fn diffusion(&self, s: f64, _t: f64) -> f64 {
        self.sigma * s
    }
}

impl LogSDEModel for Gbm {
    fn log_drift(&self) -> f64 {
        self.mu - 0.5 * self.sigma * self.sigma
    }

    fn log_diffusion(&self) -> f64 {
        self.sigma
    }
}
