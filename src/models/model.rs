// src/models/model.rs
pub trait SDEModel {
    fn drift(&self, s: f64, t: f64) -> f64;
    fn diffusion(&self, s: f64, t: f64) -> f64;
}

/// Models whose logarithm has constant coefficients
///
/// ```text
/// d(ln X_t) = m dt + v dW_t
/// ```
pub trait LogSDEModel: SDEModel {
    fn log_drift(&self) -> f64;
    fn log_diffusion(&self) -> f64;
}
