pub mod correlated_gbm;
pub mod gbm;
pub mod model;
