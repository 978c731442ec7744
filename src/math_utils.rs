// src/math_utils.rs

/// `e^x` if it is a positive finite f64
pub fn checked_exp(x: f64) -> Option<f64> {
    let v = x.exp();
    if v.is_finite() && v > 0.0 {
        Some(v)
    } else {
        None
    }
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
