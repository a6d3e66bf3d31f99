//! Per-widget animation clock.

/// Monotonic start timestamp. All timestamps are host milliseconds
/// (`performance.now()` in the browser).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    start_ms: f64,
}

impl Clock {
    pub fn started_at(start_ms: f64) -> Self {
        Self { start_ms }
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    /// Milliseconds since the clock started. Never negative, so a host clock
    /// that reports an earlier timestamp than the start reads as zero.
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.start_ms).max(0.0)
    }
}
