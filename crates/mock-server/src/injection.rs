//! Artificial latency and random failures for the search route.

use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InjectionError {
    #[error("failure rate must be within 0.0..=1.0, got {0}")]
    InvalidFailureRate(f64),
    #[error("latency range is empty: min {min}ms > max {max}ms")]
    InvalidLatencyRange { min: u64, max: u64 },
}

/// What one request is subjected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Injected {
    pub delay: Duration,
    pub fail: bool,
}

/// Validated latency window and failure probability, plus the RNG drawing from them.
#[derive(Debug)]
pub struct FaultInjection {
    min_latency_ms: u64,
    max_latency_ms: u64,
    failure_rate: f64,
    rng: Mutex<StdRng>,
}

impl FaultInjection {
    /// Validate the settings; the latency range is inclusive on both ends and
    /// `failure_rate` must lie in `0.0..=1.0`.
    pub fn new(
        min_latency_ms: u64,
        max_latency_ms: u64,
        failure_rate: f64,
    ) -> Result<Self, InjectionError> {
        if !(0.0..=1.0).contains(&failure_rate) {
            return Err(InjectionError::InvalidFailureRate(failure_rate));
        }
        if min_latency_ms > max_latency_ms {
            return Err(InjectionError::InvalidLatencyRange {
                min: min_latency_ms,
                max: max_latency_ms,
            });
        }
        Ok(Self {
            min_latency_ms,
            max_latency_ms,
            failure_rate,
            rng: Mutex::new(StdRng::from_os_rng()),
        })
    }

    /// No latency and no failures.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            min_latency_ms: 0,
            max_latency_ms: 0,
            failure_rate: 0.0,
            rng: Mutex::new(StdRng::seed_from_u64(0)),
        }
    }

    /// Replace the RNG with a seeded one for reproducible runs.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    #[must_use]
    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    #[must_use]
    pub fn latency_range_ms(&self) -> (u64, u64) {
        (self.min_latency_ms, self.max_latency_ms)
    }

    /// Draw the delay and the failure decision for one request.
    pub fn draw(&self) -> Injected {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let delay_ms = if self.min_latency_ms == self.max_latency_ms {
            self.min_latency_ms
        } else {
            rng.random_range(self.min_latency_ms..=self.max_latency_ms)
        };
        let fail = self.failure_rate > 0.0 && rng.random_bool(self.failure_rate);
        Injected {
            delay: Duration::from_millis(delay_ms),
            fail,
        }
    }
}
