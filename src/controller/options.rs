use std::time::Duration;

/// Timeout and retry behaviour of one request pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Hard limit for a single attempt.
    pub timeout: Duration,
    /// Additional attempts after the first failure.
    pub retries: u32,
    /// Base backoff; retry `n` waits `backoff * n`.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            retries: 2,
            backoff: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay before the `attempt`-th retry (1-based).
    #[must_use]
    pub fn delay_before(&self, attempt: u32) -> Duration {
        self.backoff * attempt
    }
}

/// Construction-time options for a [`SearchController`](super::SearchController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub placeholder: String,
    pub debounce: Duration,
    pub debug: bool,
    pub retry: RetryPolicy,
    /// Delay between losing focus and closing the dropdown.
    pub blur_grace: Duration,
    pub toast_duration: Duration,
    /// Lifetime error count at which the toast starts showing.
    pub toast_threshold: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            placeholder: "Search fruits...".to_string(),
            debounce: Duration::from_millis(300),
            debug: false,
            retry: RetryPolicy::default(),
            blur_grace: Duration::from_millis(200),
            toast_duration: Duration::from_millis(5000),
            toast_threshold: 3,
        }
    }
}

impl SearchOptions {
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
