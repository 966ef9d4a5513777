//! One request pipeline: timed-out attempts with linear backoff between them.

use std::time::Duration;

use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, warn};

use super::options::RetryPolicy;
use crate::endpoint::SearchEndpoint;
use crate::error::SearchError;

/// Final result of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Found {
        results: Vec<String>,
        /// Wall-clock time of the successful attempt.
        latency: Duration,
    },
    Failed(SearchError),
}

pub(crate) async fn run<E: SearchEndpoint>(endpoint: &E, query: &str, policy: RetryPolicy) -> Outcome {
    let mut attempt = 0;
    loop {
        let started = Instant::now();
        let result = match timeout(policy.timeout, endpoint.search(query)).await {
            Ok(result) => result,
            Err(_) => Err(SearchError::TimeoutExceeded),
        };

        match result {
            Ok(results) => {
                let latency = started.elapsed();
                debug!(%query, attempt, count = results.len(), ?latency, "search succeeded");
                return Outcome::Found { results, latency };
            }
            Err(error) if attempt < policy.retries => {
                attempt += 1;
                let delay = policy.delay_before(attempt);
                warn!(%query, attempt, ?delay, %error, "search attempt failed, retrying");
                sleep(delay).await;
            }
            Err(error) => {
                warn!(%query, attempts = attempt + 1, ?error, "search failed");
                return Outcome::Failed(error);
            }
        }
    }
}
