//! In-memory endpoint with scripted replies for controller tests.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use crate::endpoint::SearchEndpoint;
use crate::error::SearchError;

#[derive(Debug, Clone)]
struct Step {
    delay: Duration,
    result: Result<Vec<String>, SearchError>,
}

#[derive(Debug, Default)]
struct Script {
    steps: HashMap<String, VecDeque<Step>>,
    fallback: Option<Step>,
    calls: Vec<String>,
}

/// Replies are queued per query; the last queued reply for a query repeats.
/// Unscripted queries use the fallback, or an empty result set.
#[derive(Debug, Default)]
pub(crate) struct ScriptedEndpoint {
    script: Mutex<Script>,
}

impl ScriptedEndpoint {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(self, query: &str, delay: Duration, result: Result<Vec<String>, SearchError>) -> Self {
        self.script
            .lock()
            .unwrap()
            .steps
            .entry(query.to_string())
            .or_default()
            .push_back(Step { delay, result });
        self
    }

    pub(crate) fn respond<const N: usize>(self, query: &str, results: [&str; N]) -> Self {
        self.respond_after(query, Duration::ZERO, results)
    }

    pub(crate) fn respond_after<const N: usize>(
        self,
        query: &str,
        delay: Duration,
        results: [&str; N],
    ) -> Self {
        let results = results.iter().map(|r| r.to_string()).collect();
        self.push(query, delay, Ok(results))
    }

    pub(crate) fn fail(self, query: &str, error: SearchError) -> Self {
        self.push(query, Duration::ZERO, Err(error))
    }

    pub(crate) fn fallback_error(self, error: SearchError) -> Self {
        self.script.lock().unwrap().fallback = Some(Step {
            delay: Duration::ZERO,
            result: Err(error),
        });
        self
    }

    /// Queries received so far, in order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.script.lock().unwrap().calls.clone()
    }

    fn next_step(&self, query: &str) -> Step {
        let mut script = self.script.lock().unwrap();
        script.calls.push(query.to_string());
        let fallback = script.fallback.clone();
        match script.steps.get_mut(query) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => fallback.unwrap_or(Step {
                delay: Duration::ZERO,
                result: Ok(Vec::new()),
            }),
        }
    }
}

impl SearchEndpoint for ScriptedEndpoint {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<String>, SearchError>> + Send {
        let step = self.next_step(query);
        async move {
            if !step.delay.is_zero() {
                tokio::time::sleep(step.delay).await;
            }
            step.result
        }
    }
}

/// Assert `started` is `expected` in the past, allowing for timer tick rounding.
pub(crate) fn assert_elapsed(started: Instant, expected: Duration) {
    let elapsed = started.elapsed();
    assert!(
        elapsed >= expected && elapsed <= expected + Duration::from_millis(10),
        "expected about {expected:?} to have elapsed, got {elapsed:?}"
    );
}
