//! Search orchestration for the search box.
//!
//! [`SearchController`] is the single owner of all search state. Input and
//! key handlers mutate it directly; everything asynchronous (the debounce
//! window, request pipelines, the blur grace period and the toast timer) runs
//! on spawned tasks that only send [`Signal`]s back. The embedder drives the
//! controller by awaiting [`SearchController::process_next`] or by draining
//! with [`SearchController::pump`], so state is only ever touched from one
//! logical thread of control.
//!
//! Each dispatched pipeline carries a generation number. Dispatching again
//! aborts the previous pipeline and bumps the generation, so a response that
//! was already queued for an older query is discarded when it is applied.

mod navigation;
mod options;
mod pipeline;
mod state;
mod timer;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, trace};

use crate::endpoint::SearchEndpoint;

pub use navigation::{NavKey, Navigator};
pub use options::{RetryPolicy, SearchOptions};
pub use state::{ErrorState, SearchState};

use navigation::NavEffect;
use pipeline::Outcome;
use timer::{AbortOnDrop, Ticket, TimerSlot};

/// Messages from spawned tasks back to the controller.
#[derive(Debug)]
pub(crate) enum Signal {
    Settled(Ticket),
    Resolved { generation: u64, outcome: Outcome },
    BlurElapsed(Ticket),
    ToastElapsed(Ticket),
}

type SelectionHandler = Box<dyn FnMut(&str) + Send>;

pub struct SearchController<E: SearchEndpoint> {
    endpoint: Arc<E>,
    options: SearchOptions,
    state: SearchState,
    signals: UnboundedSender<Signal>,
    inbox: UnboundedReceiver<Signal>,
    debounce: TimerSlot,
    blur: TimerSlot,
    toast: TimerSlot,
    generation: u64,
    flight: Option<AbortOnDrop>,
    last_settled: Option<String>,
    on_select: Option<SelectionHandler>,
}

impl<E: SearchEndpoint> SearchController<E> {
    /// Create a controller. Must be called within a tokio runtime.
    pub fn new(endpoint: impl Into<Arc<E>>, options: SearchOptions) -> Self {
        let (signals, inbox) = mpsc::unbounded_channel();
        Self {
            endpoint: endpoint.into(),
            options,
            state: SearchState::default(),
            signals,
            inbox,
            debounce: TimerSlot::default(),
            blur: TimerSlot::default(),
            toast: TimerSlot::default(),
            generation: 0,
            flight: None,
            last_settled: None,
            on_select: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    #[must_use]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    #[must_use]
    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Register the handler notified once per committed selection.
    pub fn on_select(&mut self, handler: impl FnMut(&str) + Send + 'static) {
        self.on_select = Some(Box::new(handler));
    }

    /// Whether a typed value is still waiting out the debounce window.
    #[must_use]
    pub fn has_pending_input(&self) -> bool {
        self.debounce.is_armed()
    }

    /// Replace the query with a freshly typed value and restart the debounce window.
    pub fn input(&mut self, value: impl Into<String>) {
        self.state.query = value.into();
        self.state.focused = true;
        self.blur.cancel();
        if !self.state.query.trim().is_empty() {
            self.state.navigation.open();
        }
        trace!(query = %self.state.query, "input received");
        self.debounce
            .arm(self.options.debounce, &self.signals, Signal::Settled);
    }

    pub fn focus(&mut self) {
        self.state.focused = true;
        self.blur.cancel();
    }

    /// Lose focus; the dropdown closes after the grace period unless focus returns.
    pub fn blur(&mut self) {
        self.state.focused = false;
        self.blur
            .arm(self.options.blur_grace, &self.signals, Signal::BlurElapsed);
    }

    /// Apply a navigation key. Returns the committed value when the key commits.
    pub fn key(&mut self, key: NavKey) -> Option<String> {
        let len = self.state.results().len();
        match self.state.navigation.handle(key, len) {
            NavEffect::Commit(index) => self.commit(index),
            NavEffect::Blur => {
                self.state.focused = false;
                self.blur.cancel();
                None
            }
            NavEffect::None => None,
        }
    }

    /// Commit the result at `index`, as a click on that row would.
    pub fn select_index(&mut self, index: usize) -> Option<String> {
        self.commit(index)
    }

    /// Empty the query, the results and the selection.
    pub fn clear(&mut self) {
        self.debounce.cancel();
        self.supersede();
        self.state.query.clear();
        self.state.selection = None;
        self.state.results = Some(Vec::new());
        self.state.error.clear();
        self.state.navigation.close();
        self.last_settled = Some(String::new());
        debug!("search box cleared");
    }

    pub fn remove_selection(&mut self) {
        self.state.selection = None;
    }

    /// Clear the error and run the last settled query through a fresh pipeline.
    pub fn retry(&mut self) {
        self.state.error.clear();
        let query = self
            .last_settled
            .clone()
            .unwrap_or_else(|| self.state.query.clone());
        info!(%query, "manual retry");
        self.dispatch(query);
    }

    pub fn dismiss_toast(&mut self) {
        self.state.toast_visible = false;
        self.toast.cancel();
    }

    /// Wait for the next signal and apply it.
    pub async fn process_next(&mut self) {
        if let Some(signal) = self.inbox.recv().await {
            self.apply(signal);
        }
    }

    /// Apply every signal that is already queued. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(signal) = self.inbox.try_recv() {
            self.apply(signal);
            applied += 1;
        }
        applied
    }

    /// Keep applying signals until `duration` has elapsed.
    pub async fn run_for(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            let signal = tokio::select! {
                biased;
                () = sleep_until(deadline) => None,
                signal = self.inbox.recv() => signal,
            };
            match signal {
                Some(signal) => self.apply(signal),
                None => break,
            }
        }
    }

    fn apply(&mut self, signal: Signal) {
        match signal {
            Signal::Settled(ticket) => {
                if self.debounce.fire(ticket) {
                    self.settle();
                }
            }
            Signal::Resolved {
                generation,
                outcome,
            } => self.resolve(generation, outcome),
            Signal::BlurElapsed(ticket) => {
                if self.blur.fire(ticket) {
                    self.state.navigation.close();
                }
            }
            Signal::ToastElapsed(ticket) => {
                if self.toast.fire(ticket) {
                    self.state.toast_visible = false;
                }
            }
        }
    }

    fn settle(&mut self) {
        let query = self.state.query.clone();
        if self.last_settled.as_deref() == Some(query.as_str()) {
            trace!(%query, "settled query unchanged, skipping");
            return;
        }
        self.last_settled = Some(query.clone());
        self.dispatch(query);
    }

    /// Abort the in-flight pipeline and invalidate anything it already queued.
    fn supersede(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.flight = None;
        self.state.loading = false;
    }

    fn dispatch(&mut self, query: String) {
        self.supersede();
        self.state.navigation.reset_cursor();

        if query.trim().is_empty() {
            self.state.results = Some(Vec::new());
            self.state.error.clear();
            return;
        }

        self.state.loading = true;
        self.state.request_count += 1;
        let generation = self.generation;
        debug!(%query, generation, "dispatching search");

        let endpoint = Arc::clone(&self.endpoint);
        let policy = self.options.retry;
        let signals = self.signals.clone();
        self.flight = Some(AbortOnDrop::spawn(async move {
            let outcome = pipeline::run(&*endpoint, &query, policy).await;
            let _ = signals.send(Signal::Resolved {
                generation,
                outcome,
            });
        }));
    }

    fn resolve(&mut self, generation: u64, outcome: Outcome) {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "discarding superseded response"
            );
            return;
        }
        self.flight = None;
        self.state.loading = false;
        self.state.navigation.reset_cursor();

        match outcome {
            Outcome::Found { results, latency } => {
                self.state.results = Some(results);
                self.state.error.clear();
                self.state.last_latency = Some(latency);
            }
            Outcome::Failed(error) => {
                self.state.results = Some(Vec::new());
                let count = self.state.error.record(&error);
                if count >= self.options.toast_threshold {
                    self.show_toast();
                }
            }
        }
    }

    fn show_toast(&mut self) {
        self.state.toast_visible = true;
        self.toast
            .arm(self.options.toast_duration, &self.signals, Signal::ToastElapsed);
    }

    fn commit(&mut self, index: usize) -> Option<String> {
        let value = self.state.results().get(index)?.clone();
        self.debounce.cancel();
        self.supersede();
        self.state.selection = Some(value.clone());
        self.state.query = value.clone();
        self.state.navigation.close();
        self.last_settled = Some(value.clone());
        info!(selection = %value, "selection committed");
        if let Some(handler) = self.on_select.as_mut() {
            handler(&value);
        }
        Some(value)
    }
}
