use std::time::Duration;

use super::navigation::Navigator;
use crate::error::SearchError;

/// Inline error flag plus the lifetime failure counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    message: Option<String>,
    count: u32,
}

impl ErrorState {
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.message.is_some()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Failures observed since the controller was created.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Record a failure and return the new lifetime count.
    pub(crate) fn record(&mut self, error: &SearchError) -> u32 {
        self.message = Some(error.user_message());
        self.count = self.count.saturating_add(1);
        self.count
    }

    /// Clear the flag and message; the counter is never reset.
    pub(crate) fn clear(&mut self) {
        self.message = None;
    }
}

/// Everything the search box renders.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub(crate) query: String,
    pub(crate) results: Option<Vec<String>>,
    pub(crate) selection: Option<String>,
    pub(crate) navigation: Navigator,
    pub(crate) error: ErrorState,
    pub(crate) toast_visible: bool,
    pub(crate) loading: bool,
    pub(crate) focused: bool,
    pub(crate) request_count: u64,
    pub(crate) last_latency: Option<Duration>,
}

impl SearchState {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current results; empty both before the first search and after an empty one.
    #[must_use]
    pub fn results(&self) -> &[String] {
        self.results.as_deref().unwrap_or_default()
    }

    /// Whether any search (including a cleared query) has completed.
    #[must_use]
    pub fn has_searched(&self) -> bool {
        self.results.is_some()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    #[must_use]
    pub fn navigation(&self) -> Navigator {
        self.navigation
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.navigation.is_open()
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.navigation.cursor()
    }

    /// Result under the cursor, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<&str> {
        self.cursor()
            .and_then(|index| self.results().get(index))
            .map(String::as_str)
    }

    #[must_use]
    pub fn error(&self) -> &ErrorState {
        &self.error
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.has_error()
    }

    #[must_use]
    pub fn toast_visible(&self) -> bool {
        self.toast_visible
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Pipelines dispatched since the controller was created.
    #[must_use]
    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    #[must_use]
    pub fn last_latency(&self) -> Option<Duration> {
        self.last_latency
    }
}
