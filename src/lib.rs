//! Core crate exports for embedding the `typeahead` search box.
//!
//! [`SearchController`] owns the search orchestration: debounced input,
//! superseding request pipelines with timeout and retry, keyboard navigation
//! over the result list and the error/toast state. The [`ui`] module renders
//! a controller in the terminal.

pub mod app_dirs;
pub mod controller;
pub mod endpoint;
pub mod error;
pub mod highlight;
pub mod logging;
pub mod ui;

#[cfg(test)]
mod testing;

pub use controller::{
    ErrorState, NavKey, Navigator, RetryPolicy, SearchController, SearchOptions, SearchState,
};
pub use endpoint::{HttpSearchEndpoint, InvalidEndpoint, SearchEndpoint, SearchResponse};
pub use error::SearchError;
pub use highlight::Highlighter;
pub use ui::{App, SearchOutcome, Theme, run};
