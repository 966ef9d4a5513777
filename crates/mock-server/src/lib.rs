//! Mock search endpoint for exercising `typeahead` locally.
//!
//! `GET /api/search?q=<prefix>` answers with the fruits starting with the
//! query, after an artificial delay and with an injected failure rate.

pub mod fruits;
pub mod injection;
pub mod routes;

pub use injection::{FaultInjection, InjectionError};
pub use routes::{SEARCH_PATH, router};
