//! Terminal front-end for the search box.
//!
//! [`App`] embeds a [`SearchController`](crate::SearchController): it maps
//! terminal keys and mouse clicks onto controller operations and renders the
//! controller state as an input line, a dropdown of highlighted matches, an
//! inline error line, a toast overlay and an optional debug line.

mod actions;
mod render;
mod runtime;
mod state;
pub mod style;

pub use runtime::run;
pub use state::{App, SearchOutcome};
pub use style::Theme;
