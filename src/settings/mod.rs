//! Configuration loading and resolution.
//!
//! `load` merges config files, `TYPEAHEAD__*` environment variables and CLI
//! flags into a [`ResolvedConfig`] ready to build the controller from.

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::ResolvedConfig;
