//! Resolve configuration and data directories for `typeahead`.
//!
//! The helpers in this module respect environment overrides while falling back
//! to platform-appropriate locations provided by the `directories` crate.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "typeahead";
const APPLICATION: &str = "typeahead";

const CONFIG_DIR_ENV: &str = "TYPEAHEAD_CONFIG_DIR";
const DATA_DIR_ENV: &str = "TYPEAHEAD_DATA_DIR";

/// Locate the platform directories reserved for `typeahead`.
fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| anyhow!("unable to determine project directories for typeahead"))
}

/// Read a directory override from `name`.
///
/// An empty value is treated the same as an unset one.
fn dir_from_env(name: &str) -> Option<PathBuf> {
    let value = env::var_os(name)?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Directory holding `config.toml`.
///
/// `TYPEAHEAD_CONFIG_DIR` takes precedence over the platform default.
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
        return Ok(dir);
    }

    Ok(project_dirs()?.config_local_dir().to_path_buf())
}

/// Directory the log file is written to.
///
/// `TYPEAHEAD_DATA_DIR` takes precedence over the platform default.
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
        return Ok(dir);
    }

    Ok(project_dirs()?.data_local_dir().to_path_buf())
}
