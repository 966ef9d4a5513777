use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use typeahead::{HttpSearchEndpoint, SearchOptions};

use crate::cli::CliArgs;

use super::resolved::ResolvedConfig;

pub(super) const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/search";

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    client: ClientSection,
    ui: UiSection,
}

/// How the search endpoint is reached.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ClientSection {
    endpoint: Option<String>,
    timeout_ms: Option<u64>,
    retries: Option<u32>,
    backoff_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
    title: Option<String>,
    placeholder: Option<String>,
    debounce_ms: Option<u64>,
    debug: Option<bool>,
    blur_grace_ms: Option<u64>,
    toast_ms: Option<u64>,
    toast_threshold: Option<u32>,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(endpoint) = cli.endpoint.clone() {
            self.client.endpoint = Some(endpoint);
        }
        if let Some(value) = cli.timeout_ms {
            self.client.timeout_ms = Some(value);
        }
        if let Some(value) = cli.retries {
            self.client.retries = Some(value);
        }
        if let Some(value) = cli.backoff_ms {
            self.client.backoff_ms = Some(value);
        }

        if let Some(title) = cli.title.clone() {
            self.ui.title = Some(title);
        }
        if let Some(placeholder) = cli.placeholder.clone() {
            self.ui.placeholder = Some(placeholder);
        }
        if let Some(value) = cli.debounce_ms {
            self.ui.debounce_ms = Some(value);
        }
        if let Some(value) = cli.debug {
            self.ui.debug = Some(value);
        }
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self) -> Result<ResolvedConfig> {
        let endpoint_url = self
            .client
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = HttpSearchEndpoint::parse(&endpoint_url)
            .context("failed to resolve the search endpoint")?;

        let defaults = SearchOptions::default();
        let mut retry = defaults.retry;
        if let Some(ms) = self.client.timeout_ms {
            ensure!(ms > 0, "client.timeout_ms must be greater than zero");
            retry.timeout = Duration::from_millis(ms);
        }
        if let Some(retries) = self.client.retries {
            retry.retries = retries;
        }
        if let Some(ms) = self.client.backoff_ms {
            retry.backoff = Duration::from_millis(ms);
        }

        let mut options = SearchOptions {
            retry,
            ..defaults
        };
        if let Some(placeholder) = self.ui.placeholder {
            options.placeholder = placeholder;
        }
        if let Some(ms) = self.ui.debounce_ms {
            options.debounce = Duration::from_millis(ms);
        }
        if let Some(debug) = self.ui.debug {
            options.debug = debug;
        }
        if let Some(ms) = self.ui.blur_grace_ms {
            options.blur_grace = Duration::from_millis(ms);
        }
        if let Some(ms) = self.ui.toast_ms {
            options.toast_duration = Duration::from_millis(ms);
        }
        if let Some(threshold) = self.ui.toast_threshold {
            ensure!(threshold > 0, "ui.toast_threshold must be at least 1");
            options.toast_threshold = threshold;
        }

        let input_title = self.ui.title.filter(|title| !title.trim().is_empty());

        Ok(ResolvedConfig {
            endpoint,
            options,
            input_title,
        })
    }
}
