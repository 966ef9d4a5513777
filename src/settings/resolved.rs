use typeahead::{HttpSearchEndpoint, SearchOptions};

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub endpoint: HttpSearchEndpoint,
    pub options: SearchOptions,
    pub input_title: Option<String>,
}

impl ResolvedConfig {
    /// Print a human readable summary of the effective configuration.
    pub fn print_summary(&self) {
        println!("Effective configuration:");
        println!("  Endpoint: {}", self.endpoint.base());
        println!(
            "  Request timeout: {}ms",
            self.options.retry.timeout.as_millis()
        );
        println!("  Retries: {}", self.options.retry.retries);
        println!("  Backoff: {}ms", self.options.retry.backoff.as_millis());
        println!("  Debounce: {}ms", self.options.debounce.as_millis());
        println!("  Blur grace: {}ms", self.options.blur_grace.as_millis());
        println!(
            "  Toast: after {} errors, for {}ms",
            self.options.toast_threshold,
            self.options.toast_duration.as_millis()
        );
        println!("  Placeholder: {}", self.options.placeholder);
        if let Some(title) = &self.input_title {
            println!("  Prompt title: {title}");
        }
        println!("  Debug panel: {}", bool_to_word(self.options.debug));
    }
}

/// Render a flag as `enabled`/`disabled` for the summary.
fn bool_to_word(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
