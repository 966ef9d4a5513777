use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, Parser, ValueEnum,
    builder::{
        BoolishValueParser, Styles,
        styling::{AnsiColor, Effects},
    },
};
use typeahead::app_dirs;

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };
    let data_dir = match app_dirs::get_data_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("typeahead {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "data directory: {data_dir}");

    Box::leak(details.into_boxed_str())
}

/// Colour scheme applied to `--help` output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse the process arguments, exiting with usage on error.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "typeahead",
    version,
    long_version = long_version(),
    about = "Debounced search-as-you-type box for an HTTP search endpoint",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `typeahead` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "TYPEAHEAD_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short,
        long,
        value_name = "URL",
        help = "Search endpoint queried with ?q=<query> (default: http://localhost:8000/api/search)"
    )]
    pub(crate) endpoint: Option<String>,
    #[arg(
        short = 'P',
        long,
        value_name = "TEXT",
        help = "Placeholder shown while the query is empty (default: Search fruits...)"
    )]
    pub(crate) placeholder: Option<String>,
    #[arg(
        short,
        long,
        value_name = "TITLE",
        help = "Set the input box title (default: Search)"
    )]
    pub(crate) title: Option<String>,
    #[arg(
        long = "debounce-ms",
        value_name = "MS",
        help = "Quiet period before a typed query is searched (default: 300)"
    )]
    pub(crate) debounce_ms: Option<u64>,
    #[arg(
        long = "timeout-ms",
        value_name = "MS",
        help = "Per-attempt request timeout (default: 5000)"
    )]
    pub(crate) timeout_ms: Option<u64>,
    #[arg(
        long,
        value_name = "NUM",
        help = "Retries after a failed attempt (default: 2)"
    )]
    pub(crate) retries: Option<u32>,
    #[arg(
        long = "backoff-ms",
        value_name = "MS",
        help = "Backoff unit; retry n waits n times this long (default: 1000)"
    )]
    pub(crate) backoff_ms: Option<u64>,
    #[arg(
        short,
        long,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Show the request counter, latency and error count (default: disabled)"
    )]
    pub(crate) debug: Option<bool>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print the result")]
    pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
    Plain,
    Json,
}
