mod cli;
mod settings;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use tracing::info;
use typeahead::{App, HttpSearchEndpoint, SearchController, app_dirs, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_cli();
    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    let log_path = logging::initialize(&app_dirs::get_data_dir()?, resolved.options.debug)?;
    info!(log = %log_path.display(), "logging initialised");

    run_search(cli.output, resolved).await
}

/// Run the search box and print the outcome in the chosen format.
async fn run_search(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
    let ResolvedConfig {
        endpoint,
        options,
        input_title,
    } = settings;
    info!(endpoint = %endpoint.base(), "starting search box");

    let mut controller = SearchController::<HttpSearchEndpoint>::new(endpoint, options);
    controller.on_select(|value| info!(selection = value, "selection event"));

    let mut app = App::new(controller);
    if let Some(title) = input_title {
        app = app.with_input_title(title);
    }
    let outcome = typeahead::run(app).await?;

    match format {
        OutputFormat::Plain => print_plain(&outcome),
        OutputFormat::Json => print_json(&outcome)?,
    }

    Ok(())
}
