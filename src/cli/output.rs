use anyhow::Result;
use serde_json::json;
use typeahead::SearchOutcome;

/// Print the committed selection, or a note when nothing was chosen.
pub(crate) fn print_plain(outcome: &SearchOutcome) {
    match &outcome.selection {
        Some(selection) => println!("{selection}"),
        None => println!("No selection (query: '{}')", outcome.query),
    }
}

/// Serialize the outcome as `{"query": ..., "selection": ...}`.
pub(crate) fn format_outcome_json(outcome: &SearchOutcome) -> Result<String> {
    let payload = json!({
        "query": outcome.query,
        "selection": outcome.selection,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the outcome as JSON on stdout.
pub(crate) fn print_json(outcome: &SearchOutcome) -> Result<()> {
    println!("{}", format_outcome_json(outcome)?);
    Ok(())
}
