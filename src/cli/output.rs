use anyhow::Result;
use multisel::SelectionOutcome;
use serde_json::json;

/// Format the outcome as plain text: one line per widget, values joined by
/// commas and prefixed with the list name when there are several lists.
pub(crate) fn format_plain(outcome: &SelectionOutcome) -> String {
	if !outcome.accepted {
		return "Selection cancelled".to_string();
	}

	let named = outcome.selections.len() > 1;
	outcome
		.selections
		.iter()
		.filter(|selection| selection.available)
		.map(|selection| {
			let values = selection.values.join(",");
			if named {
				format!("{}: {values}", selection.source_id)
			} else {
				values
			}
		})
		.collect::<Vec<_>>()
		.join("\n")
}

/// Print a plain-text representation of the outcome.
pub(crate) fn print_plain(outcome: &SelectionOutcome) {
	println!("{}", format_plain(outcome));
}

/// Format the outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SelectionOutcome) -> Result<String> {
	let selections: Vec<_> = outcome
		.selections
		.iter()
		.map(|selection| {
			json!({
				"id": selection.source_id,
				"available": selection.available,
				"values": selection.values,
				"texts": selection.texts,
			})
		})
		.collect();

	let payload = json!({
		"accepted": outcome.accepted,
		"selections": selections,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the outcome.
pub(crate) fn print_json(outcome: &SelectionOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}
