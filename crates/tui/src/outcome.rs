/// Selection held by one widget when the form closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSelection {
	/// Id of the source control the widget replaced.
	pub source_id: String,
	/// Selected option values in option order.
	pub values: Vec<String>,
	/// Display texts of the selected options.
	pub texts: Vec<String>,
	/// `false` when the widget was left inert.
	pub available: bool,
}

/// Result of running the interactive form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
	/// Whether the user confirmed rather than aborted.
	pub accepted: bool,
	pub selections: Vec<WidgetSelection>,
}

impl SelectionOutcome {
	/// Selected values of the widget over `source_id`.
	#[must_use]
	pub fn values_for(&self, source_id: &str) -> Option<&[String]> {
		self.selections
			.iter()
			.find(|selection| selection.source_id == source_id)
			.map(|selection| selection.values.as_slice())
	}
}
