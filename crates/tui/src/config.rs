/// Textual configuration for the chrome around the widgets.
#[derive(Debug, Clone)]
pub struct UiLabels {
	/// Title shown on the header line.
	pub title: String,
	/// Key hint rendered next to the title.
	pub hint: String,
	/// Prefix drawn in front of the filter input.
	pub filter_prompt: String,
	/// Text shown in place of a widget whose source control is missing.
	pub unavailable: String,
}

impl UiLabels {
	/// Labels with a custom title and the default hints.
	#[must_use]
	pub fn titled(title: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			..Self::default()
		}
	}
}

impl Default for UiLabels {
	fn default() -> Self {
		Self {
			title: "multisel".to_string(),
			hint: "tab: open  ↑/↓: move  space/enter: toggle  esc: close/done  ctrl-c: abort"
				.to_string(),
			filter_prompt: "› ".to_string(),
			unavailable: "unavailable".to_string(),
		}
	}
}
