use std::time::Duration;

use serde::Deserialize;

use crate::WidgetError;
use crate::filter::MatchMode;

/// Width used when none is configured.
pub const DEFAULT_WIDTH: &str = "200px";

/// Options accepted when creating a widget. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
	/// Container width as a pixel length.
	pub width: String,
	/// Text prefix rendered before the summary.
	pub label: Option<String>,
	/// Show every selected text joined by commas instead of the first one
	/// followed by an ellipsis.
	pub show_selected_fit: bool,
	/// Class applied to the filter field while it has focus.
	pub filter_focus_class: Option<String>,
	pub match_mode: MatchMode,
	pub timings: Timings,
}

impl Default for WidgetConfig {
	fn default() -> Self {
		Self {
			width: DEFAULT_WIDTH.to_string(),
			label: None,
			show_selected_fit: false,
			filter_focus_class: None,
			match_mode: MatchMode::default(),
			timings: Timings::default(),
		}
	}
}

impl WidgetConfig {
	#[must_use]
	pub fn with_width(mut self, width: impl Into<String>) -> Self {
		self.width = width.into();
		self
	}

	#[must_use]
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	#[must_use]
	pub fn with_selected_fit(mut self, show_selected_fit: bool) -> Self {
		self.show_selected_fit = show_selected_fit;
		self
	}

	#[must_use]
	pub fn with_filter_focus_class(mut self, class: impl Into<String>) -> Self {
		self.filter_focus_class = Some(class.into());
		self
	}

	#[must_use]
	pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
		self.match_mode = mode;
		self
	}

	/// Check that `width` is a pixel length.
	pub fn validate(&self) -> Result<(), WidgetError> {
		parse_px(&self.width)
			.map(|_| ())
			.ok_or_else(|| WidgetError::InvalidWidth {
				value: self.width.clone(),
			})
	}

	/// Width in pixels, if it parses.
	#[must_use]
	pub fn width_px(&self) -> Option<u32> {
		parse_px(&self.width)
	}
}

/// Parse `120px` (or a bare `120`) into a pixel count.
#[must_use]
pub fn parse_px(value: &str) -> Option<u32> {
	let trimmed = value.trim();
	let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
	number.parse().ok()
}

/// Delays and limits for the deferred parts of the widget lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
	/// Quiet period before a filter query is evaluated.
	pub debounce_ms: u64,
	/// Delay before the results height is re-derived.
	pub height_delay_ms: u64,
	/// Delay between opening and focusing the filter field.
	pub focus_delay_ms: u64,
	/// Upper bound for the results container height, in pixels.
	pub max_height: u32,
	/// Extra pixels added to the content height.
	pub height_padding: u32,
}

impl Default for Timings {
	fn default() -> Self {
		Self {
			debounce_ms: 300,
			height_delay_ms: 30,
			focus_delay_ms: 50,
			max_height: 200,
			height_padding: 2,
		}
	}
}

impl Timings {
	#[must_use]
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	#[must_use]
	pub fn height_delay(&self) -> Duration {
		Duration::from_millis(self.height_delay_ms)
	}

	#[must_use]
	pub fn focus_delay(&self) -> Duration {
		Duration::from_millis(self.focus_delay_ms)
	}

	/// Height for the results container given its content height.
	#[must_use]
	pub fn clamp_height(&self, content_height: u32) -> u32 {
		content_height
			.saturating_add(self.height_padding)
			.min(self.max_height)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_documented_values() {
		let config = WidgetConfig::default();
		assert_eq!(config.width, "200px");
		assert!(!config.show_selected_fit);
		assert_eq!(config.match_mode, MatchMode::Literal);
		assert_eq!(config.timings.debounce(), Duration::from_millis(300));
		assert_eq!(config.timings.height_delay(), Duration::from_millis(30));
		assert_eq!(config.timings.focus_delay(), Duration::from_millis(50));
	}

	#[test]
	fn partial_config_deserializes_over_defaults() {
		let config: WidgetConfig = serde_json::from_str(
			r#"{"label":"Cities","show_selected_fit":true,"match_mode":"pattern","timings":{"debounce_ms":100}}"#,
		)
		.expect("valid config");

		assert_eq!(config.label.as_deref(), Some("Cities"));
		assert!(config.show_selected_fit);
		assert_eq!(config.match_mode, MatchMode::Pattern);
		assert_eq!(config.timings.debounce_ms, 100);
		assert_eq!(config.timings.max_height, 200);
		assert_eq!(config.width, DEFAULT_WIDTH);
	}

	#[test]
	fn width_validation() {
		assert_eq!(WidgetConfig::default().width_px(), Some(200));
		assert_eq!(parse_px(" 120 "), Some(120));
		let err = WidgetConfig::default().with_width("wide").validate().unwrap_err();
		assert_eq!(
			err,
			WidgetError::InvalidWidth {
				value: "wide".to_string()
			}
		);
	}

	#[test]
	fn height_is_padded_and_capped() {
		let timings = Timings::default();
		assert_eq!(timings.clamp_height(40), 42);
		assert_eq!(timings.clamp_height(198), 200);
		assert_eq!(timings.clamp_height(1_000), 200);
	}
}
