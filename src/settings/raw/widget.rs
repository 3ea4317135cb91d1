use anyhow::Result;
use multisel::{Timings, WidgetConfig};
use serde::Deserialize;

use super::parse_match_mode;
use crate::cli::CliArgs;

/// Widget options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct WidgetSection {
	pub(super) width: Option<String>,
	label: Option<String>,
	show_selected_fit: Option<bool>,
	filter_focus_class: Option<String>,
	match_mode: Option<String>,
	timings: TimingsSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TimingsSection {
	debounce_ms: Option<u64>,
	height_delay_ms: Option<u64>,
	focus_delay_ms: Option<u64>,
	max_height: Option<u32>,
	height_padding: Option<u32>,
}

impl WidgetSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(width) = cli.width.clone() {
			self.width = Some(width);
		}
		if let Some(label) = cli.label.clone() {
			self.label = Some(label);
		}
		if cli.fit {
			self.show_selected_fit = Some(true);
		}
		if let Some(mode) = cli.match_mode {
			self.match_mode = Some(mode.as_str().to_string());
		}
	}

	pub(super) fn finalize(self) -> Result<WidgetConfig> {
		let defaults = WidgetConfig::default();
		let match_mode = match self.match_mode {
			Some(name) => parse_match_mode(&name)?,
			None => defaults.match_mode,
		};
		Ok(WidgetConfig {
			width: self.width.unwrap_or(defaults.width),
			label: self.label.filter(|label| !label.is_empty()),
			show_selected_fit: self.show_selected_fit.unwrap_or(defaults.show_selected_fit),
			filter_focus_class: self
				.filter_focus_class
				.filter(|class| !class.is_empty()),
			match_mode,
			timings: self.timings.finalize(defaults.timings),
		})
	}
}

impl TimingsSection {
	fn finalize(self, defaults: Timings) -> Timings {
		Timings {
			debounce_ms: self.debounce_ms.unwrap_or(defaults.debounce_ms),
			height_delay_ms: self.height_delay_ms.unwrap_or(defaults.height_delay_ms),
			focus_delay_ms: self.focus_delay_ms.unwrap_or(defaults.focus_delay_ms),
			max_height: self.max_height.unwrap_or(defaults.max_height),
			height_padding: self.height_padding.unwrap_or(defaults.height_padding),
		}
	}
}
