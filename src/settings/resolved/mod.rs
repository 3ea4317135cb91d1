use log::LevelFilter;
use multisel::{OptionList, WidgetConfig};

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub lists: Vec<OptionList>,
	/// Options shared by every widget.
	pub widget: WidgetConfig,
	pub title: Option<String>,
	pub theme: Option<String>,
	pub show_log: bool,
	pub log_level: LevelFilter,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Widget options for `list`. Without an explicit label, lists are
	/// labelled by name when there is more than one.
	#[must_use]
	pub fn widget_config_for(&self, list: &OptionList) -> WidgetConfig {
		let mut config = self.widget.clone();
		if config.label.is_none() && self.lists.len() > 1 {
			config.label = Some(list.id.clone());
		}
		config
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}
}

#[cfg(test)]
pub(crate) fn fixture(lists: Vec<OptionList>) -> ResolvedConfig {
	ResolvedConfig {
		lists,
		widget: WidgetConfig::default(),
		title: None,
		theme: None,
		show_log: false,
		log_level: LevelFilter::Info,
	}
}
