use multisel::theme;

use super::{ConfigError, ConfigSources, ResolvedConfig, SettingSource};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	if config.widget.validate().is_err() {
		return Err(ConfigError::invalid(
			"widget.width",
			config.widget.width.clone(),
			sources.source_for_width(),
			"must be a pixel length such as 200px",
		));
	}

	if config.widget.timings.max_height == 0 {
		return Err(ConfigError::invalid(
			"widget.timings.max_height",
			"0",
			SettingSource::ConfigKey("widget.timings.max_height"),
			"must be greater than zero",
		));
	}

	if let Some(name) = &config.theme
		&& theme::by_name(name).is_none()
	{
		return Err(ConfigError::invalid(
			"ui.theme",
			name.clone(),
			sources.source_for_theme(),
			format!("expected one of {}", theme::names().join(", ")),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use multisel::options::from_items;

	use super::super::fixture;
	use super::*;

	#[test]
	fn validation_rejects_non_pixel_widths() {
		let mut config = fixture(vec![from_items(&["a"]).expect("valid item")]);
		config.widget.width = "50%".to_string();
		let sources = ConfigSources {
			widget_width: Some(SettingSource::Environment("MULTISEL__WIDGET__WIDTH")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "widget.width");
		let message = err.to_string();
		assert!(message.contains("value: 50%"));
		assert!(message.contains("environment variable"));
	}

	#[test]
	fn validation_rejects_unknown_themes() {
		let mut config = fixture(vec![from_items(&["a"]).expect("valid item")]);
		config.theme = Some("neon".to_string());

		let err = validate(&config, &ConfigSources::default()).unwrap_err();
		assert_eq!(err.key, "ui.theme");
		assert!(err.to_string().contains("slate"));
		assert!(err.to_string().contains("configuration key `ui.theme`"));
	}

	#[test]
	fn defaults_pass_validation() {
		let config = fixture(vec![from_items(&["a"]).expect("valid item")]);
		assert!(validate(&config, &ConfigSources::default()).is_ok());
	}
}
