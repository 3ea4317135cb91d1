use std::env;
use std::path::PathBuf;

use anyhow::{Context, Error, Result, bail};
use log::LevelFilter;
use serde::Deserialize;

use multisel::logging::parse_level;
use multisel::options::{self, OptionList};
use multisel::MatchMode;

use crate::cli::CliArgs;

use super::resolved::{ConfigError, ConfigSources, ResolvedConfig, SettingSource};

mod widget;

use widget::WidgetSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	widget: WidgetSection,
	ui: UiSection,
	options: OptionsSection,
}

/// Front-end settings as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
	title: Option<String>,
	theme: Option<String>,
	show_log: Option<bool>,
	log_level: Option<String>,
}

/// Where the option lists come from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct OptionsSection {
	file: Option<PathBuf>,
	select: Vec<String>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.widget.apply_cli_overrides(cli);
		if let Some(title) = cli.title.clone() {
			self.ui.title = Some(title);
		}
		if let Some(theme) = cli.theme.clone() {
			self.ui.theme = Some(theme);
		}
		if cli.show_log {
			self.ui.show_log = Some(true);
		}
		if let Some(level) = cli.log_level {
			self.ui.log_level = Some(level.as_str().to_string());
		}
		if let Some(file) = cli.options_file.clone() {
			self.options.file = Some(file);
		}
		self.options.select.extend(cli.select.iter().cloned());
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			widget_width: detect_source(
				cli.width.is_some(),
				self.widget.width.is_some(),
				"MULTISEL__WIDGET__WIDTH",
				"--width",
				"widget.width",
			),
			ui_theme: detect_source(
				cli.theme.is_some(),
				self.ui.theme.is_some(),
				"MULTISEL__UI__THEME",
				"--theme",
				"ui.theme",
			),
		};

		let widget = self.widget.finalize()?;
		let log_level = resolve_log_level(self.ui.log_level.as_deref(), cli)?;
		let lists = resolve_lists(cli, &self.options)?;

		let config = ResolvedConfig {
			lists,
			widget,
			title: self.ui.title,
			theme: self.ui.theme,
			show_log: self.ui.show_log.unwrap_or(false),
			log_level,
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn resolve_log_level(name: Option<&str>, cli: &CliArgs) -> Result<LevelFilter, ConfigError> {
	let Some(name) = name else {
		return Ok(LevelFilter::Info);
	};
	parse_level(name).ok_or_else(|| {
		let origin = if cli.log_level.is_some() {
			SettingSource::CliFlag("--log-level")
		} else if env::var_os("MULTISEL__UI__LOG_LEVEL").is_some() {
			SettingSource::Environment("MULTISEL__UI__LOG_LEVEL")
		} else {
			SettingSource::ConfigKey("ui.log_level")
		};
		ConfigError::invalid(
			"ui.log_level",
			name,
			origin,
			"expected off, error, warn, info, debug or trace",
		)
	})
}

/// Positional items win over an options file; pre-selection applies to
/// whichever lists result.
fn resolve_lists(cli: &CliArgs, section: &OptionsSection) -> Result<Vec<OptionList>> {
	let mut lists = if !cli.items.is_empty() {
		vec![options::from_items(&cli.items)?]
	} else if let Some(path) = &section.file {
		options::load_file(path)
			.with_context(|| format!("while loading options from {}", path.display()))?
	} else {
		bail!("no options given: pass value=text items or --options FILE");
	};

	for list in &mut lists {
		list.preselect(&section.select);
	}
	Ok(lists)
}

pub(super) fn parse_match_mode(name: &str) -> Result<MatchMode, ConfigError> {
	MatchMode::from_name(name).ok_or_else(|| {
		let origin = if env::var_os("MULTISEL__WIDGET__MATCH_MODE").is_some() {
			SettingSource::Environment("MULTISEL__WIDGET__MATCH_MODE")
		} else {
			SettingSource::ConfigKey("widget.match_mode")
		};
		ConfigError::invalid(
			"widget.match_mode",
			name,
			origin,
			"expected literal or pattern",
		)
	})
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}
