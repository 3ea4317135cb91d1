use anyhow::{Result, anyhow};

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::build_config;
use crate::cli::CliArgs;

/// Load configuration by combining CLI arguments, config files and environment
/// variables.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve(cli)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use clap::Parser;
	use multisel::MatchMode;
	use tempfile::tempdir;

	use super::*;

	#[test]
	fn config_file_and_flags_merge() {
		let dir = tempdir().expect("temp dir");
		let options = dir.path().join("lists.json");
		fs::write(
			&options,
			r#"{"cities":[{"value":"NY","text":"New York"},{"value":"LA","text":"Los Angeles"}],"colors":[{"value":"r","text":"Red"}]}"#,
		)
		.expect("write options");
		let config = dir.path().join("multisel.toml");
		fs::write(
			&config,
			format!(
				"[widget]\nwidth = \"240px\"\nshow_selected_fit = true\n\n[widget.timings]\ndebounce_ms = 120\n\n[ui]\ntheme = \"paper\"\n\n[options]\nfile = {:?}\nselect = [\"LA\"]\n",
				options.display().to_string()
			),
		)
		.expect("write config");

		let cli = CliArgs::parse_from([
			"multisel",
			"--no-config",
			"--config",
			config.to_str().expect("utf-8 path"),
			"--match-mode",
			"pattern",
			"--select",
			"r",
		]);
		let resolved = load(&cli).expect("configuration loads");

		assert_eq!(resolved.widget.width, "240px");
		assert!(resolved.widget.show_selected_fit);
		assert_eq!(resolved.widget.match_mode, MatchMode::Pattern);
		assert_eq!(resolved.widget.timings.debounce_ms, 120);
		assert_eq!(resolved.widget.timings.height_delay_ms, 30);
		assert_eq!(resolved.theme.as_deref(), Some("paper"));

		let ids: Vec<&str> = resolved.lists.iter().map(|list| list.id.as_str()).collect();
		assert_eq!(ids, vec!["cities", "colors"]);
		assert!(resolved.lists[0].options[1].selected);
		assert!(resolved.lists[1].options[0].selected);
		assert!(!resolved.lists[0].options[0].selected);
	}

	#[test]
	fn invalid_width_names_its_source() {
		let cli = CliArgs::parse_from(["multisel", "--no-config", "--width", "wide", "a"]);
		let err = load(&cli).expect_err("width must be a pixel length");
		let message = err.to_string();
		assert!(message.contains("widget.width"));
		assert!(message.contains("CLI flag `--width`"));
	}

	#[test]
	fn missing_options_are_reported() {
		let cli = CliArgs::parse_from(["multisel", "--no-config"]);
		let err = load(&cli).expect_err("options are required");
		assert!(err.to_string().contains("no options"));
	}
}
