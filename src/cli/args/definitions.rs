use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::{LogLevelArg, MatchModeArg, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `multisel` binary.
#[derive(Parser, Debug)]
#[command(
	name = "multisel",
	version,
	long_version = long_version(),
	about = "Pick several options from filterable checkbox lists",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	/// Options as `value=text` (or a bare `value`) for a list named `options`.
	#[arg(value_name = "ITEM")]
	pub(crate) items: Vec<String>,
	#[arg(
		short = 'f',
		long = "options",
		value_name = "FILE",
		help = "JSON file with an option array or an object of named option arrays"
	)]
	pub(crate) options_file: Option<PathBuf>,
	#[arg(
		short = 's',
		long = "select",
		value_name = "VALUE",
		value_delimiter = ',',
		action = ArgAction::Append,
		help = "Pre-select options with this value (default: none)"
	)]
	pub(crate) select: Vec<String>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "MULTISEL_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'w',
		long,
		value_name = "PX",
		help = "Widget width as a pixel length such as 240px (default: 200px)"
	)]
	pub(crate) width: Option<String>,
	#[arg(
		short = 'L',
		long,
		value_name = "TEXT",
		help = "Label shown before each summary (default: list name for named lists)"
	)]
	pub(crate) label: Option<String>,
	#[arg(
		long,
		help = "Summarise every selected option instead of the first one (default: disabled)"
	)]
	pub(crate) fit: bool,
	#[arg(
		short = 'm',
		long = "match-mode",
		value_enum,
		help = "How filter queries are interpreted (default: literal)"
	)]
	pub(crate) match_mode: Option<MatchModeArg>,
	#[arg(
		long,
		value_name = "THEME",
		help = "Select a theme by name (default: slate)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		short = 't',
		long,
		value_name = "TITLE",
		help = "Title shown above the widgets (default: multisel)"
	)]
	pub(crate) title: Option<String>,
	#[arg(long = "show-log", help = "Show the runtime log pane (default: disabled)")]
	pub(crate) show_log: bool,
	#[arg(
		long = "log-level",
		value_enum,
		help = "Minimum level captured by the log pane (default: info)"
	)]
	pub(crate) log_level: Option<LogLevelArg>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print the result")]
	pub(crate) output: OutputFormat,
}
