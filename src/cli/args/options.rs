use clap::ValueEnum;

/// Query interpretation accepted via the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum MatchModeArg {
	Literal,
	#[value(alias = "regex")]
	Pattern,
}

impl MatchModeArg {
	/// Return the mode name consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			Self::Literal => "literal",
			Self::Pattern => "pattern",
		}
	}
}

/// Log levels selectable from the CLI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogLevelArg {
	Off,
	Error,
	Warn,
	Info,
	Debug,
	Trace,
}

impl LogLevelArg {
	/// Return the level name consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			Self::Off => "off",
			Self::Error => "error",
			Self::Warn => "warn",
			Self::Info => "info",
			Self::Debug => "debug",
			Self::Trace => "trace",
		}
	}
}

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
