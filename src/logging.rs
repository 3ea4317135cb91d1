//! Route `log` records into the in-memory buffer shown by the log pane.

use anyhow::{Result, anyhow};
use log::LevelFilter;

/// Install the terminal logger and capture records at `level` and above.
pub fn initialize(level: LevelFilter) -> Result<()> {
	tui_logger::init_logger(LevelFilter::Trace)
		.map_err(|err| anyhow!("failed to install the logger: {err}"))?;
	tui_logger::set_default_level(level);
	Ok(())
}

/// Parse a level name as used in configuration files.
#[must_use]
pub fn parse_level(name: &str) -> Option<LevelFilter> {
	name.trim().parse().ok()
}
