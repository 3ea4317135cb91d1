mod types;

use ratatui::style::{Color, Modifier, Style};

pub use types::{Theme, ThemeRegistration};

/// Name of the theme used when none is requested.
pub const DEFAULT_THEME: &str = "slate";

/// Get the default built-in theme.
#[must_use]
pub fn default_theme() -> Theme {
	slate()
}

/// Return the built-in themes bundled with the application.
#[must_use]
pub fn builtin_themes() -> Vec<ThemeRegistration> {
	vec![
		ThemeRegistration::new(DEFAULT_THEME, slate()).alias("default"),
		ThemeRegistration::new("paper", paper()).alias("light"),
		ThemeRegistration::new("mono", mono()).alias("plain"),
	]
}

/// Look up a theme by name or alias, ignoring case.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	types::find(&builtin_themes(), name).map(|registration| registration.theme)
}

/// Canonical names of every built-in theme.
#[must_use]
pub fn names() -> Vec<String> {
	builtin_themes()
		.into_iter()
		.map(|registration| registration.name)
		.collect()
}

impl Default for Theme {
	fn default() -> Self {
		default_theme()
	}
}

fn slate() -> Theme {
	Theme {
		header: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
		row_highlight: Style::new().bg(Color::Rgb(0x3a, 0x3f, 0x4b)),
		prompt: Style::new().fg(Color::Yellow),
		empty: Style::new().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
		highlight: Style::new().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
		link: Style::new()
			.fg(Color::Blue)
			.add_modifier(Modifier::UNDERLINED),
		checked: Style::new().fg(Color::Green),
		border: Style::new().fg(Color::DarkGray),
	}
}

fn paper() -> Theme {
	Theme {
		header: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
		row_highlight: Style::new().bg(Color::Rgb(0xee, 0xee, 0xee)),
		prompt: Style::new().fg(Color::Rgb(0x80, 0x50, 0x00)),
		empty: Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC),
		highlight: Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
		link: Style::new()
			.fg(Color::Blue)
			.add_modifier(Modifier::UNDERLINED),
		checked: Style::new().fg(Color::Rgb(0x00, 0x80, 0x00)),
		border: Style::new().fg(Color::Gray),
	}
}

fn mono() -> Theme {
	Theme {
		header: Style::new().add_modifier(Modifier::BOLD),
		row_highlight: Style::new().add_modifier(Modifier::REVERSED),
		prompt: Style::new(),
		empty: Style::new().add_modifier(Modifier::DIM),
		highlight: Style::new().add_modifier(Modifier::BOLD),
		link: Style::new().add_modifier(Modifier::UNDERLINED),
		checked: Style::new().add_modifier(Modifier::BOLD),
		border: Style::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup_accepts_names_and_aliases() {
		assert!(by_name("slate").is_some());
		assert!(by_name("DEFAULT").is_some());
		assert!(by_name(" light ").is_some());
		assert!(by_name("solarized").is_none());
	}

	#[test]
	fn names_list_canonical_entries() {
		assert_eq!(names(), vec!["slate", "paper", "mono"]);
	}
}
