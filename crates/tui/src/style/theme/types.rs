use ratatui::style::{Color, Modifier, Style};

/// Styles for every element the widget view draws.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
	/// Title line above the widgets.
	pub header: Style,
	/// Row under the pointer or keyboard cursor.
	pub row_highlight: Style,
	/// Filter input prompt.
	pub prompt: Style,
	/// "None found" row and inert widgets.
	pub empty: Style,
	/// Summary link of the open widget.
	pub highlight: Style,
	/// Summary link of a closed widget.
	pub link: Style,
	/// Checked box marker.
	pub checked: Style,
	/// Border around an open selector.
	pub border: Style,
}

impl Theme {
	/// Style for the filter input while it holds focus.
	#[must_use]
	pub fn focused_prompt(&self) -> Style {
		self.prompt.add_modifier(Modifier::BOLD)
	}

	/// Border style of the selector, emphasised while its filter is focused.
	#[must_use]
	pub fn border_style(&self, focused: bool) -> Style {
		if focused {
			self.border.fg(self.highlight.fg.unwrap_or(Color::Reset))
		} else {
			self.border
		}
	}
}

/// A named theme offered to the CLI.
#[derive(Debug, Clone)]
pub struct ThemeRegistration {
	/// The name of the theme.
	pub name: String,
	/// The theme configuration.
	pub theme: Theme,
	/// Alternate names for the theme.
	pub aliases: Vec<String>,
}

impl ThemeRegistration {
	/// Creates a new theme registration with the given name and theme.
	pub fn new(name: impl Into<String>, theme: Theme) -> Self {
		Self {
			name: name.into(),
			theme,
			aliases: Vec::new(),
		}
	}

	/// Adds a single alias to this theme registration.
	#[must_use]
	pub fn alias(mut self, alias: impl Into<String>) -> Self {
		self.aliases.push(alias.into());
		self
	}

	fn answers_to(&self, name: &str) -> bool {
		self.name.eq_ignore_ascii_case(name)
			|| self
				.aliases
				.iter()
				.any(|alias| alias.eq_ignore_ascii_case(name))
	}
}

pub(super) fn find<'a>(
	registrations: &'a [ThemeRegistration],
	name: &str,
) -> Option<&'a ThemeRegistration> {
	let name = name.trim();
	registrations
		.iter()
		.find(|registration| registration.answers_to(name))
}
