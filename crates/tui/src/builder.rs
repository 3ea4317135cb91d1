use anyhow::Result;
use multisel_core::{MemorySurface, Page, SelectOption, WidgetConfig};

use crate::App;
use crate::app::Entry;
use crate::config::UiLabels;
use crate::outcome::SelectionOutcome;
use crate::style::{StyleConfig, Theme};

/// A small builder for the interactive form: register the source controls
/// and the widgets to put over them, then run.
pub struct MultiSelectUi {
	surface: MemorySurface,
	widgets: Vec<(String, WidgetConfig)>,
	labels: UiLabels,
	theme: Option<Theme>,
	show_log: bool,
}

impl MultiSelectUi {
	#[must_use]
	pub fn new() -> Self {
		Self {
			surface: MemorySurface::new(),
			widgets: Vec::new(),
			labels: UiLabels::default(),
			theme: None,
			show_log: false,
		}
	}

	/// Register a source control without a widget over it.
	#[must_use]
	pub fn with_control(mut self, source_id: impl Into<String>, options: Vec<SelectOption>) -> Self {
		self.surface.add_select(source_id, options);
		self
	}

	/// Request a widget over `source_id`. A control that was never registered
	/// leaves the widget inert.
	#[must_use]
	pub fn with_widget(mut self, source_id: impl Into<String>, config: WidgetConfig) -> Self {
		self.widgets.push((source_id.into(), config));
		self
	}

	/// Register a control and put a widget over it.
	#[must_use]
	pub fn with_select(
		self,
		source_id: impl Into<String>,
		options: Vec<SelectOption>,
		config: WidgetConfig,
	) -> Self {
		let source_id = source_id.into();
		self.with_control(source_id.clone(), options)
			.with_widget(source_id, config)
	}

	#[must_use]
	pub fn with_labels(mut self, labels: UiLabels) -> Self {
		self.labels = labels;
		self
	}

	#[must_use]
	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = Some(theme);
		self
	}

	#[must_use]
	pub fn with_log_pane(mut self, show: bool) -> Self {
		self.show_log = show;
		self
	}

	/// Mount every widget and hand back the app without starting it.
	#[must_use]
	pub fn build(self) -> App {
		let mut page = Page::new(self.surface);
		let entries = self
			.widgets
			.into_iter()
			.map(|(source_id, config)| {
				let widget = page.create(&source_id, config);
				Entry { source_id, widget }
			})
			.collect();

		let mut app = App::new(page, entries);
		app.set_labels(self.labels);
		app.set_log_pane(self.show_log);
		if let Some(theme) = self.theme {
			app.style = StyleConfig::with_theme(theme);
		}
		app
	}

	/// Build the app and run it until the user finishes.
	pub fn run(self) -> Result<SelectionOutcome> {
		self.build().run()
	}
}

impl Default for MultiSelectUi {
	fn default() -> Self {
		Self::new()
	}
}
