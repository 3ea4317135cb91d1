use anyhow::Result;
use log::info;
use multisel::{MultiSelectUi, SelectionOutcome, UiLabels, theme};

use crate::settings::ResolvedConfig;

/// Coordinates building and running the interactive form.
pub(crate) struct SelectWorkflow {
	ui: MultiSelectUi,
}

impl SelectWorkflow {
	pub(crate) fn from_config(config: &ResolvedConfig) -> Self {
		Self {
			ui: build_ui(config),
		}
	}

	pub(crate) fn run(self) -> Result<SelectionOutcome> {
		self.ui.run()
	}
}

/// Translate resolved configuration into a configured [`MultiSelectUi`].
fn build_ui(config: &ResolvedConfig) -> MultiSelectUi {
	let mut ui = MultiSelectUi::new().with_log_pane(config.show_log);

	if let Some(title) = &config.title {
		ui = ui.with_labels(UiLabels::titled(title.clone()));
	}
	if let Some(theme) = config.theme.as_deref().and_then(theme::by_name) {
		ui = ui.with_theme(theme);
	}

	for list in &config.lists {
		info!("{}: {} options", list.id, list.options.len());
		ui = ui.with_select(
			list.id.clone(),
			list.options.clone(),
			config.widget_config_for(list),
		);
	}
	ui
}

#[cfg(test)]
mod tests {
	use multisel::OptionList;
	use multisel::options::from_items;

	use super::*;
	use crate::settings::fixture;

	#[test]
	fn every_list_becomes_a_labelled_widget() {
		let cities = from_items(&["NY=New York", "LA=Los Angeles"]).expect("valid items");
		let colors = OptionList::new("colors", from_items(&["r=Red"]).expect("valid").options);
		let mut config = fixture(vec![cities, colors]);
		config.lists[0].preselect(&["LA".to_string()]);

		let app = build_ui(&config).build();

		assert_eq!(app.entries().len(), 2);
		let first = app.page().widget(app.entries()[0].widget).expect("mounted");
		assert_eq!(first.config().label.as_deref(), Some("options"));
		assert_eq!(first.values(), vec!["LA"]);
		assert_eq!(first.summary(), "Los Angeles");

		let outcome = app.outcome(true);
		assert_eq!(outcome.values_for("colors"), Some(&[][..]));
	}
}
