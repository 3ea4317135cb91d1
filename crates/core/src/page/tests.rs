use std::time::Duration;

use super::*;
use crate::backing::{SelectOption, SourceControl};
use crate::surface::{MemorySurface, StyleProperty};
use crate::widget::PLACEHOLDER;

fn cities() -> Vec<SelectOption> {
	vec![
		SelectOption::new("NY", "New York"),
		SelectOption::new("LA", "Los Angeles"),
	]
}

fn cities_page(config: WidgetConfig) -> (Page<MemorySurface>, WidgetId, SourceControl) {
	let mut surface = MemorySurface::new();
	let control = surface.add_select("cities", cities());
	let mut page = Page::new(surface);
	let id = page.create("cities", config);
	(page, id, control)
}

fn widget(page: &Page<MemorySurface>, id: WidgetId) -> &WidgetInstance {
	page.widget(id).expect("widget is mounted")
}

fn type_query(page: &mut Page<MemorySurface>, id: WidgetId, text: &str) {
	let input = widget(page, id).filter_input();
	page.surface_mut().set_input_value(input, text);
	page.key_up(input);
}

fn click_row_text(page: &mut Page<MemorySurface>, id: WidgetId, index: usize) {
	let cell = widget(page, id).rows()[index].text_cell();
	page.click(cell);
}

fn open_count(page: &Page<MemorySurface>) -> usize {
	page.widgets().filter(|widget| widget.is_open()).count()
}

#[test]
fn toggling_rows_updates_values_and_summary() {
	let (mut page, id, control) = cities_page(WidgetConfig::default());

	click_row_text(&mut page, id, 0);
	assert_eq!(widget(&page, id).values(), vec!["NY"]);
	assert_eq!(control.selected_values(), vec!["NY"]);
	assert_eq!(page.surface().text(widget(&page, id).link()), "New York");

	click_row_text(&mut page, id, 1);
	assert_eq!(page.surface().text(widget(&page, id).link()), "New York...");

	click_row_text(&mut page, id, 0);
	assert_eq!(widget(&page, id).values(), vec!["LA"]);
	assert_eq!(page.surface().text(widget(&page, id).link()), "Los Angeles");
}

#[test]
fn fit_summary_joins_every_selected_text() {
	let (mut page, id, _) = cities_page(WidgetConfig::default().with_selected_fit(true));
	click_row_text(&mut page, id, 0);
	click_row_text(&mut page, id, 1);
	assert_eq!(
		page.surface().text(widget(&page, id).link()),
		"New York,Los Angeles"
	);
}

#[test]
fn clicking_the_checkbox_toggles_exactly_once() {
	let (mut page, id, control) = cities_page(WidgetConfig::default());
	let checkbox = widget(&page, id).rows()[1].checkbox();

	page.click(checkbox);
	assert!(page.surface().is_checked(checkbox));
	assert_eq!(control.selected_values(), vec!["LA"]);

	page.click(checkbox);
	assert!(!page.surface().is_checked(checkbox));
	assert!(control.selected_values().is_empty());
}

#[test]
fn selection_matches_checked_boxes_for_any_toggle_sequence() {
	let (mut page, id, control) = cities_page(WidgetConfig::default());
	let link = widget(&page, id).link();
	page.click(link);

	let mut seed = 7u32;
	for step in 0..40 {
		seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
		let index = (seed >> 16) as usize % 2;
		let row = widget(&page, id).rows()[index];
		match step % 3 {
			0 => page.click(row.checkbox()),
			1 => page.click(row.text_cell()),
			_ => {
				type_query(&mut page, id, if seed % 2 == 0 { "york" } else { "zzz" });
				page.advance(Duration::from_millis(300));
				page.click(row.row());
			}
		}

		let checked: Vec<String> = widget(&page, id)
			.rows()
			.iter()
			.zip(control.options().iter())
			.filter(|(row, _)| page.surface().is_checked(row.checkbox()))
			.map(|(_, option)| option.value.clone())
			.collect();
		assert_eq!(control.selected_values(), checked, "step {step}");
	}
}

#[test]
fn filtered_out_rows_keep_live_bindings() {
	let (mut page, id, control) = cities_page(WidgetConfig::default());
	page.open(id);
	type_query(&mut page, id, "los");
	page.advance(Duration::from_millis(300));
	assert_eq!(widget(&page, id).visibility_mask(), &[false, true]);

	click_row_text(&mut page, id, 0);
	assert_eq!(control.selected_values(), vec!["NY"]);
}

#[test]
fn filter_scenarios() {
	let (mut page, id, _) = cities_page(WidgetConfig::default());
	page.open(id);

	type_query(&mut page, id, "los");
	page.advance(Duration::from_millis(299));
	assert_eq!(widget(&page, id).visibility_mask(), &[true, true]);
	page.advance(Duration::from_millis(1));
	assert_eq!(widget(&page, id).visibility_mask(), &[false, true]);
	let empty_row = widget(&page, id).empty_row();
	assert!(!page.surface().is_visible(empty_row));

	type_query(&mut page, id, "zzz");
	page.advance(Duration::from_millis(300));
	assert_eq!(widget(&page, id).visibility_mask(), &[false, false]);
	assert!(page.surface().is_displayed(empty_row));
	let rows = widget(&page, id).rows().to_vec();
	assert!(rows.iter().all(|row| !page.surface().is_visible(row.row())));
}

#[test]
fn rapid_typing_collapses_into_one_evaluation() {
	let (mut page, id, _) = cities_page(WidgetConfig::default());
	page.open(id);

	type_query(&mut page, id, "a");
	page.advance(Duration::from_millis(100));
	type_query(&mut page, id, "ab");
	page.advance(Duration::from_millis(100));
	type_query(&mut page, id, "abc");

	page.advance(Duration::from_millis(299));
	assert_eq!(widget(&page, id).filter_engine().evaluations(), 0);

	page.advance(Duration::from_millis(1));
	assert_eq!(page.now(), Duration::from_millis(500));
	let engine = widget(&page, id).filter_engine();
	assert_eq!(engine.evaluations(), 1);
	assert_eq!(engine.query(), "abc");

	page.advance(Duration::from_secs(1));
	assert_eq!(widget(&page, id).filter_engine().evaluations(), 1);
}

#[test]
fn outside_click_closes_and_resets_filter() {
	let (mut page, id, _) = cities_page(WidgetConfig::default());
	page.open(id);
	type_query(&mut page, id, "zzz");
	page.advance(Duration::from_millis(300));

	let body = page.surface().body();
	page.click(body);

	let widget = widget(&page, id);
	assert!(!widget.is_open());
	assert_eq!(widget.query(), "");
	assert_eq!(widget.visibility_mask(), &[true, true]);
	assert_eq!(page.surface().input_value(widget.filter_input()), "");
	assert!(!page.surface().is_visible(widget.empty_row()));
	assert_eq!(page.registry().current(), None);
}

#[test]
fn clicks_inside_the_open_widget_keep_it_open() {
	let (mut page, id, _) = cities_page(WidgetConfig::default());
	let link = widget(&page, id).link();
	page.click(link);
	assert!(widget(&page, id).is_open());

	click_row_text(&mut page, id, 0);
	let filter = widget(&page, id).filter_input();
	page.click(filter);
	assert!(widget(&page, id).is_open());
	assert_eq!(page.registry().current(), Some(id));
}

#[test]
fn closing_cancels_a_pending_filter() {
	let (mut page, id, _) = cities_page(WidgetConfig::default());
	page.open(id);
	type_query(&mut page, id, "zzz");
	page.close(id);

	assert!(!widget(&page, id).filter_engine().is_pending());
	page.advance(Duration::from_secs(1));
	let widget = widget(&page, id);
	assert_eq!(widget.filter_engine().evaluations(), 1);
	assert_eq!(widget.query(), "");
	assert_eq!(widget.visibility_mask(), &[true, true]);
}

#[test]
fn focus_follows_open_after_a_delay() {
	let config = WidgetConfig::default().with_filter_focus_class("active");
	let (mut page, id, _) = cities_page(config);
	let filter = widget(&page, id).filter_input();

	page.open(id);
	page.advance(Duration::from_millis(49));
	assert_eq!(page.surface().focused(), None);

	page.advance(Duration::from_millis(1));
	assert_eq!(page.surface().focused(), Some(filter));
	assert!(page.surface().has_class(filter, "active"));

	page.blur(filter);
	assert!(!page.surface().has_class(filter, "active"));
}

#[test]
fn focus_request_is_dropped_when_closed_first() {
	let (mut page, id, _) = cities_page(WidgetConfig::default());
	page.open(id);
	page.close(id);
	page.advance(Duration::from_millis(100));
	assert_eq!(page.surface().focused(), None);
}

#[test]
fn closing_drops_filter_focus_and_its_class() {
	let config = WidgetConfig::default().with_filter_focus_class("active");
	let (mut page, id, _) = cities_page(config);
	let filter = widget(&page, id).filter_input();

	page.open(id);
	page.advance(Duration::from_millis(50));
	assert!(page.surface().has_class(filter, "active"));

	let body = page.surface().body();
	page.click(body);

	assert!(!widget(&page, id).is_open());
	assert_eq!(page.surface().focused(), None);
	assert!(!page.surface().has_class(filter, "active"));
}

#[test]
fn height_follows_visible_rows() {
	let (mut page, id, _) = cities_page(WidgetConfig::default());
	let results = widget(&page, id).results_container();

	page.open(id);
	page.advance(Duration::from_millis(30));
	assert_eq!(page.surface().style(results, StyleProperty::Height), Some("42px"));

	type_query(&mut page, id, "york");
	page.advance(Duration::from_millis(330));
	assert_eq!(page.surface().style(results, StyleProperty::Height), Some("22px"));

	type_query(&mut page, id, "zzz");
	page.advance(Duration::from_millis(330));
	assert_eq!(page.surface().style(results, StyleProperty::Height), Some("22px"));
}

#[test]
fn hover_highlights_rows() {
	let (mut page, id, _) = cities_page(WidgetConfig::default());
	let row = widget(&page, id).rows()[0].row();

	page.pointer_enter(row);
	assert_eq!(
		page.surface().style(row, StyleProperty::Background),
		Some(crate::row::HOVER_BACKGROUND)
	);
	page.pointer_leave(row);
	assert_eq!(page.surface().style(row, StyleProperty::Background), None);
}

#[test]
fn opening_another_widget_closes_the_first() {
	let mut surface = MemorySurface::new();
	surface.add_select("first", cities());
	surface.add_select("second", cities());
	let mut page = Page::new(surface);
	let first = page.create("first", WidgetConfig::default());
	let second = page.create("second", WidgetConfig::default());

	let first_link = widget(&page, first).link();
	let second_link = widget(&page, second).link();
	page.click(first_link);
	page.click(second_link);

	assert!(!widget(&page, first).is_open());
	assert!(widget(&page, second).is_open());
	assert_eq!(page.registry().current(), Some(second));
	assert_eq!(page.surface().document_listeners(), &[EventKind::Click]);
}

#[test]
fn at_most_one_widget_is_ever_open() {
	let mut surface = MemorySurface::new();
	for name in ["a", "b", "c"] {
		surface.add_select(name, cities());
	}
	let mut page = Page::new(surface);
	let ids: Vec<WidgetId> = ["a", "b", "c"]
		.into_iter()
		.map(|name| page.create(name, WidgetConfig::default()))
		.collect();

	let mut seed = 42u32;
	for step in 0..200 {
		seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
		let id = ids[(seed >> 16) as usize % ids.len()];
		match (seed >> 8) % 6 {
			0 => {
				let link = widget(&page, id).link();
				page.click(link);
			}
			1 => {
				let body = page.surface().body();
				page.click(body);
			}
			2 => page.open(id),
			3 => page.close(id),
			4 => click_row_text(&mut page, id, 0),
			_ => page.advance(Duration::from_millis(u64::from(seed % 400))),
		}

		assert!(open_count(&page) <= 1, "step {step}");
		let open = page.widgets().find(|widget| widget.is_open()).map(WidgetInstance::id);
		assert_eq!(page.registry().current(), open, "step {step}");
	}
}

#[test]
fn missing_source_control_yields_inert_widget() {
	let (mut page, _, _) = cities_page(WidgetConfig::default());
	let inert = page.create("missing", WidgetConfig::default());

	assert!(page.is_inert(inert));
	assert!(page.widget(inert).is_none());
	assert!(matches!(
		page.inert_reason(inert),
		Some(WidgetError::MissingBackingControl { .. })
	));

	page.open(inert);
	assert_eq!(page.registry().current(), None);
	assert_eq!(page.widgets().count(), 1);
}

#[test]
fn refresh_and_open_pick_up_host_changes() {
	let (mut page, id, control) = cities_page(WidgetConfig::default());
	assert_eq!(page.surface().text(widget(&page, id).link()), PLACEHOLDER);

	control.set_selected(1, true).expect("index 1 exists");
	page.refresh(id);
	let checkbox = widget(&page, id).rows()[1].checkbox();
	assert!(page.surface().is_checked(checkbox));
	assert_eq!(page.surface().text(widget(&page, id).link()), "Los Angeles");

	control.set_selected(1, false).expect("index 1 exists");
	page.open(id);
	assert!(!page.surface().is_checked(checkbox));
}
