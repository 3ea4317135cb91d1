//! State container for the terminal front-end.

use std::time::Instant;

use multisel_core::{MemorySurface, NodeId, Page, WidgetId};

use super::hits::HitMap;
use crate::config::UiLabels;
use crate::outcome::{SelectionOutcome, WidgetSelection};
use crate::style::StyleConfig;

/// A widget hosted by the app together with the control it replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	/// Id of the source control.
	pub source_id: String,
	/// Widget created over it.
	pub widget: WidgetId,
}

/// Row under the pointer or the keyboard cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Hover {
	pub widget: WidgetId,
	pub index: usize,
}

/// Aggregate state shared across the terminal UI.
///
/// The page is the single source of truth: everything drawn is read back
/// from its surface, and every input becomes a surface event.
pub struct App {
	pub(crate) page: Page<MemorySurface>,
	pub(crate) entries: Vec<Entry>,
	pub(crate) ui: UiLabels,
	/// Current style and theme configuration.
	pub style: StyleConfig,
	pub(crate) show_log: bool,
	pub(crate) hover: Option<Hover>,
	pub(crate) scroll: usize,
	pub(crate) cursor: usize,
	pub(crate) hits: HitMap,
	started: Instant,
}

impl App {
	/// Wrap a populated page. `entries` lists its widgets in display order.
	pub fn new(page: Page<MemorySurface>, entries: Vec<Entry>) -> Self {
		Self {
			page,
			entries,
			ui: UiLabels::default(),
			style: StyleConfig::default(),
			show_log: false,
			hover: None,
			scroll: 0,
			cursor: 0,
			hits: HitMap::default(),
			started: Instant::now(),
		}
	}

	#[must_use]
	pub fn page(&self) -> &Page<MemorySurface> {
		&self.page
	}

	#[must_use]
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Replace the chrome labels.
	pub fn set_labels(&mut self, labels: UiLabels) {
		self.ui = labels;
	}

	pub fn set_log_pane(&mut self, show: bool) {
		self.show_log = show;
	}

	/// Snapshot of every widget's selection, read from its backing control.
	#[must_use]
	pub fn outcome(&self, accepted: bool) -> SelectionOutcome {
		let selections = self
			.entries
			.iter()
			.map(|entry| match self.page.widget(entry.widget) {
				Some(widget) => WidgetSelection {
					source_id: entry.source_id.clone(),
					values: widget.selection().selected_values(),
					texts: widget.selection().selected_texts(),
					available: true,
				},
				None => WidgetSelection {
					source_id: entry.source_id.clone(),
					values: Vec::new(),
					texts: Vec::new(),
					available: false,
				},
			})
			.collect();
		SelectionOutcome {
			accepted,
			selections,
		}
	}

	/// Run every deferred task that has fallen due in wall-clock time.
	pub fn tick(&mut self) {
		let elapsed = self.started.elapsed();
		if elapsed > self.page.now() {
			self.page.advance_to(elapsed);
		}
		self.sync_focus();
	}

	pub(crate) fn open_widget_id(&self) -> Option<WidgetId> {
		self.page.open_widget().map(|widget| widget.id())
	}

	/// Blur a focused node that is no longer displayed and drop a hover that
	/// belongs to a closed widget.
	pub(crate) fn sync_focus(&mut self) {
		if let Some(node) = self.page.surface().focused()
			&& !self.page.surface().is_displayed(node)
		{
			self.page.surface_mut().take_focus();
			self.page.blur(node);
		}

		let open = self.open_widget_id();
		if let Some(hover) = self.hover
			&& Some(hover.widget) != open
		{
			self.clear_hover();
			self.scroll = 0;
		}
	}

	pub(crate) fn row_node(&self, hover: Hover) -> Option<NodeId> {
		self.page
			.widget(hover.widget)?
			.rows()
			.get(hover.index)
			.map(|row| row.row())
	}

	pub(crate) fn set_hover(&mut self, widget: WidgetId, index: usize) {
		let next = Hover { widget, index };
		if self.hover == Some(next) {
			return;
		}
		self.clear_hover();
		if let Some(row) = self.row_node(next) {
			self.page.pointer_enter(row);
			self.hover = Some(next);
		}
	}

	pub(crate) fn clear_hover(&mut self) {
		if let Some(hover) = self.hover.take()
			&& let Some(row) = self.row_node(hover)
		{
			self.page.pointer_leave(row);
		}
	}

	/// Option indexes of the rows the filter currently shows.
	pub(crate) fn visible_rows(&self, widget: WidgetId) -> Vec<usize> {
		self.page.widget(widget).map_or_else(Vec::new, |widget| {
			widget
				.visibility_mask()
				.iter()
				.enumerate()
				.filter_map(|(index, &visible)| visible.then_some(index))
				.collect()
		})
	}
}
