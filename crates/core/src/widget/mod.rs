//! A single multi-select widget and its open/close lifecycle.
//!
//! The widget owns its [`BackingSelection`], [`FilterEngine`] and rows. It
//! never holds on to the surface, scheduler or registry; the page lends them
//! through a [`WidgetContext`] for the duration of each handler.


use std::fmt;

use log::{debug, error};

use crate::backing::BackingSelection;
use crate::config::WidgetConfig;
use crate::filter::FilterEngine;
use crate::registry::OpenInstanceRegistry;
use crate::row::RowBinding;
use crate::schedule::{Scheduler, Task, TaskKind, TimerSlot};
use crate::surface::{ElementKind, EventKind, NodeId, StyleProperty, Surface};
use crate::WidgetError;

/// Summary shown when nothing is selected.
pub const PLACEHOLDER: &str = "Select";
/// Marker appended to the first selected text when more are selected.
pub const ELLIPSIS: &str = "...";
/// Text of the row shown when the filter hides every option.
pub const EMPTY_STATE_TEXT: &str = "None found";

/// Stable identity of a widget within its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(usize);

impl WidgetId {
	#[must_use]
	pub const fn new(raw: usize) -> Self {
		Self(raw)
	}

	#[must_use]
	pub const fn raw(self) -> usize {
		self.0
	}
}

impl fmt::Display for WidgetId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "widget#{}", self.0)
	}
}

/// Whether the selector surface is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
	#[default]
	Closed,
	Open,
}

/// What a node does when one of its events fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
	OpenLink,
	FilterKeyUp,
	FilterFocus,
	FilterBlur,
	RowClick(usize),
	RowEnter(usize),
	RowLeave(usize),
	CheckboxChange(usize),
}

/// A handler attached to a node for one event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
	pub node: NodeId,
	pub event: EventKind,
	pub handler: Handler,
}

impl Binding {
	fn new(node: NodeId, event: EventKind, handler: Handler) -> Self {
		Self {
			node,
			event,
			handler,
		}
	}
}

/// Collaborators lent to a widget while it handles an event or a task.
pub struct WidgetContext<'a, S> {
	pub surface: &'a mut S,
	pub scheduler: &'a mut Scheduler,
	pub registry: &'a mut OpenInstanceRegistry,
}

/// Node handles created at mount time.
#[derive(Debug, Clone, Copy)]
struct WidgetNodes {
	source: NodeId,
	container: NodeId,
	link: NodeId,
	selector: NodeId,
	filter: NodeId,
	results: NodeId,
	table: NodeId,
	empty_row: NodeId,
}

/// Build the summary text for the selected option texts.
#[must_use]
pub fn summary_text(texts: &[String], show_selected_fit: bool) -> String {
	match texts {
		[] => PLACEHOLDER.to_string(),
		_ if show_selected_fit => texts.join(","),
		[only] => only.clone(),
		[first, ..] => format!("{first}{ELLIPSIS}"),
	}
}

/// A mounted multi-select widget.
#[derive(Debug)]
pub struct WidgetInstance {
	id: WidgetId,
	config: WidgetConfig,
	selection: BackingSelection,
	filter: FilterEngine,
	rows: Vec<RowBinding>,
	nodes: WidgetNodes,
	state: WidgetState,
	height_timer: TimerSlot,
	focus_timer: TimerSlot,
	bindings: Vec<Binding>,
}

impl WidgetInstance {
	/// Replace the source control `source_id` with a widget.
	///
	/// The source control is hidden and the widget container is inserted
	/// right after it. Fails with [`WidgetError::MissingBackingControl`] when
	/// the surface has no such control, in which case nothing is rendered.
	pub fn mount<S: Surface>(
		id: WidgetId,
		source_id: &str,
		config: WidgetConfig,
		surface: &mut S,
		registry: &mut OpenInstanceRegistry,
	) -> Result<Self, WidgetError> {
		let (source, control) = surface
			.source_control(source_id)
			.ok_or_else(|| WidgetError::missing_control(source_id))?;
		let selection = BackingSelection::new(control);

		surface.set_visible(source, false);

		let container = surface.create_element(ElementKind::Container);
		surface.add_class(container, "multi_select");
		surface.set_style(container, StyleProperty::Width, Some(&config.width));
		surface.insert_after(source, container);
		registry.tag_container(container, id);

		let mut bindings = Vec::new();

		let link_container = surface.create_element(ElementKind::LinkContainer);
		surface.add_class(link_container, "link_container");
		surface.append_child(container, link_container);
		if let Some(label) = &config.label {
			let prefix = surface.create_element(ElementKind::Label);
			surface.set_text(prefix, &format!("{label}: "));
			surface.append_child(link_container, prefix);
		}
		let link = surface.create_element(ElementKind::Link);
		surface.add_class(link, "select_link");
		surface.append_child(link_container, link);
		bindings.push(Binding::new(link, EventKind::Click, Handler::OpenLink));

		let selector = surface.create_element(ElementKind::SelectorContainer);
		surface.add_class(selector, "selector_container");
		surface.set_visible(selector, false);
		surface.append_child(container, selector);

		let filter = surface.create_element(ElementKind::FilterInput);
		surface.add_class(filter, "search");
		surface.append_child(selector, filter);
		bindings.push(Binding::new(filter, EventKind::KeyUp, Handler::FilterKeyUp));
		if config.filter_focus_class.is_some() {
			bindings.push(Binding::new(filter, EventKind::Focus, Handler::FilterFocus));
			bindings.push(Binding::new(filter, EventKind::Blur, Handler::FilterBlur));
		}

		let results = surface.create_element(ElementKind::ResultsContainer);
		surface.add_class(results, "results_container");
		let initial_height = format!("{}px", config.timings.max_height);
		surface.set_style(results, StyleProperty::Height, Some(&initial_height));
		surface.append_child(selector, results);

		let table = surface.create_element(ElementKind::ResultsTable);
		surface.add_class(table, "results");
		surface.append_child(results, table);

		let empty_row = surface.create_element(ElementKind::Row);
		let empty_cell = surface.create_element(ElementKind::TextCell);
		surface.add_class(empty_cell, "text-col");
		surface.set_text(empty_cell, EMPTY_STATE_TEXT);
		surface.append_child(empty_row, empty_cell);
		surface.set_visible(empty_row, false);
		surface.append_child(table, empty_row);

		let rows: Vec<RowBinding> = {
			let options = selection.get_all();
			options
				.iter()
				.enumerate()
				.map(|(index, option)| RowBinding::render(surface, table, index, option))
				.collect()
		};
		for row in &rows {
			let index = row.index();
			bindings.push(Binding::new(row.row(), EventKind::Click, Handler::RowClick(index)));
			bindings.push(Binding::new(
				row.row(),
				EventKind::PointerEnter,
				Handler::RowEnter(index),
			));
			bindings.push(Binding::new(
				row.row(),
				EventKind::PointerLeave,
				Handler::RowLeave(index),
			));
			bindings.push(Binding::new(
				row.checkbox(),
				EventKind::Change,
				Handler::CheckboxChange(index),
			));
		}

		for binding in &bindings {
			surface.listen(binding.node, binding.event);
		}

		let filter_engine = FilterEngine::new(
			rows.len(),
			config.match_mode,
			config.timings.debounce(),
		);

		let widget = Self {
			id,
			config,
			selection,
			filter: filter_engine,
			rows,
			nodes: WidgetNodes {
				source,
				container,
				link,
				selector,
				filter,
				results,
				table,
				empty_row,
			},
			state: WidgetState::Closed,
			height_timer: TimerSlot::default(),
			focus_timer: TimerSlot::default(),
			bindings,
		};
		widget.update_link(surface);
		debug!(
			"{id}: mounted over '{source_id}' with {} options",
			widget.rows.len()
		);
		Ok(widget)
	}

	/// Show the selector and register as the open widget.
	///
	/// Focus moves to the filter field after the configured delay, so the
	/// selector is visible before focus is requested.
	pub fn open<S: Surface>(&mut self, ctx: &mut WidgetContext<'_, S>) {
		self.sync_rows(ctx.surface);
		ctx.surface.set_visible(self.nodes.selector, true);
		self.state = WidgetState::Open;
		ctx.registry.notify_opened(self.id);
		self.focus_timer.arm(
			ctx.scheduler,
			self.config.timings.focus_delay(),
			Task::new(self.id, TaskKind::FocusFilter),
		);
		self.schedule_height(ctx.scheduler);
		debug!("{}: opened", self.id);
	}

	/// Hide the selector and reset the filter.
	///
	/// Pending filter and focus timers are cancelled and the empty query is
	/// evaluated immediately, so every row is visible again when the widget
	/// next opens. A focused filter field loses focus and its focus class.
	pub fn close<S: Surface>(&mut self, ctx: &mut WidgetContext<'_, S>) {
		ctx.surface.set_visible(self.nodes.selector, false);
		self.state = WidgetState::Closed;
		if ctx.surface.blur(self.nodes.filter) {
			self.filter_focus_changed(ctx.surface, false);
		}
		ctx.surface.set_input_value(self.nodes.filter, "");
		self.filter.cancel(ctx.scheduler);
		self.focus_timer.cancel(ctx.scheduler);
		self.evaluate(ctx, "");
		self.update_link(ctx.surface);
		ctx.registry.clear(self.id);
		debug!("{}: closed", self.id);
	}

	/// Debounce a filter evaluation after a key-up in the filter field.
	pub fn request_filter(&mut self, scheduler: &mut Scheduler) {
		self.filter.request(scheduler, self.id);
	}

	/// Evaluate whatever the filter field holds now. Runs when the debounce
	/// timer fires.
	pub fn run_filter<S: Surface>(&mut self, ctx: &mut WidgetContext<'_, S>) {
		self.filter.fired();
		let query = ctx.surface.input_value(self.nodes.filter);
		self.evaluate(ctx, &query);
	}

	fn evaluate<S: Surface>(&mut self, ctx: &mut WidgetContext<'_, S>, query: &str) {
		{
			let options = self.selection.get_all();
			self.filter
				.evaluate(query, options.iter().map(|option| option.text.as_str()));
		}
		for (row, visible) in self.rows.iter().zip(self.filter.mask()) {
			row.set_visible(ctx.surface, *visible);
		}
		ctx.surface
			.set_visible(self.nodes.empty_row, !self.filter.any_match());
		self.schedule_height(ctx.scheduler);
	}

	fn schedule_height(&mut self, scheduler: &mut Scheduler) {
		self.height_timer.arm(
			scheduler,
			self.config.timings.height_delay(),
			Task::new(self.id, TaskKind::AdjustHeight),
		);
	}

	/// Size the results container to its visible content. Returns the
	/// applied height in pixels.
	pub fn adjust_height<S: Surface>(&mut self, surface: &mut S) -> u32 {
		self.height_timer.fired();
		let content = surface.content_height(self.nodes.table);
		let height = self.config.timings.clamp_height(content);
		surface.set_style(
			self.nodes.results,
			StyleProperty::Height,
			Some(&format!("{height}px")),
		);
		height
	}

	/// Focus the filter field if the widget is still open. Returns the
	/// focused node so the page can deliver the focus event.
	pub fn focus_filter<S: Surface>(&mut self, surface: &mut S) -> Option<NodeId> {
		self.focus_timer.fired();
		if !self.is_open() {
			return None;
		}
		surface.focus(self.nodes.filter);
		Some(self.nodes.filter)
	}

	/// Apply or remove the configured focus class on the filter field.
	pub fn filter_focus_changed<S: Surface>(&self, surface: &mut S, focused: bool) {
		let Some(class) = &self.config.filter_focus_class else {
			return;
		};
		if focused {
			surface.add_class(self.nodes.filter, class);
		} else {
			surface.remove_class(self.nodes.filter, class);
		}
	}

	/// A click reached row `index`. Anything but the checkbox flips it.
	pub fn row_clicked<S: Surface>(&mut self, surface: &mut S, index: usize, target: NodeId) {
		let Some(row) = self.rows.get(index).copied() else {
			error!("{}: click on unknown row {index}", self.id);
			return;
		};
		if row.click(surface, target) {
			self.checkbox_changed(surface, index);
		}
	}

	/// The checkbox of row `index` changed; write it through and refresh the
	/// summary.
	pub fn checkbox_changed<S: Surface>(&mut self, surface: &mut S, index: usize) {
		let Some(row) = self.rows.get(index).copied() else {
			error!("{}: change on unknown row {index}", self.id);
			return;
		};
		match row.commit(surface, &mut self.selection) {
			Ok(selected) => {
				debug!("{}: option {index} selected={selected}", self.id);
				self.update_link(surface);
			}
			Err(err) => error!("{}: {err}", self.id),
		}
	}

	pub fn row_hovered<S: Surface>(&self, surface: &mut S, index: usize, entered: bool) {
		if let Some(row) = self.rows.get(index) {
			row.hover(surface, entered);
		}
	}

	/// Pull selection changes made by the host into the checkboxes and the
	/// summary.
	pub fn refresh<S: Surface>(&self, surface: &mut S) {
		self.sync_rows(surface);
		self.update_link(surface);
	}

	fn sync_rows<S: Surface>(&self, surface: &mut S) {
		for row in &self.rows {
			if let Err(err) = row.sync(surface, &self.selection) {
				error!("{}: {err}", self.id);
			}
		}
	}

	fn update_link<S: Surface>(&self, surface: &mut S) {
		surface.set_text(self.nodes.link, &self.summary());
	}

	/// Current summary text derived from the backing selection.
	#[must_use]
	pub fn summary(&self) -> String {
		summary_text(
			&self.selection.selected_texts(),
			self.config.show_selected_fit,
		)
	}

	#[must_use]
	pub fn id(&self) -> WidgetId {
		self.id
	}

	#[must_use]
	pub fn state(&self) -> WidgetState {
		self.state
	}

	#[must_use]
	pub fn is_open(&self) -> bool {
		self.state == WidgetState::Open
	}

	#[must_use]
	pub fn config(&self) -> &WidgetConfig {
		&self.config
	}

	#[must_use]
	pub fn selection(&self) -> &BackingSelection {
		&self.selection
	}

	/// Values of the selected options, in source order.
	#[must_use]
	pub fn values(&self) -> Vec<String> {
		self.selection.selected_values()
	}

	/// The last evaluated filter query.
	#[must_use]
	pub fn query(&self) -> &str {
		self.filter.query()
	}

	#[must_use]
	pub fn visibility_mask(&self) -> &[bool] {
		self.filter.mask()
	}

	#[must_use]
	pub fn any_match(&self) -> bool {
		self.filter.any_match()
	}

	#[must_use]
	pub fn filter_engine(&self) -> &FilterEngine {
		&self.filter
	}

	#[must_use]
	pub fn rows(&self) -> &[RowBinding] {
		&self.rows
	}

	#[must_use]
	pub fn bindings(&self) -> &[Binding] {
		&self.bindings
	}

	#[must_use]
	pub fn source(&self) -> NodeId {
		self.nodes.source
	}

	#[must_use]
	pub fn container(&self) -> NodeId {
		self.nodes.container
	}

	#[must_use]
	pub fn link(&self) -> NodeId {
		self.nodes.link
	}

	#[must_use]
	pub fn selector(&self) -> NodeId {
		self.nodes.selector
	}

	#[must_use]
	pub fn filter_input(&self) -> NodeId {
		self.nodes.filter
	}

	#[must_use]
	pub fn results_container(&self) -> NodeId {
		self.nodes.results
	}

	#[must_use]
	pub fn results_table(&self) -> NodeId {
		self.nodes.table
	}

	#[must_use]
	pub fn empty_row(&self) -> NodeId {
		self.nodes.empty_row
	}
}
