//! The host document: owns the surface, scheduler, registry and widgets and
//! routes surface events to them.
//!
//! Clicks bubble from the target through its ancestors, running every bound
//! handler on the way, and finish at the single document-level listener that
//! asks the registry whether the open widget must close. Deferred work runs
//! when the page is advanced in time.

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, warn};

use crate::config::WidgetConfig;
use crate::registry::OpenInstanceRegistry;
use crate::schedule::{Scheduler, Task, TaskKind};
use crate::surface::{EventKind, NodeId, Surface};
use crate::widget::{Handler, WidgetContext, WidgetId, WidgetInstance};
use crate::WidgetError;

/// Either a mounted widget or the inert remains of a failed construction.
#[derive(Debug)]
enum Slot {
	Live(Box<WidgetInstance>),
	Inert { error: WidgetError },
}

/// A document hosting any number of widgets over one surface.
#[derive(Debug)]
pub struct Page<S: Surface> {
	surface: S,
	scheduler: Scheduler,
	registry: OpenInstanceRegistry,
	widgets: Vec<Slot>,
	handlers: HashMap<(NodeId, EventKind), (WidgetId, Handler)>,
}

impl<S: Surface> Page<S> {
	/// Wrap `surface` and attach the document-level click listener.
	pub fn new(mut surface: S) -> Self {
		let mut registry = OpenInstanceRegistry::new();
		registry.attach(&mut surface);
		Self {
			surface,
			scheduler: Scheduler::new(),
			registry,
			widgets: Vec::new(),
			handlers: HashMap::new(),
		}
	}

	/// Replace the source control `source_id` with a widget.
	///
	/// A missing control yields an inert widget: nothing is rendered, the
	/// returned id never opens, and no error reaches the caller.
	pub fn create(&mut self, source_id: &str, config: WidgetConfig) -> WidgetId {
		let id = WidgetId::new(self.widgets.len());
		let slot = match WidgetInstance::mount(
			id,
			source_id,
			config,
			&mut self.surface,
			&mut self.registry,
		) {
			Ok(widget) => {
				for binding in widget.bindings() {
					self.handlers
						.insert((binding.node, binding.event), (id, binding.handler));
				}
				Slot::Live(Box::new(widget))
			}
			Err(error) => {
				warn!("{id}: left inert: {error}");
				Slot::Inert { error }
			}
		};
		self.widgets.push(slot);
		id
	}

	/// The mounted widget for `id`, or `None` when it is inert or unknown.
	#[must_use]
	pub fn widget(&self, id: WidgetId) -> Option<&WidgetInstance> {
		match self.widgets.get(id.raw())? {
			Slot::Live(widget) => Some(widget.as_ref()),
			Slot::Inert { .. } => None,
		}
	}

	/// The construction error of an inert widget.
	#[must_use]
	pub fn inert_reason(&self, id: WidgetId) -> Option<&WidgetError> {
		match self.widgets.get(id.raw())? {
			Slot::Inert { error } => Some(error),
			Slot::Live(_) => None,
		}
	}

	#[must_use]
	pub fn is_inert(&self, id: WidgetId) -> bool {
		self.inert_reason(id).is_some()
	}

	/// Every mounted widget in creation order.
	pub fn widgets(&self) -> impl Iterator<Item = &WidgetInstance> {
		self.widgets.iter().filter_map(|slot| match slot {
			Slot::Live(widget) => Some(widget.as_ref()),
			Slot::Inert { .. } => None,
		})
	}

	/// The widget that is currently open.
	#[must_use]
	pub fn open_widget(&self) -> Option<&WidgetInstance> {
		self.registry.current().and_then(|id| self.widget(id))
	}

	#[must_use]
	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	#[must_use]
	pub fn scheduler(&self) -> &Scheduler {
		&self.scheduler
	}

	#[must_use]
	pub fn registry(&self) -> &OpenInstanceRegistry {
		&self.registry
	}

	/// Current virtual time.
	#[must_use]
	pub fn now(&self) -> Duration {
		self.scheduler.now()
	}

	/// Open `id`, closing whichever other widget is open first.
	pub fn open(&mut self, id: WidgetId) {
		if self.widget(id).is_none() {
			debug!("{id}: ignoring open on an inert widget");
			return;
		}
		if let Some(current) = self.registry.current()
			&& current != id
		{
			self.close(current);
		}
		self.with_widget(id, |widget, ctx| widget.open(ctx));
	}

	pub fn close(&mut self, id: WidgetId) {
		self.with_widget(id, |widget, ctx| widget.close(ctx));
	}

	/// Pull host-side selection changes into the widget's rows and summary.
	pub fn refresh(&mut self, id: WidgetId) {
		self.with_widget(id, |widget, ctx| widget.refresh(ctx.surface));
	}

	/// Deliver a click on `target`.
	///
	/// A click on a checkbox first toggles it and fires its change event,
	/// then the click bubbles through the ancestors and finally reaches the
	/// document listener.
	pub fn click(&mut self, target: NodeId) {
		if let Some(&(id, handler)) = self.handlers.get(&(target, EventKind::Change)) {
			let checked = self.surface.is_checked(target);
			self.surface.set_checked(target, !checked);
			self.run_handler(id, handler, target);
		}

		self.bubble(target, EventKind::Click);

		if let Some(id) = self.registry.on_global_click(target, &self.surface) {
			self.close(id);
		}
	}

	/// Deliver a key-up on `target`. The host updates the input value first.
	pub fn key_up(&mut self, target: NodeId) {
		self.bubble(target, EventKind::KeyUp);
	}

	pub fn focus(&mut self, target: NodeId) {
		self.dispatch(target, EventKind::Focus);
	}

	pub fn blur(&mut self, target: NodeId) {
		self.dispatch(target, EventKind::Blur);
	}

	pub fn pointer_enter(&mut self, target: NodeId) {
		self.dispatch(target, EventKind::PointerEnter);
	}

	pub fn pointer_leave(&mut self, target: NodeId) {
		self.dispatch(target, EventKind::PointerLeave);
	}

	/// Move virtual time forward by `delta`, running every task that falls
	/// due on the way.
	pub fn advance(&mut self, delta: Duration) {
		let deadline = self.scheduler.now() + delta;
		self.advance_to(deadline);
	}

	/// Run every task due at or before `deadline`, in due order.
	pub fn advance_to(&mut self, deadline: Duration) {
		while let Some(task) = self.scheduler.pop_due(deadline) {
			self.run_task(task);
		}
		self.scheduler.settle(deadline);
	}

	fn run_task(&mut self, task: Task) {
		match task.kind {
			TaskKind::Filter => {
				self.with_widget(task.widget, |widget, ctx| widget.run_filter(ctx));
			}
			TaskKind::AdjustHeight => {
				self.with_widget(task.widget, |widget, ctx| {
					widget.adjust_height(ctx.surface);
				});
			}
			TaskKind::FocusFilter => {
				let focused = self
					.with_widget(task.widget, |widget, ctx| widget.focus_filter(ctx.surface))
					.flatten();
				if let Some(node) = focused {
					self.focus(node);
				}
			}
		}
	}

	fn bubble(&mut self, target: NodeId, event: EventKind) {
		let path: Vec<NodeId> = self.surface.ancestors(target).collect();
		for node in path {
			if let Some(&(id, handler)) = self.handlers.get(&(node, event)) {
				self.run_handler(id, handler, target);
			}
		}
	}

	fn dispatch(&mut self, target: NodeId, event: EventKind) {
		if let Some(&(id, handler)) = self.handlers.get(&(target, event)) {
			self.run_handler(id, handler, target);
		}
	}

	fn run_handler(&mut self, id: WidgetId, handler: Handler, target: NodeId) {
		match handler {
			Handler::OpenLink => self.open(id),
			Handler::FilterKeyUp => {
				self.with_widget(id, |widget, ctx| widget.request_filter(ctx.scheduler));
			}
			Handler::FilterFocus | Handler::FilterBlur => {
				let focused = handler == Handler::FilterFocus;
				self.with_widget(id, |widget, ctx| {
					widget.filter_focus_changed(ctx.surface, focused);
				});
			}
			Handler::RowClick(index) => {
				self.with_widget(id, |widget, ctx| {
					widget.row_clicked(ctx.surface, index, target);
				});
			}
			Handler::RowEnter(index) | Handler::RowLeave(index) => {
				let entered = matches!(handler, Handler::RowEnter(_));
				self.with_widget(id, |widget, ctx| {
					widget.row_hovered(ctx.surface, index, entered);
				});
			}
			Handler::CheckboxChange(index) => {
				self.with_widget(id, |widget, ctx| widget.checkbox_changed(ctx.surface, index));
			}
		}
	}

	fn with_widget<R>(
		&mut self,
		id: WidgetId,
		f: impl FnOnce(&mut WidgetInstance, &mut WidgetContext<'_, S>) -> R,
	) -> Option<R> {
		let Self {
			surface,
			scheduler,
			registry,
			widgets,
			..
		} = self;
		let Some(Slot::Live(widget)) = widgets.get_mut(id.raw()) else {
			return None;
		};
		let mut ctx = WidgetContext {
			surface,
			scheduler,
			registry,
		};
		Some(f(widget, &mut ctx))
	}
}
