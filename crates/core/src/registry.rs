//! Process-wide coordination of the single open widget.
//!
//! The registry is an explicit object owned by the [`Page`](crate::Page)
//! rather than module-level state: it is attached once, can be reset, and
//! answers document-level clicks by deciding whether the open widget must
//! close.

use std::collections::HashMap;

use log::debug;

use crate::surface::{EventKind, NodeId, Surface};
use crate::widget::WidgetId;

/// Tracks the open widget and which nodes are widget containers.
#[derive(Debug, Default)]
pub struct OpenInstanceRegistry {
	open: Option<WidgetId>,
	containers: HashMap<NodeId, WidgetId>,
	attached: bool,
}

impl OpenInstanceRegistry {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Install the single document-level click listener. Only the first call
	/// touches the surface.
	pub fn attach<S: Surface>(&mut self, surface: &mut S) -> bool {
		if self.attached {
			return false;
		}
		surface.listen_document(EventKind::Click);
		self.attached = true;
		true
	}

	#[must_use]
	pub fn is_attached(&self) -> bool {
		self.attached
	}

	/// Record `widget` as the open instance. Closing a previous one is the
	/// caller's responsibility.
	pub fn notify_opened(&mut self, widget: WidgetId) {
		if let Some(previous) = self.open.replace(widget)
			&& previous != widget
		{
			debug!("registry: {widget:?} replaced {previous:?} as the open widget");
		}
	}

	/// Clear the open reference if it points at `widget`.
	pub fn clear(&mut self, widget: WidgetId) -> bool {
		if self.open == Some(widget) {
			self.open = None;
			true
		} else {
			false
		}
	}

	/// The widget currently open, if any.
	#[must_use]
	pub fn current(&self) -> Option<WidgetId> {
		self.open
	}

	/// Mark `node` as the container of `widget`.
	pub fn tag_container(&mut self, node: NodeId, widget: WidgetId) {
		self.containers.insert(node, widget);
	}

	/// The widget whose container is `node`.
	#[must_use]
	pub fn container_owner(&self, node: NodeId) -> Option<WidgetId> {
		self.containers.get(&node).copied()
	}

	/// Decide what a document-level click on `target` means.
	///
	/// Returns the open widget when the click landed outside every widget
	/// container and it must therefore close.
	#[must_use]
	pub fn on_global_click<S: Surface>(&self, target: NodeId, surface: &S) -> Option<WidgetId> {
		let open = self.open?;
		let inside = surface
			.ancestors(target)
			.any(|node| self.containers.contains_key(&node));
		if inside {
			return None;
		}
		debug!("registry: outside click on {target:?} closes {open:?}");
		Some(open)
	}

	/// Forget the open widget and every container tag. The document listener
	/// stays attached.
	pub fn reset(&mut self) {
		self.open = None;
		self.containers.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::surface::{ElementKind, MemorySurface};

	fn layout() -> (MemorySurface, NodeId, NodeId, NodeId) {
		let mut surface = MemorySurface::new();
		let body = surface.body();
		let container = surface.create_element(ElementKind::Container);
		let link = surface.create_element(ElementKind::Link);
		let elsewhere = surface.create_element(ElementKind::Label);
		surface.append_child(body, container);
		surface.append_child(container, link);
		surface.append_child(body, elsewhere);
		(surface, container, link, elsewhere)
	}

	#[test]
	fn attaches_document_listener_once() {
		let (mut surface, ..) = layout();
		let mut registry = OpenInstanceRegistry::new();
		assert!(registry.attach(&mut surface));
		assert!(!registry.attach(&mut surface));
		assert_eq!(surface.document_listeners(), &[EventKind::Click]);
	}

	#[test]
	fn click_without_open_widget_is_ignored() {
		let (surface, _, _, elsewhere) = layout();
		let registry = OpenInstanceRegistry::new();
		assert_eq!(registry.on_global_click(elsewhere, &surface), None);
	}

	#[test]
	fn clicks_inside_a_container_keep_the_widget_open() {
		let (surface, container, link, elsewhere) = layout();
		let widget = WidgetId::new(0);
		let mut registry = OpenInstanceRegistry::new();
		registry.tag_container(container, widget);
		registry.notify_opened(widget);

		assert_eq!(registry.on_global_click(link, &surface), None);
		assert_eq!(registry.on_global_click(container, &surface), None);
		assert_eq!(registry.on_global_click(elsewhere, &surface), Some(widget));
		assert_eq!(registry.on_global_click(surface.body(), &surface), Some(widget));
	}

	#[test]
	fn clicks_in_another_widgets_container_count_as_inside() {
		let (mut surface, container, _, elsewhere) = layout();
		let other = surface.create_element(ElementKind::Container);
		surface.append_child(surface.body(), other);
		let mut registry = OpenInstanceRegistry::new();
		registry.tag_container(container, WidgetId::new(0));
		registry.tag_container(other, WidgetId::new(1));
		registry.notify_opened(WidgetId::new(0));

		assert_eq!(registry.on_global_click(other, &surface), None);
		assert_eq!(registry.on_global_click(elsewhere, &surface), Some(WidgetId::new(0)));
	}

	#[test]
	fn clear_only_forgets_the_matching_widget() {
		let mut registry = OpenInstanceRegistry::new();
		registry.notify_opened(WidgetId::new(1));
		assert!(!registry.clear(WidgetId::new(2)));
		assert_eq!(registry.current(), Some(WidgetId::new(1)));
		assert!(registry.clear(WidgetId::new(1)));
		assert_eq!(registry.current(), None);
	}

	#[test]
	fn reset_drops_state_but_stays_attached() {
		let (mut surface, container, ..) = layout();
		let mut registry = OpenInstanceRegistry::new();
		registry.attach(&mut surface);
		registry.tag_container(container, WidgetId::new(0));
		registry.notify_opened(WidgetId::new(0));

		registry.reset();
		assert_eq!(registry.current(), None);
		assert_eq!(registry.container_owner(container), None);
		assert!(registry.is_attached());
	}
}
