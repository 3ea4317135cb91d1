use std::collections::HashMap;

use super::{ElementKind, EventKind, NodeId, StyleProperty, Surface};
use crate::backing::{SelectOption, SourceControl};

/// Height in pixels of a single line (row, input, link) in the memory layout.
pub const DEFAULT_LINE_HEIGHT: u32 = 20;

#[derive(Debug, Clone)]
struct Node {
	kind: ElementKind,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
	text: String,
	visible: bool,
	classes: Vec<String>,
	styles: HashMap<StyleProperty, String>,
	checked: bool,
	value: String,
	listeners: Vec<EventKind>,
}

impl Node {
	fn new(kind: ElementKind) -> Self {
		Self {
			kind,
			parent: None,
			children: Vec::new(),
			text: String::new(),
			visible: true,
			classes: Vec::new(),
			styles: HashMap::new(),
			checked: false,
			value: String::new(),
			listeners: Vec::new(),
		}
	}
}

/// In-memory node tree implementing [`Surface`].
///
/// Layout is deliberately simple: every visible row, input and link is one
/// line of [`DEFAULT_LINE_HEIGHT`] pixels and containers are as tall as their
/// visible children.
#[derive(Debug, Clone)]
pub struct MemorySurface {
	nodes: Vec<Node>,
	body: NodeId,
	controls: HashMap<String, (NodeId, SourceControl)>,
	focused: Option<NodeId>,
	document_listeners: Vec<EventKind>,
	line_height: u32,
}

impl Default for MemorySurface {
	fn default() -> Self {
		Self::new()
	}
}

impl MemorySurface {
	/// Create an empty document containing only the body node.
	#[must_use]
	pub fn new() -> Self {
		Self {
			nodes: vec![Node::new(ElementKind::Body)],
			body: NodeId::new(0),
			controls: HashMap::new(),
			focused: None,
			document_listeners: Vec::new(),
			line_height: DEFAULT_LINE_HEIGHT,
		}
	}

	/// Override the height of a single line.
	#[must_use]
	pub fn with_line_height(mut self, line_height: u32) -> Self {
		self.line_height = line_height;
		self
	}

	#[must_use]
	pub fn line_height(&self) -> u32 {
		self.line_height
	}

	#[must_use]
	pub fn body(&self) -> NodeId {
		self.body
	}

	/// Append a native select list to the body and return its shared handle.
	pub fn add_select(&mut self, id: impl Into<String>, options: Vec<SelectOption>) -> SourceControl {
		let control = SourceControl::new(options);
		let node = self.create_element(ElementKind::Select);
		self.append_child(self.body, node);
		self.controls.insert(id.into(), (node, control.clone()));
		control
	}

	#[must_use]
	pub fn kind(&self, node: NodeId) -> Option<ElementKind> {
		self.node(node).map(|node| node.kind)
	}

	#[must_use]
	pub fn children(&self, node: NodeId) -> &[NodeId] {
		self.node(node)
			.map(|node| node.children.as_slice())
			.unwrap_or_default()
	}

	#[must_use]
	pub fn text(&self, node: NodeId) -> &str {
		self.node(node).map(|node| node.text.as_str()).unwrap_or("")
	}

	/// The node's own visibility flag.
	#[must_use]
	pub fn is_visible(&self, node: NodeId) -> bool {
		self.node(node).is_some_and(|node| node.visible)
	}

	/// Visible itself and through every ancestor.
	#[must_use]
	pub fn is_displayed(&self, node: NodeId) -> bool {
		self.ancestors(node).all(|current| self.is_visible(current))
	}

	#[must_use]
	pub fn has_class(&self, node: NodeId, class: &str) -> bool {
		self.node(node)
			.is_some_and(|node| node.classes.iter().any(|existing| existing == class))
	}

	#[must_use]
	pub fn style(&self, node: NodeId, property: StyleProperty) -> Option<&str> {
		self.node(node)
			.and_then(|node| node.styles.get(&property))
			.map(String::as_str)
	}

	/// Parse a pixel style such as `120px` into its numeric value.
	#[must_use]
	pub fn style_px(&self, node: NodeId, property: StyleProperty) -> Option<u32> {
		self.style(node, property)?
			.strip_suffix("px")?
			.trim()
			.parse()
			.ok()
	}

	#[must_use]
	pub fn focused(&self) -> Option<NodeId> {
		self.focused
	}

	/// Drop focus, returning the node that held it.
	pub fn take_focus(&mut self) -> Option<NodeId> {
		self.focused.take()
	}

	#[must_use]
	pub fn listeners(&self, node: NodeId) -> &[EventKind] {
		self.node(node)
			.map(|node| node.listeners.as_slice())
			.unwrap_or_default()
	}

	#[must_use]
	pub fn document_listeners(&self) -> &[EventKind] {
		&self.document_listeners
	}

	/// Depth-first search for the first descendant of `root` with `kind`.
	#[must_use]
	pub fn find_descendant(&self, root: NodeId, kind: ElementKind) -> Option<NodeId> {
		self.children(root).iter().find_map(|child| {
			if self.kind(*child) == Some(kind) {
				Some(*child)
			} else {
				self.find_descendant(*child, kind)
			}
		})
	}

	fn node(&self, node: NodeId) -> Option<&Node> {
		self.nodes.get(node.raw())
	}

	fn node_mut(&mut self, node: NodeId) -> Option<&mut Node> {
		self.nodes.get_mut(node.raw())
	}

	fn detach(&mut self, node: NodeId) {
		let Some(parent) = self.node(node).and_then(|node| node.parent) else {
			return;
		};
		if let Some(parent) = self.node_mut(parent) {
			parent.children.retain(|child| *child != node);
		}
		if let Some(node) = self.node_mut(node) {
			node.parent = None;
		}
	}

	fn layout_height(&self, node: NodeId) -> u32 {
		let Some(entry) = self.node(node) else {
			return 0;
		};
		if !entry.visible {
			return 0;
		}
		match entry.kind {
			ElementKind::Row | ElementKind::FilterInput | ElementKind::LinkContainer => {
				self.line_height
			}
			ElementKind::ResultsContainer => self
				.style_px(node, StyleProperty::Height)
				.unwrap_or_else(|| self.content_height(node)),
			_ => self.content_height(node),
		}
	}
}

impl Surface for MemorySurface {
	fn source_control(&self, id: &str) -> Option<(NodeId, SourceControl)> {
		self.controls
			.get(id)
			.map(|(node, control)| (*node, control.clone()))
	}

	fn create_element(&mut self, kind: ElementKind) -> NodeId {
		let id = NodeId::new(self.nodes.len());
		self.nodes.push(Node::new(kind));
		id
	}

	fn append_child(&mut self, parent: NodeId, child: NodeId) {
		if self.node(parent).is_none() || self.node(child).is_none() {
			return;
		}
		self.detach(child);
		if let Some(entry) = self.node_mut(parent) {
			entry.children.push(child);
		}
		if let Some(entry) = self.node_mut(child) {
			entry.parent = Some(parent);
		}
	}

	fn insert_after(&mut self, anchor: NodeId, node: NodeId) {
		let Some(parent) = self.parent(anchor) else {
			self.append_child(self.body, node);
			return;
		};
		self.detach(node);
		if let Some(entry) = self.node_mut(parent) {
			let position = entry
				.children
				.iter()
				.position(|child| *child == anchor)
				.map_or(entry.children.len(), |index| index + 1);
			entry.children.insert(position, node);
		}
		if let Some(entry) = self.node_mut(node) {
			entry.parent = Some(parent);
		}
	}

	fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.node(node).and_then(|node| node.parent)
	}

	fn set_text(&mut self, node: NodeId, text: &str) {
		if let Some(node) = self.node_mut(node) {
			node.text = text.to_string();
		}
	}

	fn set_visible(&mut self, node: NodeId, visible: bool) {
		if let Some(node) = self.node_mut(node) {
			node.visible = visible;
		}
	}

	fn add_class(&mut self, node: NodeId, class: &str) {
		if let Some(node) = self.node_mut(node)
			&& !node.classes.iter().any(|existing| existing == class)
		{
			node.classes.push(class.to_string());
		}
	}

	fn remove_class(&mut self, node: NodeId, class: &str) {
		if let Some(node) = self.node_mut(node) {
			node.classes.retain(|existing| existing != class);
		}
	}

	fn set_style(&mut self, node: NodeId, property: StyleProperty, value: Option<&str>) {
		let Some(node) = self.node_mut(node) else {
			return;
		};
		match value {
			Some(value) => {
				node.styles.insert(property, value.to_string());
			}
			None => {
				node.styles.remove(&property);
			}
		}
	}

	fn set_checked(&mut self, node: NodeId, checked: bool) {
		if let Some(node) = self.node_mut(node) {
			node.checked = checked;
		}
	}

	fn is_checked(&self, node: NodeId) -> bool {
		self.node(node).is_some_and(|node| node.checked)
	}

	fn input_value(&self, node: NodeId) -> String {
		self.node(node)
			.map(|node| node.value.clone())
			.unwrap_or_default()
	}

	fn set_input_value(&mut self, node: NodeId, value: &str) {
		if let Some(node) = self.node_mut(node) {
			node.value = value.to_string();
		}
	}

	fn focus(&mut self, node: NodeId) {
		if self.node(node).is_some() {
			self.focused = Some(node);
		}
	}

	fn blur(&mut self, node: NodeId) -> bool {
		if self.focused != Some(node) {
			return false;
		}
		self.focused = None;
		true
	}

	fn content_height(&self, node: NodeId) -> u32 {
		self.children(node)
			.iter()
			.map(|child| self.layout_height(*child))
			.sum()
	}

	fn listen(&mut self, node: NodeId, event: EventKind) {
		if let Some(node) = self.node_mut(node)
			&& !node.listeners.contains(&event)
		{
			node.listeners.push(event);
		}
	}

	fn listen_document(&mut self, event: EventKind) {
		self.document_listeners.push(event);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn insert_after_places_node_next_to_anchor() {
		let mut surface = MemorySurface::new();
		surface.add_select("first", Vec::new());
		surface.add_select("second", Vec::new());
		let (anchor, _) = surface.source_control("first").expect("registered");

		let container = surface.create_element(ElementKind::Container);
		surface.insert_after(anchor, container);

		let body = surface.body();
		assert_eq!(surface.children(body)[1], container);
		assert_eq!(surface.parent(container), Some(body));
	}

	#[test]
	fn content_height_counts_visible_rows_only() {
		let mut surface = MemorySurface::new();
		let table = surface.create_element(ElementKind::ResultsTable);
		let rows: Vec<_> = (0..3)
			.map(|_| {
				let row = surface.create_element(ElementKind::Row);
				surface.append_child(table, row);
				row
			})
			.collect();
		assert_eq!(surface.content_height(table), 3 * DEFAULT_LINE_HEIGHT);

		surface.set_visible(rows[1], false);
		assert_eq!(surface.content_height(table), 2 * DEFAULT_LINE_HEIGHT);
	}

	#[test]
	fn display_follows_ancestor_visibility() {
		let mut surface = MemorySurface::new();
		let outer = surface.create_element(ElementKind::SelectorContainer);
		let inner = surface.create_element(ElementKind::FilterInput);
		surface.append_child(surface.body(), outer);
		surface.append_child(outer, inner);

		assert!(surface.is_displayed(inner));
		surface.set_visible(outer, false);
		assert!(surface.is_visible(inner));
		assert!(!surface.is_displayed(inner));
	}

	#[test]
	fn classes_are_added_once_and_removed_exactly() {
		let mut surface = MemorySurface::new();
		let input = surface.create_element(ElementKind::FilterInput);
		surface.add_class(input, "focused");
		surface.add_class(input, "focused");
		surface.add_class(input, "search");
		surface.remove_class(input, "focused");

		assert!(!surface.has_class(input, "focused"));
		assert!(surface.has_class(input, "search"));
	}
}
