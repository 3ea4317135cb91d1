//! The visual surface a widget renders into.
//!
//! The core never draws anything itself. It issues DOM-shaped commands to a
//! [`Surface`] (create element, set text, toggle visibility, register
//! listeners) and the host routes the resulting events back through the
//! [`Page`](crate::Page). [`MemorySurface`] is the in-memory implementation
//! used by the terminal front-end and the tests.

mod memory;

pub use memory::MemorySurface;

use crate::backing::SourceControl;

/// Opaque identity of a node on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
	#[must_use]
	pub const fn new(raw: usize) -> Self {
		Self(raw)
	}

	#[must_use]
	pub const fn raw(self) -> usize {
		self.0
	}
}

/// Element kinds the widget creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
	/// Document root.
	Body,
	/// A native select list owned by the host.
	Select,
	/// Outer container of a widget, tagged for outside-click detection.
	Container,
	/// Holds the optional label prefix and the summary link.
	LinkContainer,
	/// Bold label prefix.
	Label,
	/// Clickable summary of the current selection.
	Link,
	/// Expandable panel with the filter field and the rows.
	SelectorContainer,
	FilterInput,
	/// Scrollable box whose height tracks the visible rows.
	ResultsContainer,
	ResultsTable,
	Row,
	TextCell,
	CheckCell,
	Checkbox,
}

/// Presentation properties the widget sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
	Width,
	Height,
	Background,
}

/// Events a node can be asked to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	Click,
	Change,
	KeyUp,
	Focus,
	Blur,
	PointerEnter,
	PointerLeave,
}

/// Commands the widget issues to the host's visual layer.
pub trait Surface {
	/// Look up a host-owned source control and its node by id.
	fn source_control(&self, id: &str) -> Option<(NodeId, SourceControl)>;

	fn create_element(&mut self, kind: ElementKind) -> NodeId;

	fn append_child(&mut self, parent: NodeId, child: NodeId);

	/// Insert `node` as the next sibling of `anchor`.
	fn insert_after(&mut self, anchor: NodeId, node: NodeId);

	fn parent(&self, node: NodeId) -> Option<NodeId>;

	fn set_text(&mut self, node: NodeId, text: &str);

	fn set_visible(&mut self, node: NodeId, visible: bool);

	fn add_class(&mut self, node: NodeId, class: &str);

	fn remove_class(&mut self, node: NodeId, class: &str);

	/// Set a style property, or clear it with `None`.
	fn set_style(&mut self, node: NodeId, property: StyleProperty, value: Option<&str>);

	fn set_checked(&mut self, node: NodeId, checked: bool);

	fn is_checked(&self, node: NodeId) -> bool;

	fn input_value(&self, node: NodeId) -> String;

	fn set_input_value(&mut self, node: NodeId, value: &str);

	fn focus(&mut self, node: NodeId);

	/// Drop focus from `node`. Returns whether it held focus.
	fn blur(&mut self, node: NodeId) -> bool;

	/// Rendered height of the node's content in pixels.
	fn content_height(&self, node: NodeId) -> u32;

	/// Ask the host to deliver `event` for `node`.
	fn listen(&mut self, node: NodeId, event: EventKind);

	/// Ask the host to deliver `event` for the whole document.
	fn listen_document(&mut self, event: EventKind);

	/// `node` followed by each of its ancestors up to the root.
	fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_
	where
		Self: Sized,
	{
		std::iter::successors(Some(node), move |current| self.parent(*current))
	}
}
