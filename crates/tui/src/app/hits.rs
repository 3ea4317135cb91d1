use multisel_core::{NodeId, WidgetId};
use ratatui::layout::Rect;

/// A screen region that maps back to a surface node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Hit {
	pub area: Rect,
	pub node: NodeId,
	/// Owning widget and option index when the region belongs to a row.
	pub row: Option<(WidgetId, usize)>,
}

/// Regions recorded during the last draw, most specific last.
#[derive(Debug, Default)]
pub(crate) struct HitMap {
	hits: Vec<Hit>,
}

impl HitMap {
	pub(crate) fn clear(&mut self) {
		self.hits.clear();
	}

	pub(crate) fn push(&mut self, area: Rect, node: NodeId, row: Option<(WidgetId, usize)>) {
		if area.width == 0 || area.height == 0 {
			return;
		}
		self.hits.push(Hit { area, node, row });
	}

	/// The innermost region containing the cell.
	pub(crate) fn hit(&self, column: u16, row: u16) -> Option<Hit> {
		self.hits
			.iter()
			.rev()
			.find(|hit| point_in_rect(column, row, hit.area))
			.copied()
	}

	/// The region recorded for `node`, if it was drawn.
	pub(crate) fn area_of(&self, node: NodeId) -> Option<Rect> {
		self.hits
			.iter()
			.rev()
			.find(|hit| hit.node == node)
			.map(|hit| hit.area)
	}
}

/// Check whether the given point lies within `area`.
pub(crate) fn point_in_rect(column: u16, row: u16, area: Rect) -> bool {
	if area.width == 0 || area.height == 0 {
		return false;
	}
	let inside_x = column >= area.x && column < area.x.saturating_add(area.width);
	let inside_y = row >= area.y && row < area.y.saturating_add(area.height);
	inside_x && inside_y
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn innermost_region_wins() {
		let mut hits = HitMap::default();
		let outer = NodeId::new(1);
		let inner = NodeId::new(2);
		hits.push(Rect::new(0, 0, 10, 5), outer, None);
		hits.push(Rect::new(2, 1, 3, 1), inner, None);

		assert_eq!(hits.hit(3, 1).map(|hit| hit.node), Some(inner));
		assert_eq!(hits.hit(8, 4).map(|hit| hit.node), Some(outer));
		assert_eq!(hits.hit(10, 0), None);
	}

	#[test]
	fn empty_regions_are_ignored() {
		let mut hits = HitMap::default();
		hits.push(Rect::new(0, 0, 0, 3), NodeId::new(1), None);
		assert_eq!(hits.hit(0, 0), None);
		assert!(!point_in_rect(0, 0, Rect::new(0, 0, 0, 0)));
	}
}
