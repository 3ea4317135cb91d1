use multisel_core::{
	ElementKind, MemorySurface, NodeId, Page, StyleProperty, Surface, WidgetInstance,
};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::border;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

use crate::app::hits::HitMap;
use crate::app::state::{Entry, Hover};
use crate::config::UiLabels;
use crate::style::Theme;

/// Surface pixels covered by one terminal column.
pub(crate) const PIXELS_PER_COLUMN: u32 = 8;
const MIN_COLUMNS: u16 = 12;
const MARKER_WIDTH: u16 = 3;

/// Read-only view used to draw one widget.
pub(super) struct EntryView<'a> {
	pub page: &'a Page<MemorySurface>,
	pub theme: &'a Theme,
	pub labels: &'a UiLabels,
	pub hover: Option<Hover>,
}

impl EntryView<'_> {
	/// Rows needed: the summary line, plus the bordered selector when shown.
	pub(super) fn height(&self, entry: &Entry) -> u16 {
		let Some(widget) = self.page.widget(entry.widget) else {
			return 1;
		};
		let surface = self.page.surface();
		if !surface.is_displayed(widget.selector()) {
			return 1;
		}
		let results = surface
			.style_px(widget.results_container(), StyleProperty::Height)
			.unwrap_or(widget.config().timings.max_height);
		lines_for_height(results, surface.line_height()).saturating_add(4)
	}

	/// Columns matching the widget's configured pixel width.
	pub(super) fn width(&self, entry: &Entry) -> u16 {
		match self.page.widget(entry.widget) {
			Some(widget) => widget
				.config()
				.width_px()
				.map_or(u16::MAX, columns_for_width),
			None => {
				let text = format!("{}: {}", entry.source_id, self.labels.unavailable);
				u16::try_from(text.width()).unwrap_or(u16::MAX)
			}
		}
	}

	pub(super) fn render(
		&self,
		frame: &mut Frame,
		entry: &Entry,
		area: Rect,
		hits: &mut HitMap,
		scroll: &mut usize,
	) {
		let Some(widget) = self.page.widget(entry.widget) else {
			let text = format!("{}: {}", entry.source_id, self.labels.unavailable);
			frame.render_widget(Paragraph::new(Span::styled(text, self.theme.empty)), area);
			return;
		};

		hits.push(area, widget.container(), None);
		self.render_link(frame, widget, Rect { height: 1, ..area }, hits);

		if area.height <= 1 || !self.page.surface().is_displayed(widget.selector()) {
			return;
		}
		let selector = Rect {
			y: area.y + 1,
			height: area.height - 1,
			..area
		};
		self.render_selector(frame, widget, selector, hits, scroll);
	}

	fn render_link(&self, frame: &mut Frame, widget: &WidgetInstance, area: Rect, hits: &mut HitMap) {
		let surface = self.page.surface();
		let label = surface
			.parent(widget.link())
			.and_then(|holder| surface.find_descendant(holder, ElementKind::Label))
			.map_or("", |label| surface.text(label));
		let (label, label_width) = label.unicode_truncate(usize::from(area.width));
		let remaining = usize::from(area.width).saturating_sub(label_width);
		let (summary, summary_width) = surface.text(widget.link()).unicode_truncate(remaining);

		let link_style = if widget.is_open() {
			self.theme.highlight
		} else {
			self.theme.link
		};
		let line = Line::from(vec![
			Span::styled(label, Style::new().add_modifier(Modifier::BOLD)),
			Span::styled(summary, link_style),
		]);
		frame.render_widget(Paragraph::new(line), area);

		let offset = u16::try_from(label_width).unwrap_or(area.width);
		let link_area = Rect {
			x: area.x.saturating_add(offset),
			width: u16::try_from(summary_width).unwrap_or(0),
			..area
		};
		hits.push(link_area, widget.link(), None);
	}

	fn render_selector(
		&self,
		frame: &mut Frame,
		widget: &WidgetInstance,
		area: Rect,
		hits: &mut HitMap,
		scroll: &mut usize,
	) {
		let surface = self.page.surface();
		let focused = surface.focused() == Some(widget.filter_input());
		let block = Block::default()
			.borders(Borders::ALL)
			.border_set(border::ROUNDED)
			.border_style(self.theme.border_style(focused));
		let inner = block.inner(area);
		frame.render_widget(block, area);
		hits.push(area, widget.selector(), None);
		if inner.height == 0 {
			return;
		}

		let filter = Rect { height: 1, ..inner };
		let prompt = self.labels.filter_prompt.as_str();
		let value = surface.input_value(widget.filter_input());
		let prompt_style = if focused {
			self.theme.focused_prompt()
		} else {
			self.theme.prompt
		};
		let cursor_column = prompt.width() + value.width();
		frame.render_widget(
			Paragraph::new(Line::from(vec![
				Span::styled(prompt, prompt_style),
				Span::raw(value),
			])),
			filter,
		);
		hits.push(filter, widget.filter_input(), None);
		if focused
			&& let Ok(column) = u16::try_from(cursor_column)
			&& column < filter.width
		{
			frame.set_cursor_position(Position::new(filter.x + column, filter.y));
		}

		let results = Rect {
			y: inner.y + 1,
			height: inner.height - 1,
			..inner
		};
		hits.push(results, widget.results_container(), None);

		let rows: Vec<NodeId> = surface
			.children(widget.results_table())
			.iter()
			.copied()
			.filter(|&row| surface.is_visible(row))
			.collect();
		let capacity = usize::from(results.height);
		let offset = if widget.is_open() {
			let hovered = self
				.hover
				.filter(|hover| hover.widget == widget.id())
				.and_then(|hover| widget.rows().get(hover.index))
				.and_then(|binding| rows.iter().position(|&row| row == binding.row()));
			*scroll = keep_in_view(*scroll, hovered, rows.len(), capacity);
			*scroll
		} else {
			0
		};

		for (y, &row) in (results.y..results.bottom()).zip(rows.iter().skip(offset)) {
			let line = Rect {
				y,
				height: 1,
				..results
			};
			self.render_row(frame, widget, row, line, hits);
		}
	}

	fn render_row(
		&self,
		frame: &mut Frame,
		widget: &WidgetInstance,
		row: NodeId,
		area: Rect,
		hits: &mut HitMap,
	) {
		let surface = self.page.surface();
		if row == widget.empty_row() {
			let text = surface
				.find_descendant(row, ElementKind::TextCell)
				.map_or("", |cell| surface.text(cell));
			let (text, _) = text.unicode_truncate(usize::from(area.width));
			frame.render_widget(Paragraph::new(Span::styled(text, self.theme.empty)), area);
			return;
		}
		let Some(binding) = widget.rows().iter().find(|binding| binding.row() == row) else {
			return;
		};

		let hovered = surface.style(row, StyleProperty::Background).is_some();
		let base = if hovered {
			self.theme.row_highlight
		} else {
			Style::new()
		};
		let checked = surface.is_checked(binding.checkbox());
		let (marker, marker_style) = if checked {
			("[x]", self.theme.checked)
		} else {
			("[ ]", Style::new())
		};
		let text_width = area.width.saturating_sub(MARKER_WIDTH + 1);
		let (text, _) = surface
			.text(binding.text_cell())
			.unicode_truncate(usize::from(text_width));

		let line = Line::from(vec![
			Span::styled(marker, marker_style),
			Span::raw(" "),
			Span::raw(text),
		]);
		frame.render_widget(Paragraph::new(line).style(base), area);

		let owner = Some((widget.id(), binding.index()));
		hits.push(area, row, owner);
		hits.push(
			Rect {
				width: MARKER_WIDTH.min(area.width),
				..area
			},
			binding.checkbox(),
			owner,
		);
		hits.push(
			Rect {
				x: area.x.saturating_add(MARKER_WIDTH + 1),
				width: text_width,
				..area
			},
			binding.text_cell(),
			owner,
		);
	}
}

/// Terminal columns for a pixel width, never narrower than a usable minimum.
pub(crate) fn columns_for_width(px: u32) -> u16 {
	u16::try_from(px / PIXELS_PER_COLUMN)
		.unwrap_or(u16::MAX)
		.max(MIN_COLUMNS)
}

/// Terminal rows for a pixel height, at least one.
pub(crate) fn lines_for_height(px: u32, line_height: u32) -> u16 {
	let lines = px.checked_div(line_height).unwrap_or(0).max(1);
	u16::try_from(lines).unwrap_or(u16::MAX)
}

/// Scroll offset that keeps the hovered row inside a viewport of `capacity`.
pub(crate) fn keep_in_view(
	scroll: usize,
	hovered: Option<usize>,
	len: usize,
	capacity: usize,
) -> usize {
	let mut scroll = scroll.min(len.saturating_sub(capacity));
	if let Some(position) = hovered {
		if position < scroll {
			scroll = position;
		} else if capacity > 0 && position >= scroll + capacity {
			scroll = position + 1 - capacity;
		}
	}
	scroll
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pixel_sizes_map_to_cells() {
		assert_eq!(columns_for_width(200), 25);
		assert_eq!(columns_for_width(40), MIN_COLUMNS);
		assert_eq!(lines_for_height(42, 20), 2);
		assert_eq!(lines_for_height(22, 20), 1);
		assert_eq!(lines_for_height(200, 20), 10);
		assert_eq!(lines_for_height(5, 0), 1);
	}

	#[test]
	fn scroll_follows_the_hovered_row() {
		assert_eq!(keep_in_view(0, Some(12), 30, 10), 3);
		assert_eq!(keep_in_view(5, Some(2), 30, 10), 2);
		assert_eq!(keep_in_view(5, Some(7), 30, 10), 5);
		assert_eq!(keep_in_view(25, None, 30, 10), 20);
		assert_eq!(keep_in_view(4, None, 3, 10), 0);
	}
}
