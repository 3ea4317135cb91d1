use anyhow::Result;
use log::debug;
use multisel_core::{Surface, WidgetId};
use ratatui::crossterm::event::{
	KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::state::App;
use crate::outcome::SelectionOutcome;

/// Part of a row a keyboard activation lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowPart {
	Text,
	Checkbox,
}

impl App {
	pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<Option<SelectionOutcome>> {
		if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
			return Ok(Some(self.outcome(false)));
		}

		let Some(open) = self.open_widget_id() else {
			match key.code {
				KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
					return Ok(Some(self.outcome(true)));
				}
				KeyCode::Tab | KeyCode::Down | KeyCode::Char(' ') => self.open_adjacent(0),
				KeyCode::BackTab | KeyCode::Up => self.open_adjacent(-1),
				_ => {}
			}
			self.sync_focus();
			return Ok(None);
		};

		match key.code {
			KeyCode::Esc => self.click_outside(),
			KeyCode::Tab => self.open_adjacent(1),
			KeyCode::BackTab => self.open_adjacent(-1),
			KeyCode::Up => self.move_hover(open, -1),
			KeyCode::Down => self.move_hover(open, 1),
			KeyCode::PageUp => self.move_hover(open, -10),
			KeyCode::PageDown => self.move_hover(open, 10),
			KeyCode::Enter => self.click_hovered(open, RowPart::Text),
			KeyCode::Char(' ') if self.hover.is_some_and(|hover| hover.widget == open) => {
				self.click_hovered(open, RowPart::Checkbox);
			}
			KeyCode::Backspace => self.edit_filter(open, |value| {
				value.pop();
			}),
			KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				self.edit_filter(open, String::clear);
			}
			KeyCode::Char(ch) => self.edit_filter(open, |value| value.push(ch)),
			_ => {}
		}
		self.sync_focus();
		Ok(None)
	}

	pub(crate) fn handle_mouse(&mut self, mouse: MouseEvent) {
		match mouse.kind {
			MouseEventKind::Down(MouseButton::Left) => {
				let target = match self.hits.hit(mouse.column, mouse.row) {
					Some(hit) => hit.node,
					None => self.page.surface().body(),
				};
				self.page.click(target);
			}
			MouseEventKind::Moved => {
				match self
					.hits
					.hit(mouse.column, mouse.row)
					.and_then(|hit| hit.row)
				{
					Some((widget, index)) => self.set_hover(widget, index),
					None => self.clear_hover(),
				}
			}
			MouseEventKind::ScrollDown => {
				if let Some(open) = self.open_widget_id() {
					self.move_hover(open, 1);
				}
			}
			MouseEventKind::ScrollUp => {
				if let Some(open) = self.open_widget_id() {
					self.move_hover(open, -1);
				}
			}
			_ => {}
		}
		self.sync_focus();
	}

	/// Open the widget `step` places away from the open one, or the one under
	/// the cursor when nothing is open, by clicking its summary link.
	fn open_adjacent(&mut self, step: isize) {
		let live: Vec<usize> = self
			.entries
			.iter()
			.enumerate()
			.filter(|(_, entry)| self.page.widget(entry.widget).is_some())
			.map(|(position, _)| position)
			.collect();
		if live.is_empty() {
			return;
		}

		let open = self.open_widget_id();
		let current = live
			.iter()
			.position(|&position| Some(self.entries[position].widget) == open)
			.or_else(|| live.iter().position(|&position| position >= self.cursor))
			.unwrap_or(0);
		let Some(len) = isize::try_from(live.len()).ok() else {
			return;
		};
		let Some(current) = isize::try_from(current).ok() else {
			return;
		};
		let next = (current + step).rem_euclid(len);
		let Some(position) = usize::try_from(next).ok().and_then(|next| live.get(next)) else {
			return;
		};
		self.cursor = *position;

		let widget = self.entries[self.cursor].widget;
		debug!("{widget}: opening from the keyboard");
		if let Some(link) = self.page.widget(widget).map(|widget| widget.link()) {
			self.page.click(link);
		}
	}

	fn click_outside(&mut self) {
		let body = self.page.surface().body();
		self.page.click(body);
	}

	fn move_hover(&mut self, open: WidgetId, delta: isize) {
		let visible = self.visible_rows(open);
		let Some(last) = visible.len().checked_sub(1) else {
			self.clear_hover();
			return;
		};
		let position = self
			.hover
			.filter(|hover| hover.widget == open)
			.and_then(|hover| visible.iter().position(|&index| index == hover.index));
		let next = match position {
			Some(position) => position.saturating_add_signed(delta).min(last),
			None if delta < 0 => last,
			None => 0,
		};
		self.set_hover(open, visible[next]);
	}

	fn click_hovered(&mut self, open: WidgetId, part: RowPart) {
		let Some(hover) = self.hover.filter(|hover| hover.widget == open) else {
			return;
		};
		let Some(widget) = self.page.widget(open) else {
			return;
		};
		if !widget
			.visibility_mask()
			.get(hover.index)
			.copied()
			.unwrap_or(false)
		{
			return;
		}
		let Some(row) = widget.rows().get(hover.index) else {
			return;
		};
		let target = match part {
			RowPart::Text => row.text_cell(),
			RowPart::Checkbox => row.checkbox(),
		};
		self.page.click(target);
	}

	/// Edit the filter input in place and deliver the key-up that follows.
	/// The hovered row is released since the visible rows are about to change.
	fn edit_filter(&mut self, open: WidgetId, edit: impl FnOnce(&mut String)) {
		let Some(input) = self.page.widget(open).map(|widget| widget.filter_input()) else {
			return;
		};
		self.clear_hover();
		let mut value = self.page.surface().input_value(input);
		edit(&mut value);
		self.page.surface_mut().set_input_value(input, &value);
		self.page.key_up(input);
	}
}
