//! One visual row per option, bound to the option's `selected` flag.

use crate::WidgetError;
use crate::backing::{BackingSelection, SelectOption};
use crate::surface::{ElementKind, NodeId, StyleProperty, Surface};

/// Background applied while the pointer is over a row.
pub const HOVER_BACKGROUND: &str = "#EEEEEE";

/// Nodes making up a rendered option row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBinding {
	index: usize,
	row: NodeId,
	text_cell: NodeId,
	checkbox: NodeId,
}

impl RowBinding {
	/// Append a row for `option` to `table`.
	pub fn render<S: Surface>(
		surface: &mut S,
		table: NodeId,
		index: usize,
		option: &SelectOption,
	) -> Self {
		let row = surface.create_element(ElementKind::Row);
		surface.append_child(table, row);

		let text_cell = surface.create_element(ElementKind::TextCell);
		surface.add_class(text_cell, "text-col");
		surface.set_text(text_cell, &option.text);
		surface.append_child(row, text_cell);

		let check_cell = surface.create_element(ElementKind::CheckCell);
		surface.add_class(check_cell, "check-col");
		surface.append_child(row, check_cell);

		let checkbox = surface.create_element(ElementKind::Checkbox);
		surface.set_checked(checkbox, option.selected);
		surface.append_child(check_cell, checkbox);

		Self {
			index,
			row,
			text_cell,
			checkbox,
		}
	}

	#[must_use]
	pub fn index(&self) -> usize {
		self.index
	}

	#[must_use]
	pub fn row(&self) -> NodeId {
		self.row
	}

	#[must_use]
	pub fn text_cell(&self) -> NodeId {
		self.text_cell
	}

	#[must_use]
	pub fn checkbox(&self) -> NodeId {
		self.checkbox
	}

	/// Handle a click that reached the row. Clicks on the checkbox itself are
	/// left to the checkbox; anywhere else flips it. Returns `true` when the
	/// checkbox was flipped and the change path must run.
	pub fn click<S: Surface>(&self, surface: &mut S, target: NodeId) -> bool {
		if target == self.checkbox {
			return false;
		}
		let checked = surface.is_checked(self.checkbox);
		surface.set_checked(self.checkbox, !checked);
		true
	}

	/// Write the checkbox state through to the backing selection.
	pub fn commit<S: Surface>(
		&self,
		surface: &S,
		selection: &mut BackingSelection,
	) -> Result<bool, WidgetError> {
		let checked = surface.is_checked(self.checkbox);
		selection.set_selected(self.index, checked)?;
		Ok(checked)
	}

	/// Bring the checkbox in line with the backing selection.
	pub fn sync<S: Surface>(
		&self,
		surface: &mut S,
		selection: &BackingSelection,
	) -> Result<(), WidgetError> {
		let selected = selection
			.is_selected(self.index)
			.ok_or(WidgetError::IndexOutOfRange {
				index: self.index,
				len: selection.len(),
			})?;
		if surface.is_checked(self.checkbox) != selected {
			surface.set_checked(self.checkbox, selected);
		}
		Ok(())
	}

	pub fn hover<S: Surface>(&self, surface: &mut S, entered: bool) {
		let background = entered.then_some(HOVER_BACKGROUND);
		surface.set_style(self.row, StyleProperty::Background, background);
	}

	pub fn set_visible<S: Surface>(&self, surface: &mut S, visible: bool) {
		surface.set_visible(self.row, visible);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::backing::SourceControl;
	use crate::surface::MemorySurface;

	fn fixture() -> (MemorySurface, BackingSelection, RowBinding) {
		let mut surface = MemorySurface::new();
		let table = surface.create_element(ElementKind::ResultsTable);
		let control = SourceControl::new(vec![SelectOption::new("NY", "New York")]);
		let selection = BackingSelection::new(control);
		let binding = {
			let options = selection.get_all();
			RowBinding::render(&mut surface, table, 0, &options[0])
		};
		(surface, selection, binding)
	}

	#[test]
	fn clicking_the_text_cell_flips_and_commits() {
		let (mut surface, mut selection, binding) = fixture();
		assert_eq!(surface.text(binding.text_cell()), "New York");

		assert!(binding.click(&mut surface, binding.text_cell()));
		assert_eq!(binding.commit(&surface, &mut selection), Ok(true));
		assert_eq!(selection.selected_values(), vec!["NY"]);
	}

	#[test]
	fn clicking_the_checkbox_is_left_to_the_checkbox() {
		let (mut surface, _selection, binding) = fixture();
		surface.set_checked(binding.checkbox(), true);

		assert!(!binding.click(&mut surface, binding.checkbox()));
		assert!(surface.is_checked(binding.checkbox()));
	}

	#[test]
	fn sync_pulls_host_changes_into_the_checkbox() {
		let (mut surface, selection, binding) = fixture();
		selection
			.control()
			.set_selected(0, true)
			.expect("index 0 exists");

		binding.sync(&mut surface, &selection).expect("in range");
		assert!(surface.is_checked(binding.checkbox()));
	}

	#[test]
	fn hover_sets_and_clears_background() {
		let (mut surface, _selection, binding) = fixture();
		binding.hover(&mut surface, true);
		assert_eq!(
			surface.style(binding.row(), StyleProperty::Background),
			Some(HOVER_BACKGROUND)
		);
		binding.hover(&mut surface, false);
		assert_eq!(surface.style(binding.row(), StyleProperty::Background), None);
	}
}
