//! Ordered option records shared between the host's source control and the
//! widget that replaces it.
//!
//! The host keeps a [`SourceControl`] handle and the widget wraps a clone of
//! it in a [`BackingSelection`]. Both observe the same records, so the source
//! control stays the queryable state while the widget is the visible UI.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::WidgetError;

/// A single entry of a multi-value selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
	/// Value committed when the option is selected. Not required to be unique.
	pub value: String,
	/// Human-readable text shown in the row and the summary label.
	pub text: String,
	/// Whether the option is currently part of the selection.
	#[serde(default)]
	pub selected: bool,
}

impl SelectOption {
	/// Construct an unselected option.
	#[must_use]
	pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			text: text.into(),
			selected: false,
		}
	}

	/// Mark the option as selected.
	#[must_use]
	pub fn selected(mut self) -> Self {
		self.selected = true;
		self
	}
}

/// Shared, mutable-in-place handle to a source control's options.
#[derive(Debug, Clone, Default)]
pub struct SourceControl {
	options: Rc<RefCell<Vec<SelectOption>>>,
}

impl SourceControl {
	/// Wrap a list of options in a shareable handle.
	#[must_use]
	pub fn new(options: Vec<SelectOption>) -> Self {
		Self {
			options: Rc::new(RefCell::new(options)),
		}
	}

	/// Borrow the live option records.
	pub fn options(&self) -> Ref<'_, [SelectOption]> {
		Ref::map(self.options.borrow(), Vec::as_slice)
	}

	/// Values of the selected options, in source order.
	#[must_use]
	pub fn selected_values(&self) -> Vec<String> {
		self.options()
			.iter()
			.filter(|option| option.selected)
			.map(|option| option.value.clone())
			.collect()
	}

	/// Flip the selected flag of an option from the host side.
	pub fn set_selected(&self, index: usize, selected: bool) -> Result<(), WidgetError> {
		let mut options = self.options.borrow_mut();
		let len = options.len();
		let option = options
			.get_mut(index)
			.ok_or(WidgetError::IndexOutOfRange { index, len })?;
		option.selected = selected;
		Ok(())
	}

	/// Returns `true` when both handles point at the same option list.
	#[must_use]
	pub fn same_control(&self, other: &SourceControl) -> bool {
		Rc::ptr_eq(&self.options, &other.options)
	}
}

/// The widget's view over a source control.
///
/// The number and order of options never change; only `selected` mutates.
#[derive(Debug, Clone)]
pub struct BackingSelection {
	control: SourceControl,
}

impl BackingSelection {
	/// Wrap the host's source control.
	#[must_use]
	pub fn new(control: SourceControl) -> Self {
		Self { control }
	}

	/// Live view of every option. Mutations are visible immediately.
	pub fn get_all(&self) -> Ref<'_, [SelectOption]> {
		self.control.options()
	}

	/// Number of options in the list.
	#[must_use]
	pub fn len(&self) -> usize {
		self.control.options().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Return the text of a single option.
	#[must_use]
	pub fn text(&self, index: usize) -> Option<String> {
		self.control
			.options()
			.get(index)
			.map(|option| option.text.clone())
	}

	/// Return whether an option is selected.
	#[must_use]
	pub fn is_selected(&self, index: usize) -> Option<bool> {
		self.control
			.options()
			.get(index)
			.map(|option| option.selected)
	}

	/// Set the selected flag of one option. No other state is touched.
	pub fn set_selected(&mut self, index: usize, selected: bool) -> Result<(), WidgetError> {
		self.control.set_selected(index, selected)
	}

	/// Values of the selected options, preserving source order.
	#[must_use]
	pub fn selected_values(&self) -> Vec<String> {
		self.control.selected_values()
	}

	/// Texts of the selected options, preserving source order.
	#[must_use]
	pub fn selected_texts(&self) -> Vec<String> {
		self.control
			.options()
			.iter()
			.filter(|option| option.selected)
			.map(|option| option.text.clone())
			.collect()
	}

	/// The underlying source control handle.
	#[must_use]
	pub fn control(&self) -> &SourceControl {
		&self.control
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cities() -> SourceControl {
		SourceControl::new(vec![
			SelectOption::new("NY", "New York"),
			SelectOption::new("LA", "Los Angeles"),
			SelectOption::new("SF", "San Francisco").selected(),
		])
	}

	#[test]
	fn selected_values_and_texts_preserve_source_order() {
		let mut selection = BackingSelection::new(cities());
		selection.set_selected(0, true).expect("index 0 exists");

		assert_eq!(selection.selected_values(), vec!["NY", "SF"]);
		assert_eq!(selection.selected_texts(), vec!["New York", "San Francisco"]);
	}

	#[test]
	fn set_selected_rejects_unknown_index() {
		let mut selection = BackingSelection::new(cities());
		let err = selection.set_selected(3, true).unwrap_err();
		assert_eq!(err, WidgetError::IndexOutOfRange { index: 3, len: 3 });
		assert_eq!(selection.selected_values(), vec!["SF"]);
	}

	#[test]
	fn host_handle_sees_widget_mutations_live() {
		let control = cities();
		let mut selection = BackingSelection::new(control.clone());

		selection.set_selected(1, true).expect("index 1 exists");
		assert!(control.options()[1].selected);

		control.set_selected(2, false).expect("index 2 exists");
		assert_eq!(selection.selected_values(), vec!["LA"]);
		assert!(selection.control().same_control(&control));
	}

	#[test]
	fn duplicate_values_are_kept_apart() {
		let control = SourceControl::new(vec![
			SelectOption::new("x", "First"),
			SelectOption::new("x", "Second").selected(),
		]);
		let selection = BackingSelection::new(control);
		assert_eq!(selection.selected_texts(), vec!["Second"]);
		assert_eq!(selection.selected_values(), vec!["x"]);
	}

	#[test]
	fn options_deserialize_with_default_selection() {
		let options: Vec<SelectOption> =
			serde_json::from_str(r#"[{"value":"NY","text":"New York"}]"#).expect("valid json");
		assert_eq!(options, vec![SelectOption::new("NY", "New York")]);
	}
}
