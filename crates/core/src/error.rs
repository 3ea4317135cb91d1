use thiserror::Error;

/// Errors raised while mounting or driving a widget.
///
/// None of these reach the end user: the page degrades to an inert or
/// unchanged widget and logs the failure instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WidgetError {
	/// The host document has no source control registered under `id`.
	#[error("no source control with id '{id}'")]
	MissingBackingControl { id: String },

	/// A visual row referenced an option that does not exist.
	#[error("option index {index} out of range for {len} options")]
	IndexOutOfRange { index: usize, len: usize },

	/// The configured width is not a pixel length such as `200px`.
	#[error("invalid width '{value}', expected a pixel length such as 200px")]
	InvalidWidth { value: String },
}

impl WidgetError {
	pub(crate) fn missing_control(id: impl Into<String>) -> Self {
		Self::MissingBackingControl { id: id.into() }
	}
}
