//! Crate exports for building and running the `multisel` terminal form.
//!
//! The root module re-exports the widget core and the terminal front-end so
//! that embedders can set up option lists and widgets without digging through
//! the member crates.

pub mod app_dirs;
pub mod logging;
pub mod options;

pub use multisel_core::{
	BackingSelection, MatchMode, MemorySurface, Page, SelectOption, SourceControl, Timings,
	WidgetConfig, WidgetError, WidgetId, WidgetInstance,
};
pub use multisel_tui::{
	App, MultiSelectUi, SelectionOutcome, Theme, UiLabels, WidgetSelection, builtin_themes,
	default_theme, run,
};
pub use options::{OptionList, OptionsError};

/// Theme lookup helpers.
pub mod theme {
	pub use multisel_tui::style::{by_name, names};
}
