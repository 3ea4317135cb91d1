//! Interactive terminal front-end for `multisel`.
//!
//! This crate hosts the widgets of [`multisel_core`] on an in-memory surface,
//! draws them with ratatui and turns keyboard and mouse input into surface
//! events. It contains the builder, the event loop, rendering and styling.

mod app;
mod builder;
mod config;
mod outcome;
mod runtime;
pub mod style;

pub use app::{App, Entry};
pub use builder::MultiSelectUi;
pub use config::UiLabels;
pub use outcome::{SelectionOutcome, WidgetSelection};
pub use runtime::run;

pub use crate::style::{StyleConfig, Theme, builtin_themes, default_theme};
