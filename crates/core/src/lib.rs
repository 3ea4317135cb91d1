//! Headless core of the `multisel` widget.
//!
//! A widget replaces a native multi-value select control with a
//! search-filterable list of checkbox rows while the original option list
//! stays the source of truth. The crate models the widget against an abstract
//! [`Surface`] so the same state machine drives the terminal front-end and
//! the tests.

pub mod backing;
mod config;
mod error;
pub mod filter;
mod page;
pub mod registry;
pub mod row;
pub mod schedule;
pub mod surface;
pub mod widget;

pub use backing::{BackingSelection, SelectOption, SourceControl};
pub use config::{DEFAULT_WIDTH, Timings, WidgetConfig, parse_px};
pub use error::WidgetError;
pub use filter::{FilterEngine, MatchMode, QueryMatcher};
pub use page::Page;
pub use registry::OpenInstanceRegistry;
pub use row::RowBinding;
pub use schedule::{Scheduler, TimerSlot};
pub use surface::{ElementKind, EventKind, MemorySurface, NodeId, StyleProperty, Surface};
pub use widget::{WidgetId, WidgetInstance, WidgetState, summary_text};
