//! Application state and behavior for the interactive form.
//!
//! The [`App`] type wraps a [`Page`](multisel_core::Page) of widgets over an
//! in-memory surface and translates terminal input into surface events.
//! Supporting modules split the implementation into input handling,
//! hit-testing and rendering.

mod actions;
mod hits;
mod render;
mod state;

pub use state::{App, Entry};
