//! Query matching and the debounced filter engine.
//!
//! Matching is case-insensitive and unanchored. Arbitrary user input never
//! makes evaluation fail: queries are escaped by default, and in pattern mode
//! an invalid pattern falls back to literal matching.

use std::time::Duration;

use log::debug;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::schedule::{Scheduler, Task, TaskKind, TimerSlot};
use crate::widget::WidgetId;

/// How a filter query is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
	/// The query is a literal substring.
	#[default]
	Literal,
	/// The query is a regular expression; invalid patterns match literally.
	Pattern,
}

impl MatchMode {
	/// Parse a mode name as used in configuration files and on the CLI.
	#[must_use]
	pub fn from_name(name: &str) -> Option<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"literal" => Some(Self::Literal),
			"pattern" | "regex" => Some(Self::Pattern),
			_ => None,
		}
	}
}

/// Compiled form of a filter query.
#[derive(Debug, Clone)]
pub enum QueryMatcher {
	/// Empty query, everything matches.
	All,
	Regex(Regex),
	/// Lowercased needle, used when even the escaped pattern cannot compile.
	Plain(String),
}

impl QueryMatcher {
	/// Compile `query` under the given mode.
	#[must_use]
	pub fn new(query: &str, mode: MatchMode) -> Self {
		if query.is_empty() {
			return Self::All;
		}

		match mode {
			MatchMode::Literal => Self::literal(query),
			MatchMode::Pattern => match case_insensitive(query) {
				Ok(regex) => Self::Regex(regex),
				Err(err) => {
					debug!("filter pattern {query:?} is invalid ({err}), matching literally");
					Self::literal(query)
				}
			},
		}
	}

	fn literal(query: &str) -> Self {
		match case_insensitive(&regex::escape(query)) {
			Ok(regex) => Self::Regex(regex),
			Err(_) => Self::Plain(query.to_lowercase()),
		}
	}

	/// Returns `true` if `text` contains the query.
	#[must_use]
	pub fn matches(&self, text: &str) -> bool {
		match self {
			Self::All => true,
			Self::Regex(regex) => regex.is_match(text),
			Self::Plain(needle) => text.to_lowercase().contains(needle.as_str()),
		}
	}
}

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
	RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Visibility state derived from the last evaluated query.
#[derive(Debug)]
pub struct FilterEngine {
	mode: MatchMode,
	debounce: Duration,
	query: String,
	matcher: QueryMatcher,
	mask: Vec<bool>,
	any_match: bool,
	pending: TimerSlot,
	evaluations: u64,
}

impl FilterEngine {
	/// Create an engine for `len` options with every row visible.
	#[must_use]
	pub fn new(len: usize, mode: MatchMode, debounce: Duration) -> Self {
		Self {
			mode,
			debounce,
			query: String::new(),
			matcher: QueryMatcher::All,
			mask: vec![true; len],
			any_match: true,
			pending: TimerSlot::default(),
			evaluations: 0,
		}
	}

	/// Request an evaluation after the debounce window, collapsing any
	/// request that is still pending.
	pub fn request(&mut self, scheduler: &mut Scheduler, widget: WidgetId) {
		self.pending.arm(
			scheduler,
			self.debounce,
			Task::new(widget, TaskKind::Filter),
		);
	}

	/// Drop a pending evaluation without running it.
	pub fn cancel(&mut self, scheduler: &mut Scheduler) -> bool {
		self.pending.cancel(scheduler)
	}

	/// Mark the pending evaluation as fired.
	pub fn fired(&mut self) {
		self.pending.fired();
	}

	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.pending.is_armed()
	}

	/// Recompute the mask for `query` over the option texts.
	pub fn evaluate<'a, I>(&mut self, query: &str, texts: I)
	where
		I: IntoIterator<Item = &'a str>,
	{
		self.query = query.to_string();
		self.matcher = QueryMatcher::new(query, self.mode);
		self.mask = texts
			.into_iter()
			.map(|text| self.matcher.matches(text))
			.collect();
		self.any_match = self.mask.iter().any(|visible| *visible);
		self.evaluations += 1;
		debug!(
			"filter {:?} matched {} of {} options",
			self.query,
			self.mask.iter().filter(|visible| **visible).count(),
			self.mask.len()
		);
	}

	/// Whether `text` matches the last evaluated query.
	#[must_use]
	pub fn matches(&self, text: &str) -> bool {
		self.matcher.matches(text)
	}

	/// The last evaluated query.
	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	#[must_use]
	pub fn mask(&self) -> &[bool] {
		&self.mask
	}

	/// `false` when the last evaluation hid every option.
	#[must_use]
	pub fn any_match(&self) -> bool {
		self.any_match
	}

	/// How many evaluations have run since construction.
	#[must_use]
	pub fn evaluations(&self) -> u64 {
		self.evaluations
	}

	#[must_use]
	pub fn mode(&self) -> MatchMode {
		self.mode
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const TEXTS: [&str; 2] = ["New York", "Los Angeles"];

	fn engine(mode: MatchMode) -> FilterEngine {
		FilterEngine::new(TEXTS.len(), mode, Duration::from_millis(300))
	}

	#[test]
	fn empty_query_matches_everything() {
		let matcher = QueryMatcher::new("", MatchMode::Literal);
		assert!(matcher.matches(""));
		assert!(matcher.matches("anything"));
	}

	#[test]
	fn literal_matching_ignores_case() {
		let matcher = QueryMatcher::new("YORK", MatchMode::Literal);
		assert!(matcher.matches("New York"));
		assert!(!matcher.matches("Los Angeles"));
	}

	#[test]
	fn literal_mode_treats_pattern_characters_as_text() {
		let matcher = QueryMatcher::new("a.c(", MatchMode::Literal);
		assert!(matcher.matches("xa.c(y"));
		assert!(!matcher.matches("abc("));
	}

	#[test]
	fn pattern_mode_supports_expressions() {
		let matcher = QueryMatcher::new("^los", MatchMode::Pattern);
		assert!(matcher.matches("Los Angeles"));
		assert!(!matcher.matches("Carlos"));
	}

	#[test]
	fn invalid_pattern_falls_back_to_literal() {
		let matcher = QueryMatcher::new("[ab", MatchMode::Pattern);
		assert!(matcher.matches("x[AB"));
		assert!(!matcher.matches("ab"));
	}

	#[test]
	fn mask_follows_query() {
		let mut engine = engine(MatchMode::Literal);
		engine.evaluate("ang", TEXTS);
		assert_eq!(engine.mask(), &[false, true]);
		assert!(engine.any_match());

		// Substring only: "la" spans no contiguous run of "Los Angeles".
		engine.evaluate("la", TEXTS);
		assert_eq!(engine.mask(), &[false, false]);

		engine.evaluate("zzz", TEXTS);
		assert_eq!(engine.mask(), &[false, false]);
		assert!(!engine.any_match());
		assert_eq!(engine.evaluations(), 3);
	}

	#[test]
	fn mask_agrees_with_matches_for_every_option() {
		let mut engine = engine(MatchMode::Literal);
		for query in ["", "e", "N", "an", " ", "*", "york"] {
			engine.evaluate(query, TEXTS);
			for (text, visible) in TEXTS.iter().zip(engine.mask()) {
				let expected = query.is_empty()
					|| text.to_lowercase().contains(&query.to_lowercase());
				assert_eq!(*visible, expected, "query {query:?} on {text:?}");
				assert_eq!(engine.matches(text), expected);
			}
		}
	}

	#[test]
	fn repeated_requests_leave_a_single_pending_evaluation() {
		let mut scheduler = Scheduler::new();
		let mut engine = engine(MatchMode::Literal);
		let widget = WidgetId::new(0);

		engine.request(&mut scheduler, widget);
		scheduler.settle(Duration::from_millis(100));
		engine.request(&mut scheduler, widget);
		scheduler.settle(Duration::from_millis(200));
		engine.request(&mut scheduler, widget);

		assert_eq!(scheduler.pending(), 1);
		assert_eq!(scheduler.next_due(), Some(Duration::from_millis(500)));
		assert!(engine.cancel(&mut scheduler));
		assert_eq!(scheduler.pending(), 0);
	}

	#[test]
	fn match_mode_names() {
		assert_eq!(MatchMode::from_name("Literal"), Some(MatchMode::Literal));
		assert_eq!(MatchMode::from_name("regex"), Some(MatchMode::Pattern));
		assert_eq!(MatchMode::from_name("fuzzy"), None);
	}
}
