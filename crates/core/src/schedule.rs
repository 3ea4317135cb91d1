//! Virtual-time task queue for deferred widget work.
//!
//! Every deferred callback (filter debounce, height adjustment, focus after
//! opening) is queued here instead of on a raw timer, so the page decides
//! when time moves and tests can advance it deterministically.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::widget::WidgetId;

/// Kind of deferred work a widget can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
	/// Evaluate the filter query currently typed into the filter field.
	Filter,
	/// Re-derive the results container height from its content.
	AdjustHeight,
	/// Move input focus to the filter field of an open widget.
	FocusFilter,
}

/// A unit of deferred work addressed to one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
	pub widget: WidgetId,
	pub kind: TaskKind,
}

impl Task {
	#[must_use]
	pub fn new(widget: WidgetId, kind: TaskKind) -> Self {
		Self { widget, kind }
	}
}

/// Handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
	due: Duration,
	seq: u64,
}

impl TimerId {
	/// Virtual time at which the task fires.
	#[must_use]
	pub fn due(&self) -> Duration {
		self.due
	}
}

/// Ordered queue of pending tasks keyed by due time and insertion order.
#[derive(Debug, Default)]
pub struct Scheduler {
	now: Duration,
	seq: u64,
	queue: BTreeMap<(Duration, u64), Task>,
}

impl Scheduler {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Current virtual time.
	#[must_use]
	pub fn now(&self) -> Duration {
		self.now
	}

	/// Queue `task` to run `delay` after the current time.
	pub fn schedule(&mut self, delay: Duration, task: Task) -> TimerId {
		let id = TimerId {
			due: self.now + delay,
			seq: self.seq,
		};
		self.seq += 1;
		self.queue.insert((id.due, id.seq), task);
		id
	}

	/// Cancel a pending task. Returns `false` if it already ran or was cancelled.
	pub fn cancel(&mut self, id: TimerId) -> bool {
		self.queue.remove(&(id.due, id.seq)).is_some()
	}

	#[must_use]
	pub fn is_pending(&self, id: TimerId) -> bool {
		self.queue.contains_key(&(id.due, id.seq))
	}

	/// Number of tasks waiting to run.
	#[must_use]
	pub fn pending(&self) -> usize {
		self.queue.len()
	}

	/// Due time of the earliest pending task.
	#[must_use]
	pub fn next_due(&self) -> Option<Duration> {
		self.queue.keys().next().map(|(due, _)| *due)
	}

	/// Remove the earliest task due at or before `deadline`, moving the clock
	/// to its due time.
	pub fn pop_due(&mut self, deadline: Duration) -> Option<Task> {
		let (&(due, seq), _) = self.queue.iter().next()?;
		if due > deadline {
			return None;
		}
		let task = self.queue.remove(&(due, seq))?;
		self.now = self.now.max(due);
		Some(task)
	}

	/// Move the clock forward to `deadline` once every due task has run.
	pub fn settle(&mut self, deadline: Duration) {
		self.now = self.now.max(deadline);
	}
}

/// At most one pending timer of a given kind for a widget.
///
/// Arming the slot again cancels whatever was pending, which gives the
/// debounce behaviour for filtering and replaces stale height or focus
/// requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimerSlot {
	pending: Option<TimerId>,
}

impl TimerSlot {
	/// Cancel the pending timer, if any, and schedule a fresh one.
	pub fn arm(&mut self, scheduler: &mut Scheduler, delay: Duration, task: Task) -> TimerId {
		self.cancel(scheduler);
		let id = scheduler.schedule(delay, task);
		self.pending = Some(id);
		id
	}

	/// Cancel the pending timer. Returns `true` if one was pending.
	pub fn cancel(&mut self, scheduler: &mut Scheduler) -> bool {
		match self.pending.take() {
			Some(id) => scheduler.cancel(id),
			None => false,
		}
	}

	/// Forget the timer after it has fired.
	pub fn fired(&mut self) {
		self.pending = None;
	}

	#[must_use]
	pub fn is_armed(&self) -> bool {
		self.pending.is_some()
	}
}
