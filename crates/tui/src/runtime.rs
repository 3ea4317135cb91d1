//! Application runtime and event loop.

use std::collections::VecDeque;
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::crossterm::event::{
	self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use ratatui::crossterm::execute;

use crate::App;
use crate::outcome::SelectionOutcome;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Run a prepared [`App`] to completion.
pub fn run(mut app: App) -> Result<SelectionOutcome> {
	app.run()
}

impl App {
	/// Pump the terminal event loop until the user exits with a result.
	///
	/// The terminal is restored and the input thread stopped however the
	/// loop ends.
	pub fn run(&mut self) -> Result<SelectionOutcome> {
		let mut terminal = ratatui::init();
		terminal.clear()?;
		execute!(stdout(), EnableMouseCapture)?;

		let (event_tx, event_rx) = mpsc::channel();
		let event_loop_running = Arc::new(AtomicBool::new(true));
		let event_loop_flag = Arc::clone(&event_loop_running);

		let event_thread = thread::spawn(move || -> Result<()> {
			while event_loop_flag.load(Ordering::Relaxed) {
				if event::poll(Duration::from_millis(50))? {
					let event = event::read()?;
					if event_tx.send(event).is_err() {
						break;
					}
				}
			}
			Ok(())
		});

		let result = self.pump(&mut terminal, &event_rx);

		ratatui::restore();
		let released = execute!(stdout(), DisableMouseCapture);

		event_loop_running.store(false, Ordering::Relaxed);
		drop(event_rx);
		let joined = match event_thread.join() {
			Ok(join_result) => join_result,
			Err(err) => std::panic::resume_unwind(err),
		};

		let outcome = result?;
		released?;
		joined?;
		Ok(outcome)
	}

	/// Drain input, advance deferred work and redraw until a key finishes
	/// the form.
	pub(crate) fn pump<B: Backend>(
		&mut self,
		terminal: &mut Terminal<B>,
		events: &mpsc::Receiver<Event>,
	) -> Result<SelectionOutcome> {
		let mut pending_events = VecDeque::new();

		loop {
			loop {
				match events.try_recv() {
					Ok(event) => pending_events.push_back(event),
					Err(mpsc::TryRecvError::Empty) => break,
					Err(mpsc::TryRecvError::Disconnected) => {
						if pending_events.is_empty() {
							return Err(anyhow!("input event channel disconnected"));
						}
						break;
					}
				}
			}

			while let Some(event) = pending_events.pop_front() {
				match event {
					Event::Key(key) if key.kind == KeyEventKind::Press => {
						if let Some(outcome) = self.handle_key(key)? {
							return Ok(outcome);
						}
					}
					Event::Mouse(mouse) => self.handle_mouse(mouse),
					_ => {}
				}
			}

			self.tick();

			terminal.draw(|frame| self.draw(frame))?;

			thread::sleep(FRAME_INTERVAL);
		}
	}
}
