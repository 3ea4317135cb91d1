//! Drawing of the page: a header, one block per widget and an optional log
//! pane. Every region drawn is recorded in the hit map so pointer input can
//! be routed back to the surface node underneath.

mod entry;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use super::state::App;
use entry::EntryView;

impl App {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		self.hits.clear();
		let area = frame.area();
		let (main, log) = if self.show_log {
			let [main, log] =
				Layout::vertical([Constraint::Min(4), Constraint::Percentage(30)]).areas(area);
			(main, Some(log))
		} else {
			(area, None)
		};

		let [header, body] =
			Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(main);
		self.render_header(frame, header);
		self.render_entries(frame, body);

		if let Some(log) = log {
			render_log(frame, log);
		}
	}

	fn render_header(&self, frame: &mut Frame, area: Rect) {
		let theme = &self.style.theme;
		let lines = vec![
			Line::from(Span::styled(self.ui.title.as_str(), theme.header)),
			Line::from(Span::styled(self.ui.hint.as_str(), theme.empty)),
		];
		frame.render_widget(Paragraph::new(lines), area);
	}

	fn render_entries(&mut self, frame: &mut Frame, body: Rect) {
		let view = EntryView {
			page: &self.page,
			theme: &self.style.theme,
			labels: &self.ui,
			hover: self.hover,
		};
		let bottom = body.bottom();
		let mut y = body.y;
		for entry in &self.entries {
			if y >= bottom {
				break;
			}
			let height = view.height(entry).min(bottom - y);
			let width = view.width(entry).min(body.width);
			let area = Rect::new(body.x, y, width, height);
			view.render(frame, entry, area, &mut self.hits, &mut self.scroll);
			y = y.saturating_add(height).saturating_add(1);
		}
	}
}

fn render_log(frame: &mut Frame, area: Rect) {
	let widget = TuiLoggerWidget::default()
		.block(Block::bordered().title("Runtime log"))
		.output_level(Some(TuiLoggerLevelOutput::Abbreviated))
		.output_target(false)
		.output_file(false)
		.output_line(false);
	frame.render_widget(widget, area);
}
