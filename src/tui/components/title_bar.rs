//! # TitleBar Component
//!
//! Top status line: app name, record count and the current status message.
//!
//! TitleBar is purely presentational. It receives all data as props and
//! has no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.feed.len(), app.status_message.clone(), None);
//! title_bar.render(frame, area);
//! ```
//!
//! The text changes based on state:
//!
//! 1. **Loading**: `"⠋ Roster (20 people) | Loading page 3..."`
//! 2. **Status message**: `"Roster (20 people) | 20 people, page 2 (+10)"`
//! 3. **Default**: `"Roster (20 people)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    /// Number of records in the feed
    pub record_count: usize,
    /// Status message (e.g., "Loading page 2...")
    pub status_message: String,
    /// Spinner glyph while a fetch is running
    pub spinner: Option<char>,
}

impl TitleBar {
    pub fn new(record_count: usize, status_message: String, spinner: Option<char>) -> Self {
        Self {
            record_count,
            status_message,
            spinner,
        }
    }

    pub fn text(&self) -> String {
        let noun = if self.record_count == 1 { "person" } else { "people" };
        let base = format!("Roster ({} {noun})", self.record_count);
        let base = match self.spinner {
            Some(glyph) => format!("{glyph} {base}"),
            None => base,
        };
        if self.status_message.is_empty() {
            base
        } else {
            format!("{base} | {}", self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}
