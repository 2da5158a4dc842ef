//! # RecordList Component
//!
//! Scrollable directory list with a one-line footer.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RecordListState` lives in `TuiState` (selection, viewport size)
//! - `RecordList` is created each frame with borrowed state and records
//!
//! Reaching the last row emits `ListEvent::EndReached`. The component does
//! not know whether a load is running; the core ignores the event while one is.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::directory::Record;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Rows per record in the list.
const ROW_HEIGHT: u16 = 2;
/// Display width reserved for the "Name, age" column.
const NAME_COLUMN_WIDTH: usize = 32;

/// Persistent state for the record list.
#[derive(Default)]
pub struct RecordListState {
    pub list_state: ListState,
    /// Number of records, synced from the feed every loop iteration.
    pub len: usize,
    /// Records that fit in the viewport, measured on the last render.
    pub visible_rows: usize,
}

/// Events emitted by the record list.
#[derive(Debug, PartialEq, Eq)]
pub enum ListEvent {
    EndReached,
    Open(usize),
}

impl RecordListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the record count and keeps the selection inside it.
    pub fn sync(&mut self, len: usize) {
        self.len = len;
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            None => self.list_state.select(Some(0)),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    /// Back to the top with nothing selected, for a new session.
    pub fn reset(&mut self) {
        self.list_state = ListState::default();
        self.len = 0;
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    fn page_step(&self) -> usize {
        self.visible_rows.max(1)
    }

    /// Moves the selection down by `step`, reporting when the end is reached.
    fn move_down(&mut self, step: usize) -> Option<ListEvent> {
        if self.len == 0 {
            return Some(ListEvent::EndReached);
        }
        let last = self.len - 1;
        let next = self
            .list_state
            .selected()
            .map_or(0, |i| i.saturating_add(step))
            .min(last);
        self.list_state.select(Some(next));
        (next == last).then_some(ListEvent::EndReached)
    }

    fn move_up(&mut self, step: usize) {
        if self.len == 0 {
            return;
        }
        let prev = self
            .list_state
            .selected()
            .map_or(0, |i| i.saturating_sub(step));
        self.list_state.select(Some(prev));
    }
}

impl EventHandler for RecordListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        match event {
            TuiEvent::CursorDown | TuiEvent::ScrollDown => self.move_down(1),
            TuiEvent::PageDown => self.move_down(self.page_step()),
            TuiEvent::End => self.move_down(self.len),
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.move_up(1);
                None
            }
            TuiEvent::PageUp => {
                self.move_up(self.page_step());
                None
            }
            TuiEvent::Home => {
                self.move_up(self.len);
                None
            }
            TuiEvent::Select => self.list_state.selected().map(ListEvent::Open),
            _ => None,
        }
    }
}

/// What the footer line shows under the list.
#[derive(Debug, Clone, PartialEq)]
pub enum Footer {
    None,
    Loading { page: u32, spinner: char },
    Error(String),
}

/// Transient render wrapper for the record list.
pub struct RecordList<'a> {
    state: &'a mut RecordListState,
    records: &'a [Record],
    footer: Footer,
}

impl<'a> RecordList<'a> {
    pub fn new(state: &'a mut RecordListState, records: &'a [Record], footer: Footer) -> Self {
        Self {
            state,
            records,
            footer,
        }
    }
}

impl Component for RecordList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [list_area, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Directory ({}) ", self.records.len()));

        self.state.visible_rows = (list_area.height.saturating_sub(2) / ROW_HEIGHT) as usize;

        if self.records.is_empty() {
            let empty = Paragraph::new("Nobody here yet. Press ↓ to load more or r to refresh.")
                .style(Style::default().fg(Color::DarkGray))
                .centered()
                .block(block);
            frame.render_widget(empty, list_area);
        } else {
            let items: Vec<ListItem> = self.records.iter().map(row).collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            frame.render_stateful_widget(list, list_area, &mut self.state.list_state);
        }

        frame.render_widget(footer_line(&self.footer), footer_area);
    }
}

/// Two-line list row: headline and phone on top, id and thumbnail below.
fn row(record: &Record) -> ListItem<'_> {
    let top = Line::from(vec![
        Span::styled(
            fit_width(&record.headline(), NAME_COLUMN_WIDTH),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(format!("Phone: {}", record.phone)),
    ]);
    let bottom = Line::from(vec![
        Span::styled(
            format!("  {}", record.id.short()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            record.thumbnail_url().unwrap_or("no picture").to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        ),
    ]);
    ListItem::new(vec![top, bottom])
}

fn footer_line(footer: &Footer) -> Paragraph<'static> {
    match footer {
        Footer::None => Paragraph::new(""),
        Footer::Loading { page, spinner } => {
            Paragraph::new(format!("{spinner} Loading page {page}..."))
                .style(Style::default().fg(Color::Cyan))
                .centered()
        }
        Footer::Error(message) => Paragraph::new(format!("{message}  (t to retry, r to refresh)"))
            .style(Style::default().fg(Color::Red))
            .centered(),
    }
}

/// Pads or truncates `s` to exactly `width` display columns.
/// Wide characters (CJK, emoji) count as two.
pub fn fit_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        let pad = width - s.width();
        return format!("{s}{}", " ".repeat(pad));
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        // Leave one column for the ellipsis
        if used + w > width.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
        used += 1;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
