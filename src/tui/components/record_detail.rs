//! # RecordDetail Component
//!
//! Full-screen view of one record. It owns nothing but a scroll offset; the
//! record itself is passed in and may be absent, in which case every field
//! renders empty and the picture falls back to the placeholder.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::directory::{Record, picture_or_placeholder};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Default)]
pub struct RecordDetailState {
    pub scroll_state: ScrollViewState,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DetailEvent {
    Back,
}

impl RecordDetailState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for RecordDetailState {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DetailEvent> {
        match event {
            TuiEvent::Back => return Some(DetailEvent::Back),
            TuiEvent::CursorUp | TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::CursorDown | TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::PageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::PageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::Home => self.scroll_state.scroll_to_top(),
            TuiEvent::End => self.scroll_state.scroll_to_bottom(),
            _ => {}
        }
        None
    }
}

pub struct RecordDetail<'a> {
    state: &'a mut RecordDetailState,
    record: Option<&'a Record>,
}

impl<'a> RecordDetail<'a> {
    pub fn new(state: &'a mut RecordDetailState, record: Option<&'a Record>) -> Self {
        Self { state, record }
    }
}

impl Component for RecordDetail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = detail_lines(self.record);
        let title = self
            .record
            .map(|r| format!(" {} ", r.name.full()))
            .unwrap_or_else(|| " Details ".to_string());

        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let content_width = inner.width.saturating_sub(1); // scrollbar
        let content_height = lines.len() as u16;
        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(lines),
            Rect::new(0, 0, content_width, content_height),
        );
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

/// Builds every line of the detail view.
pub fn detail_lines(record: Option<&Record>) -> Vec<Line<'static>> {
    let text = |f: fn(&Record) -> String| record.map(f).unwrap_or_default();

    vec![
        field("Picture", picture_or_placeholder(record).to_string()),
        Line::raw(""),
        heading(&text(|r| r.headline())),
        Line::raw(""),
        field("Phone", text(|r| r.phone.clone())),
        field("Cell", text(|r| r.cell.clone())),
        field("Email", text(|r| r.email.clone())),
        field("Country", text(|r| r.address.country.clone())),
        Line::raw(""),
        heading("Address"),
        Line::raw(""),
        field("Street No", text(|r| r.address.street_number.to_string())),
        field("Street Name", text(|r| r.address.street_name.clone())),
        field("City", text(|r| r.address.city.clone())),
        field("State", text(|r| r.address.state.clone())),
        field("Postcode", text(|r| r.address.postcode.clone())),
        field(
            "Timezone",
            text(|r| {
                format!(
                    "{} ({})",
                    r.address.timezone_offset, r.address.timezone_description
                )
            }),
        ),
    ]
}
