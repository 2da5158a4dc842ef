use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::core::load::LoadState;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{Footer, RecordDetail, RecordList, TitleBar};
use crate::tui::{Route, TuiState};

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn spinner_glyph(spinner_frame: usize) -> char {
    SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()]
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    let spinner = app.is_loading().then(|| spinner_glyph(spinner_frame));
    TitleBar::new(app.feed.len(), app.status_message.clone(), spinner).render(frame, title_area);

    match &tui.route {
        Route::Detail(record) => {
            RecordDetail::new(&mut tui.record_detail, record.as_ref()).render(frame, main_area);
        }
        Route::List if app.is_refreshing() => {
            draw_refresh_spinner(frame, main_area, spinner_glyph(spinner_frame));
        }
        Route::List => {
            let footer = footer_for(app, spinner_frame);
            RecordList::new(&mut tui.record_list, app.feed.snapshot(), footer)
                .render(frame, main_area);
        }
    }

    let help = match tui.route {
        Route::List => " ↑↓ move  Enter open  r refresh  t retry  q quit ",
        Route::Detail(_) => " ↑↓ scroll  Esc back  r refresh  q quit ",
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

/// Chooses the list footer from the controller's flags.
pub fn footer_for(app: &App, spinner_frame: usize) -> Footer {
    match app.load.state() {
        LoadState::Loading => Footer::Loading {
            page: app.load.in_flight().map_or(app.load.next_page(), |r| r.page),
            spinner: spinner_glyph(spinner_frame),
        },
        LoadState::Error => Footer::Error(
            app.load
                .error()
                .map(|e| format!("Page {} failed: {}", app.load.next_page(), e))
                .unwrap_or_else(|| "Load failed".to_string()),
        ),
        LoadState::Idle => Footer::None,
    }
}

fn draw_refresh_spinner(frame: &mut Frame, area: Rect, glyph: char) {
    let [center] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    let spinner = Paragraph::new(format!("{glyph} Loading directory..."))
        .style(Style::default().fg(Color::Cyan))
        .centered();
    frame.render_widget(spinner, center);
}
