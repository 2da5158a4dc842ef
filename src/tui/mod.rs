//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values and executes the
//! `Effect`s that `update()` returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Fetch Tasks
//!
//! `Effect::Fetch` spawns one tokio task per page. The task reports back over
//! the same `mpsc` channel the loop drains every iteration, so all state is
//! still mutated from this thread only. Spawning a fetch aborts the previous
//! task first; a refresh therefore cancels a stale page, and if the stale
//! response was already queued `update()` drops it by epoch.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or fetch results.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::load::PageRequest;
use crate::core::state::App;
use crate::directory::{FetchError, PageFetcher, RandomUserFetcher, Record};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DetailEvent, ListEvent, RecordDetailState, RecordListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// The two screens. The detail screen carries its own copy of the record.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    List,
    Detail(Option<Record>),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub route: Route,
    pub record_list: RecordListState,
    pub record_detail: RecordDetailState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            route: Route::List,
            record_list: RecordListState::new(),
            record_detail: RecordDetailState::new(),
        }
    }

    pub fn open_detail(&mut self, record: Option<Record>) {
        self.record_detail = RecordDetailState::new();
        self.route = Route::Detail(record);
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let fetcher: Arc<dyn PageFetcher> = Arc::new(RandomUserFetcher::from_config(&config));
    info!("Using directory source '{}' at {}", fetcher.name(), config.base_url);
    let mut app = App::from_config(fetcher, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from fetch tasks
    let (tx, rx) = mpsc::channel();
    let mut active_fetch: Option<AbortHandle> = None;

    let effect = update(&mut app, Action::Mount);
    run_effect(effect, &app, &tx, &mut active_fetch);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        tui.record_list.sync(app.feed.len());

        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                TuiEvent::Resize => continue,
                TuiEvent::ForceQuit | TuiEvent::Quit => Some(Action::Quit),
                TuiEvent::Refresh => {
                    tui.route = Route::List;
                    tui.record_list.reset();
                    Some(Action::Refresh)
                }
                TuiEvent::Retry => Some(Action::Retry),
                _ => match tui.route {
                    Route::List => match tui.record_list.handle_event(&event) {
                        Some(ListEvent::EndReached) => Some(Action::EndReached),
                        Some(ListEvent::Open(index)) => {
                            tui.open_detail(app.feed.get(index).cloned());
                            None
                        }
                        None => None,
                    },
                    Route::Detail(_) => {
                        if let Some(DetailEvent::Back) = tui.record_detail.handle_event(&event) {
                            tui.route = Route::List;
                        }
                        None
                    }
                },
            };

            if let Some(action) = action {
                debug!("Dispatching {:?}", action);
                let effect = update(&mut app, action);
                if run_effect(effect, &app, &tx, &mut active_fetch) {
                    should_quit = true;
                    break;
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle fetch results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", summarize(&action));
            let effect = update(&mut app, action);
            if run_effect(effect, &app, &tx, &mut active_fetch) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    if let Some(handle) = active_fetch.take() {
        handle.abort();
    }
    ratatui::restore();
    Ok(())
}

/// Executes an effect. Returns true if the app should quit.
fn run_effect(
    effect: Effect,
    app: &App,
    tx: &mpsc::Sender<Action>,
    active_fetch: &mut Option<AbortHandle>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Fetch(request) => {
            if let Some(handle) = active_fetch.take() {
                handle.abort();
            }
            *active_fetch = Some(spawn_fetch(app, request, tx.clone()));
            false
        }
    }
}

/// Short description of an action for logs; pages can be large.
fn summarize(action: &Action) -> String {
    match action {
        Action::PageLoaded { request, page } => format!(
            "PageLoaded(page={}, epoch={}, records={})",
            request.page,
            request.epoch,
            page.len()
        ),
        other => format!("{:?}", other),
    }
}

fn spawn_fetch(app: &App, request: PageRequest, tx: mpsc::Sender<Action>) -> AbortHandle {
    info!(
        "Spawning fetch: page={}, epoch={}",
        request.page, request.epoch
    );

    let fetcher = app.fetcher.clone();
    let timeout = app.request_timeout;

    let handle = tokio::spawn(async move {
        let started = Instant::now();
        let action = match tokio::time::timeout(timeout, fetcher.fetch(request.page)).await {
            Ok(Ok(page)) => {
                info!(
                    "Page {} fetched in {}ms: {} records",
                    request.page,
                    started.elapsed().as_millis(),
                    page.len()
                );
                Action::PageLoaded { request, page }
            }
            Ok(Err(error)) => {
                warn!("Page {} fetch failed: {}", request.page, error);
                Action::PageFailed { request, error }
            }
            Err(_) => {
                warn!(
                    "Page {} timed out after {}s",
                    request.page,
                    timeout.as_secs()
                );
                Action::PageFailed {
                    request,
                    error: FetchError::Timeout(timeout.as_secs()),
                }
            }
        };

        if tx.send(action).is_err() {
            warn!(
                "Failed to deliver page {} result: receiver dropped",
                request.page
            );
        }
    });

    handle.abort_handle()
}
