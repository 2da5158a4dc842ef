//! # Load Controller
//!
//! Tracks what the pager is doing and what it should ask for next.
//!
//! ```text
//!            EndReached (Idle only)
//!   ┌──────┐ ─────────────────────▶ ┌─────────┐
//!   │ Idle │                        │ Loading │ ◀── Mount / Refresh (any state)
//!   └──────┘ ◀───────────────────── └─────────┘
//!      ▲        success, or failure      │
//!      │        under Skip               │ failure under Retry
//!      │                                 ▼
//!      │        Retry / Refresh     ┌─────────┐
//!      └──────── (via Loading) ──── │  Error  │
//!                                   └─────────┘
//! ```
//!
//! Every issued fetch carries a [`PageRequest`]. Only the request stored in
//! `in_flight` may complete the load; anything else is stale and dropped.
//! Since a new request is only issued from `Idle`/`Error` or by a refresh
//! that supersedes the old one, at most one request is ever current.

use serde::{Deserialize, Serialize};

use crate::directory::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Error,
}

/// What to do with the page counter when a fetch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stay on the failed page and wait for an explicit retry.
    #[default]
    Retry,
    /// Move past the failed page and go back to idle.
    Skip,
}

/// Identifies one issued fetch: the page asked for and the session it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub epoch: u64,
}

#[derive(Debug)]
pub struct LoadController {
    state: LoadState,
    next_page: u32,
    epoch: u64,
    in_flight: Option<PageRequest>,
    refreshing: bool,
    last_error: Option<FetchError>,
    policy: FailurePolicy,
}

impl LoadController {
    /// Starts in `Loading` with the full-screen spinner up; the first fetch
    /// is issued on mount.
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            state: LoadState::Loading,
            next_page: 1,
            epoch: 0,
            in_flight: None,
            refreshing: true,
            last_error: None,
            policy,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn in_flight(&self) -> Option<PageRequest> {
        self.in_flight
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Issues a request for the next page, unless one is already in flight.
    pub fn begin(&mut self) -> Option<PageRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let request = PageRequest {
            page: self.next_page,
            epoch: self.epoch,
        };
        self.state = LoadState::Loading;
        self.last_error = None;
        self.in_flight = Some(request);
        Some(request)
    }

    /// Starts a new session: page 1, new epoch, any in-flight request is
    /// forgotten so its response will be treated as stale.
    pub fn restart(&mut self) -> PageRequest {
        self.epoch += 1;
        self.next_page = 1;
        self.in_flight = None;
        self.refreshing = true;
        self.begin().unwrap_or(PageRequest {
            page: 1,
            epoch: self.epoch,
        })
    }

    /// True if `request` is the one this controller is waiting on.
    pub fn is_current(&self, request: PageRequest) -> bool {
        self.in_flight == Some(request)
    }

    /// Records a successful completion. Advances by exactly one page, no
    /// matter how many records came back.
    pub fn complete(&mut self, request: PageRequest) {
        self.next_page = request.page + 1;
        self.in_flight = None;
        self.refreshing = false;
        self.state = LoadState::Idle;
    }

    /// Records a failed completion according to the failure policy.
    pub fn fail(&mut self, request: PageRequest, error: FetchError) {
        self.in_flight = None;
        self.refreshing = false;
        match self.policy {
            FailurePolicy::Retry => {
                self.state = LoadState::Error;
            }
            FailurePolicy::Skip => {
                self.next_page = request.page + 1;
                self.state = LoadState::Idle;
            }
        }
        self.last_error = Some(error);
    }
}
