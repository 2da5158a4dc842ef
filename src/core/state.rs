//! # Application State
//!
//! Core business state for Roster. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── fetcher: Arc<dyn PageFetcher>   // remote directory
//! ├── feed: Feed                      // records fetched this session
//! ├── load: LoadController            // idle/loading/error + page counter
//! ├── request_timeout: Duration       // upper bound on one fetch
//! └── status_message: String          // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;
use std::time::Duration;

use crate::core::config::ResolvedConfig;
use crate::core::feed::Feed;
use crate::core::load::{FailurePolicy, LoadController};
use crate::directory::PageFetcher;

pub struct App {
    pub fetcher: Arc<dyn PageFetcher>,
    pub feed: Feed,
    pub load: LoadController,
    pub request_timeout: Duration,
    pub status_message: String,
}

impl App {
    pub fn new(fetcher: Arc<dyn PageFetcher>, policy: FailurePolicy) -> Self {
        Self {
            fetcher,
            feed: Feed::new(),
            load: LoadController::new(policy),
            request_timeout: Duration::from_secs(crate::core::config::DEFAULT_REQUEST_TIMEOUT_SECS),
            status_message: String::from("Loading directory..."),
        }
    }

    pub fn from_config(fetcher: Arc<dyn PageFetcher>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(fetcher, config.failure_policy);
        app.request_timeout = config.request_timeout;
        app
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_loading()
    }

    pub fn is_refreshing(&self) -> bool {
        self.load.is_refreshing()
    }
}
