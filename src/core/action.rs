//! # Actions
//!
//! Everything that can happen in Roster becomes an `Action`.
//! User scrolls to the last row? That's `Action::EndReached`.
//! A page arrives? That's `Action::PageLoaded { request, page }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates it, and returns an `Effect` describing the I/O the caller should
//! perform. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::load::{FailurePolicy, LoadState, PageRequest};
use crate::core::state::App;
use crate::directory::{FetchError, Page};

#[derive(Debug)]
pub enum Action {
    /// The list screen came up for the first time.
    Mount,
    /// The user reached the bottom of the list.
    EndReached,
    /// Drop everything and start again from page 1.
    Refresh,
    /// Re-request the page that failed.
    Retry,
    PageLoaded { request: PageRequest, page: Page },
    PageFailed { request: PageRequest, error: FetchError },
    Quit,
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Spawn a fetch for this request, superseding any running one.
    Fetch(PageRequest),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Mount => match app.load.begin() {
            Some(request) => {
                info!("Initial load of page {}", request.page);
                Effect::Fetch(request)
            }
            None => Effect::None,
        },
        Action::EndReached => match app.load.state() {
            LoadState::Idle => match app.load.begin() {
                Some(request) => {
                    app.status_message = format!("Loading page {}...", request.page);
                    Effect::Fetch(request)
                }
                None => Effect::None,
            },
            LoadState::Loading => {
                debug!("End reached while loading, ignoring");
                Effect::None
            }
            LoadState::Error => {
                debug!("End reached in error state, waiting for retry");
                Effect::None
            }
        },
        Action::Refresh => {
            app.feed.reset();
            let request = app.load.restart();
            info!("Refresh: new session epoch={}", request.epoch);
            app.status_message = String::from("Refreshing...");
            Effect::Fetch(request)
        }
        Action::Retry => {
            if app.load.state() != LoadState::Error {
                return Effect::None;
            }
            match app.load.begin() {
                Some(request) => {
                    info!("Retrying page {}", request.page);
                    app.status_message = format!("Retrying page {}...", request.page);
                    Effect::Fetch(request)
                }
                None => Effect::None,
            }
        }
        Action::PageLoaded { request, page } => {
            if !app.load.is_current(request) {
                debug!(
                    "Dropping stale page {} (epoch {}, current epoch {})",
                    request.page,
                    request.epoch,
                    app.load.epoch()
                );
                return Effect::None;
            }
            let count = page.len();
            app.feed.append(page);
            app.load.complete(request);
            app.status_message = format!(
                "{} people, page {} (+{})",
                app.feed.len(),
                request.page,
                count
            );
            Effect::None
        }
        Action::PageFailed { request, error } => {
            if !app.load.is_current(request) {
                debug!(
                    "Dropping stale failure for page {} (epoch {}): {}",
                    request.page, request.epoch, error
                );
                return Effect::None;
            }
            warn!("Page {} failed: {}", request.page, error);
            app.status_message = match app.load.policy() {
                FailurePolicy::Retry => format!("Page {} failed: {}", request.page, error),
                FailurePolicy::Skip => format!("Skipped page {}: {}", request.page, error),
            };
            app.load.fail(request, error);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::load::FailurePolicy;
    use crate::test_support::{page, test_app, test_app_with_policy};

    /// Drives a fetch effect to a successful completion with `size` records.
    fn deliver(app: &mut App, effect: Effect, size: usize) -> Effect {
        let Effect::Fetch(request) = effect else {
            panic!("expected a fetch effect, got {:?}", effect);
        };
        update(
            app,
            Action::PageLoaded {
                request,
                page: page(request.page, size),
            },
        )
    }

    #[test]
    fn test_mount_issues_page_one() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Mount);
        assert_eq!(effect, Effect::Fetch(PageRequest { page: 1, epoch: 0 }));
        assert!(app.is_loading());
    }

    #[test]
    fn test_second_mount_is_noop() {
        let mut app = test_app();
        update(&mut app, Action::Mount);
        assert_eq!(update(&mut app, Action::Mount), Effect::None);
    }

    #[test]
    fn test_two_pages_of_ten() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Mount);
        deliver(&mut app, effect, 10);
        assert!(!app.is_refreshing());

        let effect = update(&mut app, Action::EndReached);
        assert_eq!(effect, Effect::Fetch(PageRequest { page: 2, epoch: 0 }));
        deliver(&mut app, effect, 10);

        assert_eq!(app.feed.len(), 20);
        assert_eq!(app.load.next_page(), 3);
        assert_eq!(app.load.state(), LoadState::Idle);
        let first_of_page_two = &app.feed.snapshot()[10];
        assert_eq!(first_of_page_two, &page(2, 1).records[0]);
    }

    #[test]
    fn test_end_reached_twice_fetches_once() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Mount);
        deliver(&mut app, effect, 10);

        let first = update(&mut app, Action::EndReached);
        let second = update(&mut app, Action::EndReached);
        assert!(matches!(first, Effect::Fetch(_)));
        assert_eq!(second, Effect::None);
    }

    #[test]
    fn test_end_reached_during_initial_load_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::Mount);
        assert_eq!(update(&mut app, Action::EndReached), Effect::None);
    }

    #[test]
    fn test_sum_of_pages() {
        let mut app = test_app();
        let sizes = [10, 4, 0, 10, 1];
        let mut effect = update(&mut app, Action::Mount);
        for size in sizes {
            deliver(&mut app, effect, size);
            effect = update(&mut app, Action::EndReached);
        }
        assert_eq!(app.feed.len(), sizes.iter().sum::<usize>());
        assert_eq!(app.load.next_page(), sizes.len() as u32 + 1);
    }

    #[test]
    fn test_empty_page_still_advances() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Mount);
        deliver(&mut app, effect, 10);

        let effect = update(&mut app, Action::EndReached);
        deliver(&mut app, effect, 0);

        assert_eq!(app.feed.len(), 10);
        assert_eq!(app.load.next_page(), 3);
        assert_eq!(app.load.state(), LoadState::Idle);
    }

    #[test]
    fn test_failure_leaves_feed_unchanged_and_stops_loading() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Mount);
        deliver(&mut app, effect, 10);

        let Effect::Fetch(request) = update(&mut app, Action::EndReached) else {
            panic!("expected fetch");
        };
        update(
            &mut app,
            Action::PageFailed {
                request,
                error: FetchError::Network("reset".to_string()),
            },
        );

        assert_eq!(app.feed.len(), 10);
        assert!(!app.is_loading());
        assert_eq!(app.load.state(), LoadState::Error);
        assert!(app.status_message.contains("Page 2 failed"));
    }

    #[test]
    fn test_retry_requests_same_page() {
        let mut app = test_app();
        let Effect::Fetch(request) = update(&mut app, Action::Mount) else {
            panic!("expected fetch");
        };
        update(
            &mut app,
            Action::PageFailed {
                request,
                error: FetchError::Timeout(10),
            },
        );

        // Scrolling doesn't retry on its own
        assert_eq!(update(&mut app, Action::EndReached), Effect::None);

        let retry = update(&mut app, Action::Retry);
        assert_eq!(retry, Effect::Fetch(PageRequest { page: 1, epoch: 0 }));
        assert!(app.load.error().is_none());
    }

    #[test]
    fn test_retry_outside_error_is_noop() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Mount);
        deliver(&mut app, effect, 10);
        assert_eq!(update(&mut app, Action::Retry), Effect::None);
    }

    #[test]
    fn test_skip_policy_moves_past_failed_page() {
        let mut app = test_app_with_policy(FailurePolicy::Skip);
        let Effect::Fetch(request) = update(&mut app, Action::Mount) else {
            panic!("expected fetch");
        };
        update(
            &mut app,
            Action::PageFailed {
                request,
                error: FetchError::Decode("bad json".to_string()),
            },
        );
        assert_eq!(app.load.state(), LoadState::Idle);
        assert!(app.status_message.starts_with("Skipped page 1"));

        let next = update(&mut app, Action::EndReached);
        assert_eq!(next, Effect::Fetch(PageRequest { page: 2, epoch: 0 }));
    }

    #[test]
    fn test_refresh_discards_late_page() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Mount);
        deliver(&mut app, effect, 10);
        let Effect::Fetch(page_two) = update(&mut app, Action::EndReached) else {
            panic!("expected fetch");
        };
        // Page two is still in flight when the user refreshes
        app.feed.append(page(99, 5));
        assert_eq!(app.feed.len(), 15);

        let refresh = update(&mut app, Action::Refresh);
        assert!(app.feed.is_empty());
        assert!(app.is_refreshing());
        assert_eq!(refresh, Effect::Fetch(PageRequest { page: 1, epoch: 1 }));

        // The old page-2 response lands after the reset
        update(
            &mut app,
            Action::PageLoaded {
                request: page_two,
                page: page(2, 10),
            },
        );
        assert!(app.feed.is_empty());
        assert!(app.is_loading());

        deliver(&mut app, refresh, 10);
        assert_eq!(app.feed.len(), 10);
        assert_eq!(app.feed.snapshot()[0], page(1, 1).records[0]);
        assert_eq!(app.load.next_page(), 2);
        assert!(!app.is_refreshing());
    }

    #[test]
    fn test_refresh_discards_late_failure() {
        let mut app = test_app();
        let Effect::Fetch(stale) = update(&mut app, Action::Mount) else {
            panic!("expected fetch");
        };
        update(&mut app, Action::Refresh);
        update(
            &mut app,
            Action::PageFailed {
                request: stale,
                error: FetchError::Network("late".to_string()),
            },
        );
        assert!(app.is_loading());
        assert!(app.load.error().is_none());
    }

    #[test]
    fn test_refresh_recovers_from_error() {
        let mut app = test_app();
        let Effect::Fetch(request) = update(&mut app, Action::Mount) else {
            panic!("expected fetch");
        };
        update(
            &mut app,
            Action::PageFailed {
                request,
                error: FetchError::Network("down".to_string()),
            },
        );
        let effect = update(&mut app, Action::Refresh);
        assert_eq!(effect, Effect::Fetch(PageRequest { page: 1, epoch: 1 }));
        assert_eq!(app.load.state(), LoadState::Loading);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
