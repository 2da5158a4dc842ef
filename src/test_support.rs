//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::load::FailurePolicy;
use crate::core::state::App;
use crate::directory::{
    Address, FetchError, Page, PageFetcher, PersonName, Picture, Record, RecordId,
};

/// Builds a deterministic record. Same `n`, same record.
pub fn record(n: u32) -> Record {
    Record {
        id: RecordId(format!("{n:08}-0000-4000-8000-000000000000")),
        name: PersonName {
            title: "Mx".to_string(),
            first: format!("First{n}"),
            last: format!("Last{n}"),
        },
        gender: "female".to_string(),
        age: 30 + n,
        email: format!("person{n}@example.test"),
        phone: format!("555-{n:04}"),
        cell: format!("777-{n:04}"),
        picture: Some(Picture {
            thumbnail: format!("https://example.test/thumb/{n}.jpg"),
            medium: format!("https://example.test/med/{n}.jpg"),
            large: format!("https://example.test/large/{n}.jpg"),
        }),
        address: Address {
            street_number: n,
            street_name: "Main Street".to_string(),
            city: "Springfield".to_string(),
            state: "Oregon".to_string(),
            postcode: "97477".to_string(),
            country: "United States".to_string(),
            timezone_offset: "-8:00".to_string(),
            timezone_description: "Pacific Time".to_string(),
        },
        nationality: "US".to_string(),
    }
}

/// Builds page `index` with `size` records. Record ids encode the page, so
/// the same page always yields the same records.
pub fn page(index: u32, size: usize) -> Page {
    let records = (0..size as u32).map(|i| record(index * 1000 + i)).collect();
    Page::new(index, records)
}

/// A fetcher that serves canned results per page and counts calls.
/// Pages without a canned result come back empty.
pub struct StubFetcher {
    responses: HashMap<u32, Result<usize, FetchError>>,
    pub calls: AtomicUsize,
}

impl StubFetcher {
    pub fn empty() -> Self {
        Self {
            responses: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_page(mut self, index: u32, size: usize) -> Self {
        self.responses.insert(index, Ok(size));
        self
    }

    pub fn with_error(mut self, index: u32, error: FetchError) -> Self {
        self.responses.insert(index, Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch(&self, index: u32) -> Result<Page, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(&index) {
            Some(Ok(size)) => Ok(page(index, *size)),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(Page::new(index, Vec::new())),
        }
    }
}

/// Creates a test App with an empty StubFetcher and the default policy.
pub fn test_app() -> App {
    test_app_with_policy(FailurePolicy::default())
}

pub fn test_app_with_policy(policy: FailurePolicy) -> App {
    App::new(Arc::new(StubFetcher::empty()), policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_fetcher_serves_canned_pages() {
        let fetcher = StubFetcher::empty()
            .with_page(1, 3)
            .with_error(2, FetchError::Network("down".to_string()));

        let first = tokio_test::block_on(fetcher.fetch(1)).unwrap();
        assert_eq!(first.len(), 3);
        let second = tokio_test::block_on(fetcher.fetch(2));
        assert!(second.is_err());
        let third = tokio_test::block_on(fetcher.fetch(3)).unwrap();
        assert!(third.is_empty());
        assert_eq!(fetcher.call_count(), 3);
    }
}
