//! # Directory Source
//!
//! Everything that talks to the remote user directory. The core only sees
//! the `PageFetcher` trait and the domain types re-exported here.

pub mod fetcher;
pub mod providers;
pub mod types;

pub use fetcher::{FetchError, PageFetcher};
pub use providers::RandomUserFetcher;
pub use types::{
    Address, Page, PageInfo, PersonName, Picture, Record, RecordId, PLACEHOLDER_PICTURE,
    picture_or_placeholder,
};
