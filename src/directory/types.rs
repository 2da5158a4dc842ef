//! Domain types for directory entries.
//!
//! These are provider-agnostic: a fetcher translates its wire format into
//! `Record`/`Page` and nothing outside `directory::providers` sees JSON.

/// Shown when a record has no picture, or when there is no record at all.
pub const PLACEHOLDER_PICTURE: &str = "https://randomuser.me/api/portraits/med/men/75.jpg";

/// Opaque, stable identity of a directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, enough to tell rows apart in the list.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonName {
    pub title: String,
    pub first: String,
    pub last: String,
}

impl PersonName {
    /// "First Last", trimmed so a missing half doesn't leave a stray space.
    pub fn full(&self) -> String {
        format!("{} {}", self.first, self.last).trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Picture {
    pub thumbnail: String,
    pub medium: String,
    pub large: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Address {
    pub street_number: u32,
    pub street_name: String,
    pub city: String,
    pub state: String,
    /// Upstream sends numbers for some countries and strings for others.
    pub postcode: String,
    pub country: String,
    pub timezone_offset: String,
    pub timezone_description: String,
}

/// One directory entry. Never mutated after a fetcher builds it.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub name: PersonName,
    pub gender: String,
    pub age: u32,
    pub email: String,
    pub phone: String,
    pub cell: String,
    pub picture: Option<Picture>,
    pub address: Address,
    pub nationality: String,
}

impl Record {
    /// "First Last, 42" as shown in list rows and the detail header.
    pub fn headline(&self) -> String {
        format!("{}, {}", self.name.full(), self.age)
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.picture
            .as_ref()
            .map(|p| p.thumbnail.as_str())
            .filter(|url| !url.is_empty())
    }
}

/// The picture to show for an optional record, falling back to the placeholder.
pub fn picture_or_placeholder(record: Option<&Record>) -> &str {
    record
        .and_then(|r| r.picture.as_ref())
        .map(|p| p.medium.as_str())
        .filter(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_PICTURE)
}

/// Upstream's pagination echo. Informational only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageInfo {
    pub seed: String,
    pub results: u32,
    pub page: u32,
    pub version: String,
}

/// One fetched batch of records plus the page index that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub index: u32,
    pub records: Vec<Record>,
    pub info: Option<PageInfo>,
}

impl Page {
    pub fn new(index: u32, records: Vec<Record>) -> Self {
        Self {
            index,
            records,
            info: None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
