//! randomuser.me fetcher.
//!
//! One endpoint, three query parameters: `results` (page size), `seed`
//! (keeps pages stable across requests) and `page` (1-based). The request is
//! a pure function of the page index.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::core::config::ResolvedConfig;
use crate::directory::{
    Address, FetchError, Page, PageFetcher, PageInfo, PersonName, Picture, Record, RecordId,
};

// ============================================================================
// randomuser.me Wire Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct DirectoryResponse {
    #[serde(default)]
    results: Option<Vec<WireUser>>,
    #[serde(default)]
    info: Option<WireInfo>,
    /// Upstream reports failures as `{"error": "..."}`, sometimes with a 200.
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct WireInfo {
    seed: String,
    results: u32,
    page: u32,
    version: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct WireUser {
    gender: String,
    name: WireName,
    location: WireLocation,
    email: String,
    login: WireLogin,
    dob: WireDob,
    phone: String,
    cell: String,
    picture: Option<WirePicture>,
    nat: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct WireName {
    title: String,
    first: String,
    last: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct WireLocation {
    street: WireStreet,
    city: String,
    state: String,
    country: String,
    postcode: Postcode,
    timezone: WireTimezone,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct WireStreet {
    number: u32,
    name: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct WireTimezone {
    offset: String,
    description: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct WireLogin {
    uuid: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct WireDob {
    age: u32,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct WirePicture {
    large: String,
    medium: String,
    thumbnail: String,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Postcode {
    Number(i64),
    Text(String),
}

impl Default for Postcode {
    fn default() -> Self {
        Postcode::Text(String::new())
    }
}

// ============================================================================
// Translation Layer
// ============================================================================

impl From<Postcode> for String {
    fn from(postcode: Postcode) -> Self {
        match postcode {
            Postcode::Number(n) => n.to_string(),
            Postcode::Text(s) => s,
        }
    }
}

impl From<WireUser> for Record {
    fn from(user: WireUser) -> Self {
        // A handful of upstream entries lack a login block; email is the next
        // most stable key.
        let id = if user.login.uuid.is_empty() {
            user.email.clone()
        } else {
            user.login.uuid
        };

        Record {
            id: RecordId(id),
            name: PersonName {
                title: user.name.title,
                first: user.name.first,
                last: user.name.last,
            },
            gender: user.gender,
            age: user.dob.age,
            email: user.email,
            phone: user.phone,
            cell: user.cell,
            picture: user.picture.map(|p| Picture {
                thumbnail: p.thumbnail,
                medium: p.medium,
                large: p.large,
            }),
            address: Address {
                street_number: user.location.street.number,
                street_name: user.location.street.name,
                city: user.location.city,
                state: user.location.state,
                postcode: user.location.postcode.into(),
                country: user.location.country,
                timezone_offset: user.location.timezone.offset,
                timezone_description: user.location.timezone.description,
            },
            nationality: user.nat,
        }
    }
}

/// Converts a decoded body into a `Page`, surfacing upstream error objects.
fn into_page(index: u32, status: u16, response: DirectoryResponse) -> Result<Page, FetchError> {
    if let Some(message) = response.error {
        return Err(FetchError::Api { status, message });
    }

    let results = response
        .results
        .ok_or_else(|| FetchError::Decode("response has no `results` array".to_string()))?;

    Ok(Page {
        index,
        records: results.into_iter().map(Record::from).collect(),
        info: response.info.map(|info| PageInfo {
            seed: info.seed,
            results: info.results,
            page: info.page,
            version: info.version,
        }),
    })
}

// ============================================================================
// Fetcher Implementation
// ============================================================================

pub struct RandomUserFetcher {
    base_url: String,
    seed: String,
    results_per_page: u32,
    timeout: Duration,
    client: reqwest::Client,
}

impl RandomUserFetcher {
    pub fn new(base_url: String, seed: String, results_per_page: u32, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            base_url,
            seed,
            results_per_page,
            timeout,
            client,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.seed.clone(),
            config.results_per_page,
            config.request_timeout,
        )
    }

    /// Query parameters for `page`. Depends on nothing but the page index.
    pub fn query(&self, page: u32) -> [(&'static str, String); 3] {
        [
            ("results", self.results_per_page.to_string()),
            ("seed", self.seed.clone()),
            ("page", page.to_string()),
        ]
    }

    fn transport_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout.as_secs())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl PageFetcher for RandomUserFetcher {
    fn name(&self) -> &str {
        "randomuser"
    }

    async fn fetch(&self, page: u32) -> Result<Page, FetchError> {
        if page == 0 {
            return Err(FetchError::InvalidPage(page));
        }

        info!(
            "randomuser request: page={}, results={}, seed={}",
            page, self.results_per_page, self.seed
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query(page))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!("randomuser response status: {}", status);

        if !status.is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("randomuser API error: {} - {}", status.as_u16(), err_body);
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: err_body,
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        debug!("randomuser body: {} bytes", body.len());

        let decoded: DirectoryResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        let page = into_page(page, status.as_u16(), decoded)?;

        info!("randomuser page {} decoded: {} records", page.index, page.len());
        Ok(page)
    }
}
