use crate::error::{CatalogError, Result};
use crate::record::{Catalog, CatalogRecord};
use async_trait::async_trait;
use serde::Deserialize;

/// Field delimiter used by the feed lines.
const DELIMITER: char = ',';

/// Trailing delimiter-separated fields on every line: external id, media
/// reference, info link. Everything left of them is the title.
const TRAILING_FIELDS: usize = 3;

/// One configured feed: a category label and the URL of its delimited-text
/// body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedSource {
    pub category: String,
    pub url: String,
}

/// Port for fetching raw feed text. Production uses [`HttpFeedFetcher`];
/// tests substitute an in-memory implementation.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Unauthenticated GET fetcher over a shared reqwest client.
pub struct HttpFeedFetcher {
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFeedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Parse one feed line into a record.
///
/// The title itself may contain the delimiter, so the trailing fields are
/// split off by scanning from the end of the line; whatever remains on the
/// left is the title. Lines that do not yield all fields, or whose fields are
/// empty after trimming, produce `None` and are dropped by the caller.
fn parse_line(category: &str, line: &str) -> Option<CatalogRecord> {
    let mut rest = line.trim();
    if rest.is_empty() {
        return None;
    }

    let mut trailing = [""; TRAILING_FIELDS];
    for slot in trailing.iter_mut() {
        let cut = rest.rfind(DELIMITER)?;
        *slot = rest[cut + DELIMITER.len_utf8()..].trim();
        rest = &rest[..cut];
    }
    // Scan order is right-to-left: info link, media reference, external id.
    let [info_link, media_ref, key] = trailing;
    let title = rest.trim();

    if title.is_empty() || key.is_empty() || media_ref.is_empty() || info_link.is_empty() {
        return None;
    }

    Some(CatalogRecord {
        category: category.to_string(),
        title: title.to_string(),
        key: key.to_string(),
        media_ref: media_ref.to_string(),
        info_link: info_link.to_string(),
    })
}

/// Parse a whole feed body, silently dropping lines that do not parse.
fn parse_feed(category: &str, body: &str) -> Vec<CatalogRecord> {
    body.lines()
        .filter_map(|line| parse_line(category, line))
        .collect()
}

/// Fetch and parse every source into a deduplicated catalog.
///
/// A source that fails to fetch is skipped and logged; a partial catalog is
/// acceptable and total failure across all sources yields an empty one.
/// Duplicate keys keep the first occurrence in source order.
pub async fn load(sources: &[FeedSource], fetcher: &dyn FeedFetcher) -> Catalog {
    let mut records = Vec::new();
    for source in sources {
        match fetcher.fetch(&source.url).await {
            Ok(body) => {
                let parsed = parse_feed(&source.category, &body);
                log::info!(
                    "feed {}: {} records from {}",
                    source.category,
                    parsed.len(),
                    source.url
                );
                records.extend(parsed);
            }
            Err(err) => {
                log::warn!("feed {} unavailable, skipping: {err}", source.category);
            }
        }
    }
    Catalog::from_records(records)
}
