//! In-memory movie catalog built from remote delimited-text feeds.
//!
//! The loader fetches each configured feed, parses its lines into records,
//! deduplicates by key and produces an immutable [`Catalog`]. A
//! [`CatalogStore`] owns the load-once-then-share lifecycle so concurrent
//! handlers never trigger redundant loads.

mod error;
mod loader;
mod record;
mod store;

pub use error::{CatalogError, Result};
pub use loader::{load, FeedFetcher, FeedSource, HttpFeedFetcher};
pub use record::{Catalog, CatalogRecord};
pub use store::CatalogStore;
