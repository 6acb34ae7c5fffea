//! Ranked whole-token search over the catalog.

mod rank;

pub use rank::{rank, SearchMatch};
