use crate::loader::{self, FeedFetcher, FeedSource};
use crate::record::Catalog;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Owns the load-once-then-share lifecycle of the catalog.
///
/// Concurrent first requests share a single in-flight load through the
/// `OnceCell`, so the feeds are fetched exactly once; later readers get the
/// same `Arc` without touching the network. A reader either sees no catalog
/// or a fully built one, never a partial write.
pub struct CatalogStore<F> {
    sources: Vec<FeedSource>,
    fetcher: F,
    cell: OnceCell<Arc<Catalog>>,
}

impl<F: FeedFetcher> CatalogStore<F> {
    pub fn new(sources: Vec<FeedSource>, fetcher: F) -> Self {
        Self {
            sources,
            fetcher,
            cell: OnceCell::new(),
        }
    }

    /// The shared catalog, loading it on first use.
    ///
    /// Only a non-empty catalog is pinned. When every source was down the
    /// caller gets an empty catalog for this request and the cell stays
    /// unset, so the next request retries the load instead of serving the
    /// outage forever.
    pub async fn get_or_load(&self) -> Arc<Catalog> {
        let loaded = self
            .cell
            .get_or_try_init(|| async {
                let catalog = loader::load(&self.sources, &self.fetcher).await;
                if catalog.is_empty() {
                    log::warn!("all feeds empty or unavailable, will retry on next request");
                    return Err(());
                }
                log::info!("catalog ready: {} records", catalog.len());
                Ok(Arc::new(catalog))
            })
            .await;
        match loaded {
            Ok(catalog) => catalog.clone(),
            Err(()) => Arc::new(Catalog::default()),
        }
    }

    /// Whether a catalog has been built, without triggering a load.
    pub fn loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts fetches so the single-flight guarantee is observable.
    struct CountingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FeedFetcher for CountingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Yield so concurrent first requests overlap.
            tokio::task::yield_now().await;
            Ok("Sholay,tt001,img,wiki\n".to_string())
        }
    }

    #[tokio::test]
    async fn concurrent_first_requests_share_one_load() {
        let store = Arc::new(CatalogStore::new(
            vec![FeedSource {
                category: "1950-1989".to_string(),
                url: "https://feeds.example/a.csv".to_string(),
            }],
            CountingFetcher {
                calls: AtomicUsize::new(0),
            },
        ));
        assert!(!store.loaded());

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.get_or_load().await })
            })
            .collect();

        let mut catalogs = Vec::new();
        for task in tasks {
            catalogs.push(task.await.expect("join"));
        }

        assert_eq!(store.fetcher.calls.load(Ordering::SeqCst), 1);
        assert!(store.loaded());
        for catalog in &catalogs {
            assert_eq!(catalog.len(), 1);
            assert!(Arc::ptr_eq(catalog, &catalogs[0]));
        }
    }

    /// Fails until `healthy` is flipped, like feeds during an outage.
    struct FlakyFetcher {
        healthy: std::sync::atomic::AtomicBool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FeedFetcher for FlakyFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.healthy.load(Ordering::SeqCst) {
                Ok("Sholay,tt001,img,wiki\n".to_string())
            } else {
                Err(crate::error::CatalogError::BadStatus {
                    url: url.to_string(),
                    status: 503,
                })
            }
        }
    }

    #[tokio::test]
    async fn empty_first_load_is_retried_not_pinned() {
        let store = CatalogStore::new(
            vec![FeedSource {
                category: "1950-1989".to_string(),
                url: "https://feeds.example/a.csv".to_string(),
            }],
            FlakyFetcher {
                healthy: std::sync::atomic::AtomicBool::new(false),
                calls: AtomicUsize::new(0),
            },
        );

        let during_outage = store.get_or_load().await;
        assert!(during_outage.is_empty());
        assert!(!store.loaded());

        store.fetcher.healthy.store(true, Ordering::SeqCst);
        let recovered = store.get_or_load().await;
        assert_eq!(recovered.len(), 1);
        assert!(store.loaded());
        assert_eq!(store.fetcher.calls.load(Ordering::SeqCst), 2);
    }
}
