//! Caching layer for suggestion provider responses.
//!
//! Typing and then deleting characters repeats earlier queries within
//! seconds, so successful lookups are kept for a short TTL. Failed
//! lookups are never cached.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::StationCandidate;
use crate::suggest::{SuggestError, SuggestQuery, SuggestionProvider};

/// Cache key: (normalized query text, city, result cap).
type QueryKey = (String, String, u32);

/// Cached lookup result.
type QueryEntry = Arc<Vec<StationCandidate>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 500,
        }
    }
}

/// Suggestion provider with caching.
///
/// Wraps any [`SuggestionProvider`] and caches successful responses.
pub struct CachedProvider<P> {
    inner: P,
    entries: MokaCache<QueryKey, QueryEntry>,
}

impl<P: SuggestionProvider> CachedProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, entries }
    }

    fn key(query: &SuggestQuery) -> QueryKey {
        (
            query.query.trim().to_lowercase(),
            query.city.clone(),
            query.count,
        )
    }

    /// Look up suggestions, using the cache if available.
    pub async fn lookup(
        &self,
        query: &SuggestQuery,
    ) -> Result<Vec<StationCandidate>, SuggestError> {
        let key = Self::key(query);

        if let Some(cached) = self.entries.get(&key).await {
            trace!(query = %query.query, "suggestion cache hit");
            return Ok(cached.as_ref().clone());
        }

        let stations = self.inner.suggest(query).await?;
        self.entries.insert(key, Arc::new(stations.clone())).await;

        Ok(stations)
    }

    /// Access the wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: SuggestionProvider> SuggestionProvider for CachedProvider<P> {
    fn suggest<'a>(
        &'a self,
        query: &'a SuggestQuery,
    ) -> BoxFuture<'a, Result<Vec<StationCandidate>, SuggestError>> {
        self.lookup(query).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and fails queries starting with "!".
    struct Counting {
        calls: AtomicUsize,
    }

    impl SuggestionProvider for Counting {
        fn suggest<'a>(
            &'a self,
            query: &'a SuggestQuery,
        ) -> BoxFuture<'a, Result<Vec<StationCandidate>, SuggestError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = if query.query.starts_with('!') {
                Err(SuggestError::Api {
                    status: 500,
                    message: String::new(),
                })
            } else {
                Ok(vec![StationCandidate::named(query.query.clone())])
            };
            futures::future::ready(result).boxed()
        }
    }

    fn cached() -> CachedProvider<Counting> {
        CachedProvider::new(
            Counting {
                calls: AtomicUsize::new(0),
            },
            &CacheConfig::default(),
        )
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 500);
    }

    #[tokio::test]
    async fn repeated_query_hits_cache() {
        let provider = cached();
        let q = SuggestQuery::new("Арб", "Москва", 12);

        let first = provider.suggest(&q).await.unwrap();
        let second = provider
            .suggest(&SuggestQuery::new("арб ", "Москва", 12))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn different_count_misses_cache() {
        let provider = cached();
        provider
            .suggest(&SuggestQuery::new("а", "Москва", 12))
            .await
            .unwrap();
        provider
            .suggest(&SuggestQuery::new("а", "Москва", 50))
            .await
            .unwrap();

        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let provider = cached();
        let q = SuggestQuery::new("!boom", "Москва", 12);

        assert!(provider.suggest(&q).await.is_err());
        assert!(provider.suggest(&q).await.is_err());

        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 2);
    }
}
