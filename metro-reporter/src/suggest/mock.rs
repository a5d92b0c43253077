//! In-memory suggestion provider for offline use and tests.
//!
//! Serves stations from a fixed list, loaded either directly or from a
//! JSON file in the provider's own response format.

use std::path::Path;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::domain::StationCandidate;

use super::error::SuggestError;
use super::provider::SuggestionProvider;
use super::types::{SuggestQuery, parse_suggestions};

/// Provider that answers from a fixed station list.
///
/// Matching is a case-insensitive substring search over the station name,
/// with `ё` folded to `е`.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    stations: Arc<Vec<StationCandidate>>,
}

impl StaticProvider {
    /// Create a provider from a list of stations.
    pub fn new(stations: Vec<StationCandidate>) -> Self {
        Self {
            stations: Arc::new(stations),
        }
    }

    /// Load stations from a JSON file shaped like a provider response.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SuggestError> {
        let body = tokio::fs::read_to_string(path).await?;
        Ok(Self::new(parse_suggestions(&body)?))
    }

    /// Number of stations known to the provider.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations matching `query`, in list order, capped at `query.count`.
    pub fn lookup(&self, query: &SuggestQuery) -> Vec<StationCandidate> {
        let needle = fold(&query.query);
        self.stations
            .iter()
            .filter(|s| query.city.is_empty() || s.city.is_empty() || s.city == query.city)
            .filter(|s| fold(&s.name).contains(&needle))
            .take(query.count as usize)
            .cloned()
            .collect()
    }
}

impl SuggestionProvider for StaticProvider {
    fn suggest<'a>(
        &'a self,
        query: &'a SuggestQuery,
    ) -> BoxFuture<'a, Result<Vec<StationCandidate>, SuggestError>> {
        futures::future::ready(Ok(self.lookup(query))).boxed()
    }
}

fn fold(s: &str) -> String {
    s.trim().to_lowercase().replace('ё', "е")
}
