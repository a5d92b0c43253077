//! The seam between the suggestion controller and whatever answers queries.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::domain::StationCandidate;

use super::error::SuggestError;
use super::types::SuggestQuery;

/// Something that turns a text query into station candidates.
///
/// Implementations must be cheap to call concurrently; the controller may
/// drop the returned future at any point when a query is superseded.
pub trait SuggestionProvider: Send + Sync {
    fn suggest<'a>(
        &'a self,
        query: &'a SuggestQuery,
    ) -> BoxFuture<'a, Result<Vec<StationCandidate>, SuggestError>>;
}

impl<P: SuggestionProvider + ?Sized> SuggestionProvider for Arc<P> {
    fn suggest<'a>(
        &'a self,
        query: &'a SuggestQuery,
    ) -> BoxFuture<'a, Result<Vec<StationCandidate>, SuggestError>> {
        (**self).suggest(query)
    }
}

impl<P: SuggestionProvider + ?Sized> SuggestionProvider for Box<P> {
    fn suggest<'a>(
        &'a self,
        query: &'a SuggestQuery,
    ) -> BoxFuture<'a, Result<Vec<StationCandidate>, SuggestError>> {
        (**self).suggest(query)
    }
}
