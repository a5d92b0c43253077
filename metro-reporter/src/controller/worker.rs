//! Background tasks spawned by the controller.
//!
//! A worker owns one cancellation token. Every write to shared state goes
//! through [`Worker::commit`], which re-checks the token while holding the
//! state channel's lock, so a cancelled worker can never write.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::domain::{Coordinate, StationCandidate};
use crate::geo;
use crate::suggest::{ErrorKind, SuggestError, SuggestQuery, SuggestionProvider};

use super::cancel::CancellationToken;
use super::config::ControllerConfig;
use super::state::{QueryPhase, QueryRequest, SUGGESTIONS_ERROR, SuggestionState};

pub(super) struct Worker<P> {
    pub provider: Arc<P>,
    pub config: Arc<ControllerConfig>,
    pub state: Arc<watch::Sender<SuggestionState>>,
    pub token: CancellationToken,
}

impl<P: SuggestionProvider> Worker<P> {
    /// Apply `update` unless this worker has been cancelled.
    pub fn commit(&self, update: impl FnOnce(&mut SuggestionState)) -> bool {
        self.state.send_if_modified(|state| {
            if self.token.is_cancelled() {
                return false;
            }
            update(state);
            true
        })
    }

    /// One provider call, bounded by the request timeout and the token.
    async fn fetch(&self, query: &SuggestQuery) -> Result<Vec<StationCandidate>, SuggestError> {
        let deadline = self.config.request_timeout;
        let request = tokio::time::timeout(deadline, self.provider.suggest(query));

        match self.token.run_until_cancelled(request).await {
            None => Err(SuggestError::Cancelled),
            Some(Err(_)) => Err(SuggestError::Timeout(deadline)),
            Some(Ok(result)) => result,
        }
    }

    /// Debounce, then look up `request` and publish the ranked result.
    pub async fn run_query(self, request: QueryRequest) {
        let debounce = tokio::time::sleep(self.config.debounce);
        if self.token.run_until_cancelled(debounce).await.is_none() {
            trace!(seq = request.seq, "superseded while debouncing");
            return;
        }

        if !self.commit(|state| state.phase = QueryPhase::InFlight) {
            return;
        }

        let query = SuggestQuery::new(
            request.text.as_str(),
            self.config.city.as_str(),
            self.config.suggest_count,
        );

        match self.fetch(&query).await {
            Ok(stations) => {
                debug!(seq = request.seq, results = stations.len(), "suggestions resolved");
                self.commit(|state| {
                    state.suggestions = geo::rank(state.reference, stations);
                    state.phase = QueryPhase::Resolved;
                    state.loading = false;
                });
            }
            Err(e) => match e.kind() {
                ErrorKind::Cancellation => {
                    trace!(seq = request.seq, "superseded while in flight");
                }
                ErrorKind::Parse => {
                    warn!(seq = request.seq, error = %e, "unreadable suggestion payload");
                    self.commit(|state| {
                        state.suggestions.clear();
                        state.phase = QueryPhase::Resolved;
                        state.loading = false;
                    });
                }
                ErrorKind::Network => {
                    warn!(seq = request.seq, error = %e, "suggestion lookup failed");
                    self.commit(|state| {
                        state.suggestions.clear();
                        state.error = Some(SUGGESTIONS_ERROR.to_string());
                        state.phase = QueryPhase::Failed;
                        state.loading = false;
                    });
                }
            },
        }
    }

    /// Fetch a broad station list once and keep the closest few.
    ///
    /// Failures are logged only; the nearby list is a convenience.
    pub async fn run_nearby(self, reference: Coordinate) {
        let query = SuggestQuery::new(
            self.config.nearby_query.as_str(),
            self.config.city.as_str(),
            self.config.nearby_count,
        );

        match self.fetch(&query).await {
            Ok(stations) => {
                let closest = geo::nearest(reference, stations, self.config.nearby_limit);
                debug!(count = closest.len(), "nearby stations loaded");
                self.commit(|state| {
                    state.nearby = closest;
                    state.nearby_loaded = true;
                });
            }
            Err(SuggestError::Cancelled) => trace!("nearby load cancelled"),
            Err(e) => warn!(error = %e, "nearby stations unavailable"),
        }
    }
}
