//! Debounced, cancelable station suggestions.
//!
//! The controller turns raw keystrokes into at most one live provider
//! request at a time. Each piece of background work gets its own
//! [`CancellationToken`]; starting new work cancels the previous token
//! synchronously, before anything else happens, and workers re-check their
//! token under the state lock before writing. A superseded request can
//! therefore never overwrite newer state, whatever order responses arrive
//! in.
//!
//! State is published through a `tokio::sync::watch` channel. The
//! presentation layer subscribes and re-renders on every change.

mod cancel;
mod config;
mod state;
mod worker;


use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::domain::{Coordinate, RankedStation};
use crate::suggest::SuggestionProvider;

pub use cancel::CancellationToken;
pub use config::ControllerConfig;
pub use state::{QueryPhase, QueryRequest, SUGGESTIONS_ERROR, SuggestionState};

use worker::Worker;

/// Station suggestion pipeline for one query box.
///
/// Must be used from within a tokio runtime: lookups run on spawned tasks.
/// Dropping the controller cancels all outstanding work.
pub struct SuggestionController<P> {
    provider: Arc<P>,
    config: Arc<ControllerConfig>,
    state: Arc<watch::Sender<SuggestionState>>,
    query: Option<CancellationToken>,
    nearby: Option<CancellationToken>,
    seq: u64,
}

impl<P: SuggestionProvider + 'static> SuggestionController<P> {
    /// Create a controller in the `Idle` state.
    pub fn new(provider: P, config: ControllerConfig) -> Self {
        let (state, _) = watch::channel(SuggestionState::default());
        Self {
            provider: Arc::new(provider),
            config: Arc::new(config),
            state: Arc::new(state),
            query: None,
            nearby: None,
            seq: 0,
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SuggestionState> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn snapshot(&self) -> SuggestionState {
        self.state.borrow().clone()
    }

    /// React to the query box changing.
    ///
    /// Blank text clears everything without touching the provider. Anything
    /// else cancels the previous lookup and restarts the debounce.
    pub fn on_input_change(&mut self, text: &str) {
        self.cancel_query();
        let trimmed = text.trim().to_string();

        if trimmed.is_empty() {
            self.state.send_modify(|state| {
                state.query = text.to_string();
                state.selected = None;
                state.phase = QueryPhase::Idle;
                state.suggestions.clear();
                state.error = None;
                state.loading = false;
                state.panel_open = false;
            });
            return;
        }

        self.state.send_modify(|state| {
            state.query = text.to_string();
            state.selected = None;
        });
        self.start_query(trimmed);
    }

    /// Choose a station from the suggestion or nearby list.
    ///
    /// The query box shows the station's label afterwards and the panel
    /// closes; no new lookup is started.
    pub fn select(&mut self, station: RankedStation) {
        self.cancel_query();
        debug!(station = %station.name(), "station selected");

        self.state.send_modify(|state| {
            mark_canceled(state);
            state.query = station.display_label();
            state.selected = Some(station);
            state.panel_open = false;
        });
    }

    /// Update the user's position.
    ///
    /// An open query is looked up again so its ranking reflects the new
    /// origin, and the nearby list is fetched if it has not loaded yet.
    /// Reporting the same position again only retries the nearby list.
    pub fn set_reference(&mut self, reference: Option<Coordinate>) {
        let changed = self.state.send_if_modified(|state| {
            if state.reference == reference {
                return false;
            }
            state.reference = reference;
            true
        });
        if !changed {
            let loaded = self.state.borrow().nearby_loaded;
            if !loaded {
                self.load_nearby();
            }
            return;
        }

        let (panel_open, query) = {
            let state = self.state.borrow();
            (state.panel_open, state.query.trim().to_string())
        };
        if panel_open && !query.is_empty() {
            self.cancel_query();
            self.start_query(query);
        }

        self.load_nearby();
    }

    /// Clear the query and selection, keeping the position and nearby list.
    pub fn reset(&mut self) {
        self.cancel_query();
        self.state.send_modify(|state| {
            state.phase = QueryPhase::Idle;
            state.query.clear();
            state.suggestions.clear();
            state.loading = false;
            state.error = None;
            state.panel_open = false;
            state.selected = None;
        });
    }

    /// Stop all background work. Results still in flight are discarded.
    pub fn abandon(&mut self) {
        self.cancel_query();
        if let Some(token) = self.nearby.take() {
            token.cancel();
        }
        self.state.send_if_modified(mark_canceled);
    }

    fn worker(&self, token: CancellationToken) -> Worker<P> {
        Worker {
            provider: Arc::clone(&self.provider),
            config: Arc::clone(&self.config),
            state: Arc::clone(&self.state),
            token,
        }
    }

    fn start_query(&mut self, text: String) {
        self.state.send_modify(|state| {
            state.phase = QueryPhase::Debouncing;
            state.loading = true;
            state.error = None;
            state.panel_open = true;
        });

        self.seq += 1;
        let request = QueryRequest {
            text,
            seq: self.seq,
        };
        debug!(seq = request.seq, query = %request.text, "query scheduled");

        let token = CancellationToken::new();
        tokio::spawn(self.worker(token.clone()).run_query(request));
        self.query = Some(token);
    }

    fn cancel_query(&mut self) {
        if let Some(token) = self.query.take() {
            token.cancel();
        }
    }

    /// Start the one-shot nearby load, restarting it if the position moved
    /// while an earlier attempt was still running.
    fn load_nearby(&mut self) {
        if let Some(token) = self.nearby.take() {
            token.cancel();
        }

        let (reference, loaded) = {
            let state = self.state.borrow();
            (state.reference, state.nearby_loaded)
        };
        let Some(reference) = reference else {
            return;
        };
        if loaded {
            return;
        }

        let token = CancellationToken::new();
        tokio::spawn(self.worker(token.clone()).run_nearby(reference));
        self.nearby = Some(token);
    }
}

impl<P> Drop for SuggestionController<P> {
    fn drop(&mut self) {
        for token in [self.query.take(), self.nearby.take()].into_iter().flatten() {
            token.cancel();
        }
    }
}

/// Move an unsettled query to `Canceled`. Returns whether anything changed.
fn mark_canceled(state: &mut SuggestionState) -> bool {
    match state.phase {
        QueryPhase::Debouncing | QueryPhase::InFlight => {
            state.phase = QueryPhase::Canceled;
            state.loading = false;
            true
        }
        _ => false,
    }
}
