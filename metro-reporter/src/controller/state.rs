//! Published suggestion state.

use crate::domain::{Coordinate, RankedStation};

/// Message shown when an autocomplete lookup fails.
pub const SUGGESTIONS_ERROR: &str = "Ошибка при загрузке станций метро";

/// Where the current query is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryPhase {
    /// No query text.
    #[default]
    Idle,
    /// Waiting for typing to pause.
    Debouncing,
    /// Request sent, waiting for the provider.
    InFlight,
    Resolved,
    Failed,
    /// Abandoned before it settled.
    Canceled,
}

/// A query as issued to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Trimmed query text.
    pub text: String,
    /// Issue order; a higher number supersedes every lower one.
    pub seq: u64,
}

/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionState {
    pub phase: QueryPhase,
    /// Raw text in the query box.
    pub query: String,
    pub suggestions: Vec<RankedStation>,
    pub loading: bool,
    pub error: Option<String>,
    pub panel_open: bool,
    pub selected: Option<RankedStation>,
    /// Shortcut list of stations closest to the user.
    pub nearby: Vec<RankedStation>,
    pub nearby_loaded: bool,
    /// The user's position, once known.
    pub reference: Option<Coordinate>,
}
