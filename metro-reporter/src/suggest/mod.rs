//! Station suggestion provider.
//!
//! Wraps the DaData metro suggestion API behind the [`SuggestionProvider`]
//! trait, with an in-memory implementation for offline use.

mod client;
mod error;
mod mock;
mod provider;
mod types;

pub use client::{SuggestClient, SuggestClientConfig};
pub use error::{ErrorKind, SuggestError};
pub use mock::StaticProvider;
pub use provider::SuggestionProvider;
pub use types::{
    LooseNumber, StationDataDto, SuggestQuery, SuggestRequestBody, SuggestResponse,
    SuggestionDto, parse_suggestions,
};
