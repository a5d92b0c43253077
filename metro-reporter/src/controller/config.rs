//! Suggestion controller configuration.

use std::time::Duration;

/// Tuning for the suggestion pipeline.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Quiet period after the last keystroke before a lookup is sent.
    pub debounce: Duration,

    /// City filter sent with every lookup.
    pub city: String,

    /// Result cap for interactive lookups.
    pub suggest_count: u32,

    /// Upper bound on a single provider call.
    pub request_timeout: Duration,

    /// Broad query used to fetch stations for the nearby list.
    pub nearby_query: String,

    /// Result cap for the nearby fetch.
    pub nearby_count: u32,

    /// How many nearby stations to keep.
    pub nearby_limit: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(350),
            city: "Москва".to_string(),
            suggest_count: 12,
            request_timeout: Duration::from_secs(10),
            nearby_query: "а".to_string(),
            nearby_count: 50,
            nearby_limit: 6,
        }
    }
}

impl ControllerConfig {
    /// Set the debounce delay.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the per-request deadline.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the city filter.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }
}
