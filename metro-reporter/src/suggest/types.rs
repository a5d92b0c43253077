//! Wire types for the DaData metro suggestion API.
//!
//! The provider is inconsistent about which fields it sends and whether
//! coordinates are numbers or strings, so every field is optional and
//! missing data turns into absent values rather than errors.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, StationCandidate};

use super::error::SuggestError;

/// One lookup against the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuggestQuery {
    /// Free text, already trimmed.
    pub query: String,
    /// City filter applied by the provider.
    pub city: String,
    /// Maximum number of suggestions to return.
    pub count: u32,
}

impl SuggestQuery {
    pub fn new(query: impl Into<String>, city: impl Into<String>, count: u32) -> Self {
        Self {
            query: query.into(),
            city: city.into(),
            count,
        }
    }
}

/// Request body: `{ query, filters: [{ city }], count }`.
#[derive(Debug, Serialize)]
pub struct SuggestRequestBody<'a> {
    pub query: &'a str,
    pub filters: Vec<CityFilter<'a>>,
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub struct CityFilter<'a> {
    pub city: &'a str,
}

impl<'a> From<&'a SuggestQuery> for SuggestRequestBody<'a> {
    fn from(q: &'a SuggestQuery) -> Self {
        Self {
            query: &q.query,
            filters: vec![CityFilter { city: &q.city }],
            count: q.count,
        }
    }
}

/// Top-level response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub suggestions: Option<Vec<SuggestionDto>>,
}

/// A single suggestion.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionDto {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub data: Option<StationDataDto>,
}

/// Station details attached to a suggestion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationDataDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub line_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub geo_lat: Option<LooseNumber>,
    #[serde(default)]
    pub geo_lon: Option<LooseNumber>,
    /// Line colour as bare hex, e.g. `D6083B`.
    #[serde(default)]
    pub color: Option<String>,
}

/// A number the provider may send either as JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// Numeric value; `None` for empty or unparseable text.
    pub fn value(&self) -> Option<f64> {
        match self {
            LooseNumber::Number(n) => Some(*n),
            LooseNumber::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    s.parse().ok()
                }
            }
        }
    }
}

impl SuggestionDto {
    /// Normalize into a station record.
    pub fn into_candidate(self) -> StationCandidate {
        let value = self.value.unwrap_or_default();
        let data = self.data.unwrap_or_default();

        let name = non_empty(data.name).unwrap_or(value);
        let lat = data.geo_lat.as_ref().and_then(LooseNumber::value);
        let lon = data.geo_lon.as_ref().and_then(LooseNumber::value);

        StationCandidate {
            name,
            line_name: data.line_name.unwrap_or_default(),
            city: data.city.unwrap_or_default(),
            coordinate: Coordinate::from_parts(lat, lon),
            line_color: non_empty(data.color).map(|hex| format!("#{hex}")),
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

/// Parse a provider response body into station candidates.
///
/// Returns `SuggestError::Json` only when the body is not a JSON object of
/// roughly the right shape; missing fields never fail.
pub fn parse_suggestions(body: &str) -> Result<Vec<StationCandidate>, SuggestError> {
    let response: SuggestResponse =
        serde_json::from_str(body).map_err(|e| SuggestError::Json {
            message: e.to_string(),
        })?;

    Ok(response
        .suggestions
        .unwrap_or_default()
        .into_iter()
        .map(SuggestionDto::into_candidate)
        .collect())
}
