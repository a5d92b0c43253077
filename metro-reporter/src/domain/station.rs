//! Metro station records.

use std::fmt;

use super::Coordinate;

/// A metro station as returned by the suggestion provider.
///
/// Built once from a provider payload and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StationCandidate {
    pub name: String,
    /// Line name, empty when the provider did not report one.
    pub line_name: String,
    pub city: String,
    pub coordinate: Option<Coordinate>,
    /// CSS-style colour, e.g. `#D6083B`.
    pub line_color: Option<String>,
}

impl StationCandidate {
    /// Create a candidate with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line_name: String::new(),
            city: String::new(),
            coordinate: None,
            line_color: None,
        }
    }

    /// Set the line name.
    pub fn with_line(mut self, line_name: impl Into<String>) -> Self {
        self.line_name = line_name.into();
        self
    }

    /// Set the coordinate. Non-finite values leave it absent.
    pub fn with_coordinate(mut self, lat: f64, lon: f64) -> Self {
        self.coordinate = Coordinate::new(lat, lon);
        self
    }

    /// Set the line colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.line_color = Some(color.into());
        self
    }

    /// Text shown in the query box once the station is chosen:
    /// `name — line` when a line is known, otherwise just `name`.
    pub fn display_label(&self) -> String {
        if self.line_name.is_empty() {
            self.name.clone()
        } else {
            format!("{} — {}", self.name, self.line_name)
        }
    }
}

/// A station together with its distance from the reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation {
    pub station: StationCandidate,
    /// Present only when both the reference and the station have coordinates.
    pub distance_km: Option<f64>,
}

impl RankedStation {
    pub fn name(&self) -> &str {
        &self.station.name
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.station.coordinate
    }

    pub fn display_label(&self) -> String {
        self.station.display_label()
    }
}

impl fmt::Display for RankedStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.station.display_label())?;
        if let Some(km) = self.distance_km {
            write!(f, " ({})", format_distance(km))?;
        }
        Ok(())
    }
}

/// Human-readable distance: metres below one kilometre, otherwise km
/// with one decimal.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} м", (km * 1000.0).round() as i64)
    } else {
        format!("{:.1} км", km)
    }
}
