//! Domain types for the defect reporter.
//!
//! Types here are plain data validated at construction time, so code that
//! receives them can trust their invariants.

mod category;
mod coordinate;
mod station;

pub use category::{Category, UnknownCategory};
pub use coordinate::Coordinate;
pub use station::{RankedStation, StationCandidate, format_distance};
