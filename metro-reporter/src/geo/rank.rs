//! Station ranking by distance from a reference point.

use std::cmp::Ordering;

use crate::domain::{Coordinate, RankedStation, StationCandidate};

use super::collate;
use super::distance::distance_km;

/// Rank candidates by distance from `reference`.
///
/// Candidates are ordered by:
/// 1. Distance, nearest first; stations without a distance go last
/// 2. Station name, Russian collation
///
/// The sort is stable, so candidates that tie on both keep their input
/// order. Output length always equals input length.
pub fn rank(
    reference: Option<Coordinate>,
    candidates: Vec<StationCandidate>,
) -> Vec<RankedStation> {
    let mut ranked: Vec<RankedStation> = candidates
        .into_iter()
        .map(|station| {
            let distance_km = match (reference, station.coordinate) {
                (Some(origin), Some(at)) => Some(distance_km(origin, at)),
                _ => None,
            };
            RankedStation {
                station,
                distance_km,
            }
        })
        .collect();

    ranked.sort_by(compare_ranked);
    ranked
}

/// The `k` nearest candidates that have coordinates, nearest first.
pub fn nearest(
    reference: Coordinate,
    candidates: Vec<StationCandidate>,
    k: usize,
) -> Vec<RankedStation> {
    let located: Vec<StationCandidate> = candidates
        .into_iter()
        .filter(|c| c.coordinate.is_some())
        .collect();

    let mut ranked = rank(Some(reference), located);
    ranked.truncate(k);
    ranked
}

fn compare_ranked(a: &RankedStation, b: &RankedStation) -> Ordering {
    let da = a.distance_km.unwrap_or(f64::INFINITY);
    let db = b.distance_km.unwrap_or(f64::INFINITY);

    match da.partial_cmp(&db) {
        Some(Ordering::Equal) | None => collate::compare(a.name(), b.name()),
        Some(ordering) => ordering,
    }
}
