//! Distance computation and station ranking.
//!
//! Leaf component: depends only on domain types. Absent coordinates and
//! distances stay `Option` all the way through; the "absent sorts last"
//! rule lives entirely inside the ranking comparator.

pub mod collate;
mod distance;
mod rank;

pub use distance::{EARTH_RADIUS_KM, distance_km};
pub use rank::{nearest, rank};
