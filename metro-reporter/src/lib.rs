//! Metro defect reporter.
//!
//! A form wizard for reporting a defect on a metro train car: photos, a
//! defect category and the nearest station, submitted to a reports API.
//! The core is the station suggestion pipeline in [`controller`], which
//! ranks provider results by distance with [`geo`].

pub mod cache;
pub mod controller;
pub mod domain;
pub mod geo;
pub mod geolocation;
pub mod report;
pub mod suggest;
pub mod terminal;
