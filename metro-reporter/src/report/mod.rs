//! Defect report assembly and submission.

mod client;
mod draft;
mod error;
mod types;

pub use client::{ReportClient, ReportClientConfig};
pub use draft::{MAX_PHOTOS, ReportDraft};
pub use error::{ReportError, ValidationError};
pub use types::{Photo, ReportReceipt, ReportSubmission, parse_receipts};
