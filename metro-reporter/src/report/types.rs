//! Report payloads.

use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Deserialize;

use super::error::ReportError;

/// A photo attached to a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Photo {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(&file_name).to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    /// Read a photo from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Everything sent to the reports API.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSubmission {
    /// Category label, e.g. `Сиденье`.
    pub category: String,
    pub station: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photos: Vec<Photo>,
}

/// A stored report as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportReceipt {
    pub id: i64,
    pub category: String,
    #[serde(default)]
    pub station: Option<String>,
    pub status: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl ReportReceipt {
    /// Creation time, if the server sent one chrono can read.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc().fixed_offset())
        })
    }
}

/// The API answers with one report per photo, or a single object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReceiptBody {
    Many(Vec<ReportReceipt>),
    One(ReportReceipt),
}

/// Parse a success body into receipts.
pub fn parse_receipts(body: &str) -> Result<Vec<ReportReceipt>, ReportError> {
    let parsed: ReceiptBody = serde_json::from_str(body).map_err(|e| ReportError::Json {
        message: e.to_string(),
    })?;

    Ok(match parsed {
        ReceiptBody::Many(receipts) => receipts,
        ReceiptBody::One(receipt) => vec![receipt],
    })
}
