//! QR code model
//!
//! A QR code record points at a destination URL that can change after the
//! code has been printed. The rendered image lives on an external service;
//! the record only keeps a link to it.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// QR code record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    /// Unique identifier, immutable
    #[serde(rename = "qrId", alias = "id")]
    pub id: String,
    /// Display name
    pub label: String,
    /// Absolute URL the code redirects to
    pub destination: String,
    /// Link to the rendered image, derived from the destination at creation
    #[serde(rename = "qrUrl", alias = "imageUrl")]
    pub image_url: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last destination update, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl QrCode {
    /// Create a new record stamped with the current time
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        destination: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            destination: destination.into(),
            image_url: image_url.into(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Replace the destination and stamp `updated_at`
    ///
    /// `image_url` keeps pointing at the original destination.
    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.destination = destination.into();
        self.updated_at = Some(Utc::now());
    }
}

/// Listing result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeList {
    /// Records, newest first
    pub qr_codes: Vec<QrCode>,
    /// Number of records
    pub total: usize,
}

impl QrCodeList {
    pub fn new(qr_codes: Vec<QrCode>) -> Self {
        let total = qr_codes.len();
        Self { qr_codes, total }
    }
}

/// A demo record the registry can start with
#[derive(Debug, Clone, Copy)]
pub struct DemoQrCode {
    pub id: &'static str,
    pub label: &'static str,
    pub destination: &'static str,
    /// (year, month, day, hour, minute) in UTC
    pub created: (i32, u32, u32, u32, u32),
}

impl DemoQrCode {
    /// Creation time as a UTC timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        let (year, month, day, hour, minute) = self.created;
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

/// Records shown on a fresh dashboard, newest first
pub const DEMO_QR_CODES: [DemoQrCode; 2] = [
    DemoQrCode {
        id: "demo123",
        label: "GitHub Profile",
        destination: "https://github.com",
        created: (2024, 1, 15, 10, 30),
    },
    DemoQrCode {
        id: "test456",
        label: "Google Search",
        destination: "https://google.com",
        created: (2024, 1, 14, 8, 0),
    },
];
