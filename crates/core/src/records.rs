//! Append-only record rows and the enums constrained on the wire.
//!
//! Column order of each `into_row` is the contract with the external
//! store: rows are written against an `A:Z` range, so reordering fields
//! is a breaking change.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Stock category a registrant can declare interest in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    Indoor,
    Outdoor,
    Accessories,
    Split,
    Spare,
}

impl Interest {
    pub fn as_str(self) -> &'static str {
        match self {
            Interest::Indoor => "indoor",
            Interest::Outdoor => "outdoor",
            Interest::Accessories => "accessories",
            Interest::Split => "split",
            Interest::Spare => "spare",
        }
    }
}

/// Named grouping of auction stock a bid is placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleSlug {
    VrfIndoor,
    VrfOutdoor,
    Accessories,
    Split,
    Spare,
    Mixed,
}

impl BundleSlug {
    pub fn as_str(self) -> &'static str {
        match self {
            BundleSlug::VrfIndoor => "vrf-indoor",
            BundleSlug::VrfOutdoor => "vrf-outdoor",
            BundleSlug::Accessories => "accessories",
            BundleSlug::Split => "split",
            BundleSlug::Spare => "spare",
            BundleSlug::Mixed => "mixed",
        }
    }
}

/// UTC ISO-8601 timestamp with millisecond precision, assigned at write time.
pub fn write_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One row of the Registrations table.
#[derive(Debug, Clone)]
pub struct RegistrationRecord {
    pub timestamp: String,
    pub participant_id: String,
    pub full_name: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub interests: Vec<Interest>,
    pub client_ip: String,
    pub user_agent: String,
}

impl RegistrationRecord {
    pub fn into_row(self) -> Vec<String> {
        let interests = self
            .interests
            .iter()
            .map(|i| i.as_str())
            .collect::<Vec<_>>()
            .join(",");
        vec![
            self.timestamp,
            self.participant_id,
            self.full_name,
            self.company_name,
            self.email,
            self.phone,
            self.country,
            interests,
            self.client_ip,
            self.user_agent,
        ]
    }
}

/// One row of the Bids table.
///
/// A corrected bid is a new row, never an edit; nothing here is unique.
#[derive(Debug, Clone)]
pub struct BidRecord {
    pub timestamp: String,
    pub participant_id: String,
    pub email: String,
    pub bundle_slug: BundleSlug,
    /// Stored as an empty cell when the bidder gave no amount.
    pub bid_amount: Option<f64>,
    pub notes: Option<String>,
    pub client_ip: String,
    pub user_agent: String,
}

impl BidRecord {
    pub fn into_row(self) -> Vec<String> {
        vec![
            self.timestamp,
            self.participant_id,
            self.email,
            self.bundle_slug.as_str().to_string(),
            self.bid_amount.map(|a| a.to_string()).unwrap_or_default(),
            self.notes.unwrap_or_default(),
            self.client_ip,
            self.user_agent,
        ]
    }
}

/// One row of the Downloads table.
#[derive(Debug, Clone)]
pub struct DownloadRecord {
    pub timestamp: String,
    pub participant_id: String,
    pub email: String,
    pub catalogue_slug: String,
    pub catalogue_title: String,
    pub client_ip: String,
    pub user_agent: String,
}

impl DownloadRecord {
    pub fn into_row(self) -> Vec<String> {
        vec![
            self.timestamp,
            self.participant_id,
            self.email,
            self.catalogue_slug,
            self.catalogue_title,
            self.client_ip,
            self.user_agent,
        ]
    }
}
