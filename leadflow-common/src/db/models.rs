//! Lead data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Probability a top prediction must strictly exceed to count as verified.
pub const VERIFIED_THRESHOLD: f64 = 0.6;

/// Verification status assigned at enrichment time, never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    Verified,
    #[serde(rename = "To Check")]
    ToCheck,
}

impl LeadStatus {
    /// Classify a top-prediction probability. Exactly the threshold is
    /// still `ToCheck`.
    pub fn from_probability(probability: f64) -> Self {
        if probability > VERIFIED_THRESHOLD {
            LeadStatus::Verified
        } else {
            LeadStatus::ToCheck
        }
    }

    /// Stored and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Verified => "Verified",
            LeadStatus::ToCheck => "To Check",
        }
    }

    /// Inverse of [`as_str`](Self::as_str); anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Verified" => Some(LeadStatus::Verified),
            "To Check" => Some(LeadStatus::ToCheck),
            _ => None,
        }
    }
}

/// Enriched lead as persisted and served.
///
/// Immutable after insert except for the synced/synced_at pair, which the
/// sync task flips together exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub guid: String,
    pub name: String,
    pub most_likely_country: String,
    pub country_code: String,
    pub probability: f64,
    pub status: LeadStatus,
    pub synced: bool,
    pub synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Enrichment output not yet persisted.
///
/// The store assigns guid and created_at at insert.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadDraft {
    pub name: String,
    pub most_likely_country: String,
    pub country_code: String,
    pub probability: f64,
    pub status: LeadStatus,
}
