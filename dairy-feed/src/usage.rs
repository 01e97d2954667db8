//! Feed usage records as delivered by the usage endpoint.
//!
//! One `UsageRecord` per day, each carrying the quantities of every feed
//! administered that day. Records are immutable once fetched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Message shown when the provider answers without a usable payload.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to load feed usage data";

/// Quantity of a single feed administered on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedQuantity {
    pub feed_id: i64,
    /// Display name; series are keyed by this, not by `feed_id`.
    pub feed_name: String,
    /// Kilograms, never negative.
    #[serde(deserialize_with = "crate::quantity::deserialize", default)]
    pub quantity_kg: f64,
}

/// All feed quantities recorded for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub feeds: Vec<FeedQuantity>,
}

impl UsageRecord {
    /// Sum of every entry for `feed_name` in this record (0 when absent).
    pub fn quantity_of(&self, feed_name: &str) -> f64 {
        self.feeds
            .iter()
            .filter(|feed| feed.feed_name == feed_name)
            .map(|feed| feed.quantity_kg)
            .sum()
    }

    /// Total kilograms of all feeds in this record.
    pub fn total_kg(&self) -> f64 {
        self.feeds.iter().map(|feed| feed.quantity_kg).sum()
    }
}

/// Entry of the feed-type catalog; only counted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedType {
    pub id: i64,
    pub name: String,
}

/// `{ success, message?, data? }` envelope of the usage endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<UsageRecord>>,
}

impl UsageEnvelope {
    /// Records on success, otherwise the message to surface.
    ///
    /// A success flag without a data array is treated as a failure.
    pub fn into_result(self) -> Result<Vec<UsageRecord>, String> {
        match (self.success, self.data) {
            (true, Some(records)) => Ok(records),
            (_, _) => Err(self
                .message
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string())),
        }
    }
}

/// `{ success, feedTypes? }` envelope of the feed-type catalog endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedTypeEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "feedTypes", default)]
    pub feed_types: Option<Vec<FeedType>>,
}

impl FeedTypeEnvelope {
    pub fn into_result(self) -> Result<Vec<FeedType>, String> {
        match (self.success, self.feed_types) {
            (true, Some(feed_types)) => Ok(feed_types),
            (_, _) => Err(self
                .message
                .unwrap_or_else(|| "Failed to load feed types".to_string())),
        }
    }
}
