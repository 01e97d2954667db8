//! Headline figures shown beside the usage chart.

use dairy_feed::usage::UsageRecord;
use dairy_utils::round::round_1;
use serde::Serialize;
use std::collections::HashSet;

/// Catalog sizes fetched beside the usage records. A failed fetch counts 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogCounts {
    pub feed_types: usize,
    pub nutritions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageSummary {
    /// Size of the feed-type catalog.
    pub feed_type_count: usize,
    /// Size of the nutrient catalog.
    pub nutrition_count: usize,
    /// Distinct `feed_id`s consumed in range.
    pub consumed_feed_count: usize,
    /// Kilograms across all records, one decimal.
    pub total_quantity_kg: f64,
}

impl UsageSummary {
    pub fn from_records(records: &[UsageRecord], catalog: CatalogCounts) -> Self {
        let consumed: HashSet<i64> = records
            .iter()
            .flat_map(|record| record.feeds.iter().map(|feed| feed.feed_id))
            .collect();
        let total: f64 = records.iter().map(UsageRecord::total_kg).sum();
        Self {
            feed_type_count: catalog.feed_types,
            nutrition_count: catalog.nutritions,
            consumed_feed_count: consumed.len(),
            total_quantity_kg: round_1(total),
        }
    }
}
