//! Offline provider reading usage records from a local fixture.
//!
//! Two layouts are accepted, chosen by extension:
//! - `.json`: the usage endpoint's envelope (`{ "success": true, "data": [...] }`)
//! - `.csv`: one row per feed per day with headers
//!   `date,feed_id,feed_name,quantity_kg`
//!
//! The file is re-read on every fetch and filtered to the requested range.
//! A nutrient catalog can be supplied as a second JSON file (the catalog
//! endpoint's envelope or a bare array); without one the catalog is empty.

use crate::error::{ProviderError, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use dairy_chart::UsageProvider;
use dairy_feed::date_range::DateRange;
use dairy_feed::nutrition::{
    DailyFeed, DailyFeedEnvelope, NutritionCatalogEnvelope, NutritionType,
};
use dairy_feed::usage::{FeedQuantity, FeedType, UsageEnvelope, UsageRecord};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub struct FileUsageProvider {
    path: PathBuf,
    nutrition_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct UsageRow {
    date: NaiveDate,
    feed_id: i64,
    feed_name: String,
    #[serde(deserialize_with = "dairy_feed::quantity::deserialize", default)]
    quantity_kg: f64,
}

impl FileUsageProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            nutrition_path: None,
        }
    }

    pub fn with_nutrition_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.nutrition_path = Some(path.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_csv(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    }

    async fn load_all(&self) -> Result<Vec<UsageRecord>> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        if self.is_csv() {
            parse_usage_csv(&body)
        } else {
            parse_usage_json(&body)
        }
    }
}

/// Parse a usage envelope, or a bare array of records.
pub fn parse_usage_json(body: &str) -> Result<Vec<UsageRecord>> {
    if body.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(body)?);
    }
    let envelope: UsageEnvelope = serde_json::from_str(body)?;
    envelope.into_result().map_err(ProviderError::Rejected)
}

/// Parse per-feed rows into one record per date, ascending.
///
/// Feeds keep their row order within a date.
pub fn parse_usage_csv(body: &str) -> Result<Vec<UsageRecord>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<FeedQuantity>> = BTreeMap::new();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());
    for row in rdr.deserialize() {
        let row: UsageRow = row?;
        by_date.entry(row.date).or_default().push(FeedQuantity {
            feed_id: row.feed_id,
            feed_name: row.feed_name,
            quantity_kg: row.quantity_kg,
        });
    }
    Ok(by_date
        .into_iter()
        .map(|(date, feeds)| UsageRecord { date, feeds })
        .collect())
}

/// Parse a nutrient catalog envelope, or a bare array of entries.
pub fn parse_nutrition_catalog_json(body: &str) -> Result<Vec<NutritionType>> {
    if body.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(body)?);
    }
    let envelope: NutritionCatalogEnvelope = serde_json::from_str(body)?;
    envelope.into_result().map_err(ProviderError::Rejected)
}

/// Parse a daily feed envelope, or a bare array of schedules.
pub fn parse_daily_feeds_json(body: &str) -> Result<Vec<DailyFeed>> {
    if body.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(body)?);
    }
    let envelope: DailyFeedEnvelope = serde_json::from_str(body)?;
    envelope.into_result().map_err(ProviderError::Rejected)
}

impl UsageProvider for FileUsageProvider {
    type Error = ProviderError;

    async fn fetch_usage(&self, range: DateRange) -> Result<Vec<UsageRecord>> {
        let mut records = self.load_all().await?;
        records.retain(|record| range.contains(&record.date));
        Ok(records)
    }

    /// Distinct feeds in the whole file stand in for the catalog.
    async fn fetch_feed_types(&self) -> Result<Vec<FeedType>> {
        let records = self.load_all().await?;
        let mut feed_types: Vec<FeedType> = Vec::new();
        for feed in records.iter().flat_map(|record| record.feeds.iter()) {
            if !feed_types.iter().any(|known| known.id == feed.feed_id) {
                feed_types.push(FeedType {
                    id: feed.feed_id,
                    name: feed.feed_name.clone(),
                });
            }
        }
        Ok(feed_types)
    }

    async fn fetch_nutritions(&self) -> Result<Vec<NutritionType>> {
        match &self.nutrition_path {
            Some(path) => {
                let body = tokio::fs::read_to_string(path).await?;
                parse_nutrition_catalog_json(&body)
            }
            None => Ok(Vec::new()),
        }
    }
}
