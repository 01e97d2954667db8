//! Per-cow daily feed schedules with nutrient breakdowns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One nutrient contributed by a scheduled feed item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    #[serde(rename = "nutrisi_name")]
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(deserialize_with = "crate::quantity::deserialize", default)]
    pub amount: f64,
}

/// A feed item within a daily schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFeedItem {
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
}

/// A cow's feed schedule for one day (one per session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFeed {
    pub cow_id: i64,
    #[serde(default)]
    pub cow_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub items: Vec<DailyFeedItem>,
}

impl DailyFeed {
    pub fn nutrients(&self) -> impl Iterator<Item = &Nutrient> {
        self.items.iter().flat_map(|item| item.nutrients.iter())
    }
}

/// `{ success, message?, data? }` envelope of the daily feed endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyFeedEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<DailyFeed>>,
}

impl DailyFeedEnvelope {
    pub fn into_result(self) -> Result<Vec<DailyFeed>, String> {
        match (self.success, self.data) {
            (true, Some(feeds)) => Ok(feeds),
            (_, _) => Err(self
                .message
                .unwrap_or_else(|| "Failed to load feed schedules".to_string())),
        }
    }
}

/// Entry of the nutrient catalog; only counted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub unit: String,
}

/// `{ success, message?, data? }` envelope of the nutrient catalog endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NutritionCatalogEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<NutritionType>>,
}

impl NutritionCatalogEnvelope {
    pub fn into_result(self) -> Result<Vec<NutritionType>, String> {
        match (self.success, self.data) {
            (true, Some(nutritions)) => Ok(nutritions),
            (_, _) => Err(self
                .message
                .unwrap_or_else(|| "Failed to load nutrients".to_string())),
        }
    }
}
