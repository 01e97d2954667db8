//! HTTP usage provider for the dashboard API.
//!
//! # Endpoints
//!
//! - `GET {base}/dailyFeedItem/feedUsage?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
//!   → `{ success, message, data: [ { date, feeds: [ { feed_id, feed_name, quantity_kg } ] } ] }`
//! - `GET {base}/feedType` → `{ success, feedTypes: [ { id, name } ] }`
//! - `GET {base}/dailyFeedSchedule?start_date=..&end_date=..` → `{ success, data: [DailyFeed] }`
//! - `GET {base}/nutrition` → `{ success, data: [ { id, name, unit } ] }`
//!
//! Error statuses still carry a JSON envelope whose `message` is surfaced.

use crate::error::{ProviderError, Result};
use dairy_chart::UsageProvider;
use dairy_feed::date_range::DateRange;
use dairy_feed::nutrition::{
    DailyFeed, DailyFeedEnvelope, NutritionCatalogEnvelope, NutritionType,
};
use dairy_feed::usage::{FeedType, FeedTypeEnvelope, UsageEnvelope, UsageRecord};
use log::debug;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const USAGE_PATH: &str = "dailyFeedItem/feedUsage";
pub const FEED_TYPE_PATH: &str = "feedType";
pub const DAILY_FEED_PATH: &str = "dailyFeedSchedule";
pub const NUTRITION_PATH: &str = "nutrition";

pub struct HttpUsageProvider {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpUsageProvider {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);
        let mut request = self.client.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        match serde_json::from_str::<T>(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => {
                Err(ProviderError::Rejected(format!("{} returned {}", url, status)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Daily feed schedules for the nutrition summary.
    pub async fn fetch_daily_feeds(&self, range: DateRange) -> Result<Vec<DailyFeed>> {
        let envelope: DailyFeedEnvelope = self
            .get_json(DAILY_FEED_PATH, &range.query_params())
            .await?;
        envelope.into_result().map_err(ProviderError::Rejected)
    }
}

impl UsageProvider for HttpUsageProvider {
    type Error = ProviderError;

    async fn fetch_usage(&self, range: DateRange) -> Result<Vec<UsageRecord>> {
        let envelope: UsageEnvelope = self.get_json(USAGE_PATH, &range.query_params()).await?;
        envelope.into_result().map_err(ProviderError::Rejected)
    }

    async fn fetch_feed_types(&self) -> Result<Vec<FeedType>> {
        let envelope: FeedTypeEnvelope = self.get_json(FEED_TYPE_PATH, &[]).await?;
        envelope.into_result().map_err(ProviderError::Rejected)
    }

    async fn fetch_nutritions(&self) -> Result<Vec<NutritionType>> {
        let envelope: NutritionCatalogEnvelope = self.get_json(NUTRITION_PATH, &[]).await?;
        envelope.into_result().map_err(ProviderError::Rejected)
    }
}
