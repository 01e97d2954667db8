//! Nutrition summary for a single cow.
//!
//! Tabular rather than plotted: a nutrient missing from a period reads as 0,
//! and values keep two decimals. Day, month and year periods share the usage
//! chart's bucket keys. Weeks run Sunday to Saturday and are keyed by their
//! Sunday (`YYYY-MM-DD`), labelled with the span, e.g. `10 Mar - 16 Mar`.

use crate::filter::FilterState;
use crate::grouping::{bucket_key, group_by_key};
use crate::labels::category_label;
use chrono::{Datelike, Days, NaiveDate};
use dairy_feed::filter::Interval;
use dairy_feed::nutrition::DailyFeed;
use dairy_utils::dates::{format_date, parse_date, start_of_week_sunday};
use dairy_utils::round::round_to;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CowRef {
    pub id: i64,
    pub name: String,
}

/// Nutrient identity: same name in different units are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NutrientKey {
    pub name: String,
    pub unit: String,
}

impl NutrientKey {
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.unit)
    }
}

/// Totals for one bucket, aligned with [`NutritionSummary::nutrients`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionPeriod {
    pub key: String,
    pub label: String,
    pub totals: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionSeries {
    pub name: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct NutritionSummary {
    pub nutrients: Vec<NutrientKey>,
    pub periods: Vec<NutritionPeriod>,
}

impl NutritionSummary {
    pub fn categories(&self) -> Vec<String> {
        self.periods.iter().map(|period| period.label.clone()).collect()
    }

    /// One series per nutrient, named `"<name> (<unit>)"`.
    pub fn series(&self) -> Vec<NutritionSeries> {
        self.nutrients
            .iter()
            .enumerate()
            .map(|(i, nutrient)| NutritionSeries {
                name: nutrient.display_name(),
                data: self
                    .periods
                    .iter()
                    .map(|period| period.totals.get(i).copied().unwrap_or(0.0))
                    .collect(),
            })
            .collect()
    }
}

/// Distinct cows in order of first appearance.
pub fn unique_cows(feeds: &[DailyFeed]) -> Vec<CowRef> {
    let mut cows: Vec<CowRef> = Vec::new();
    for feed in feeds {
        let cow = CowRef {
            id: feed.cow_id,
            name: feed.cow_name.clone(),
        };
        if !cows.contains(&cow) {
            cows.push(cow);
        }
    }
    cows
}

/// Period key of `date`: the week's Sunday for weeks, otherwise the usage bucket key.
pub fn period_key(date: &NaiveDate, interval: Interval) -> String {
    match interval {
        Interval::Week => format_date(&start_of_week_sunday(date)),
        _ => bucket_key(date, interval),
    }
}

/// Display label of a period key produced by [`period_key`].
pub fn period_label(key: &str, interval: Interval) -> String {
    match interval {
        Interval::Week => match parse_date(key) {
            Ok(start) => {
                let end = start + Days::new(6);
                format!("{} - {}", day_month(&start), day_month(&end))
            }
            Err(_) => key.to_string(),
        },
        _ => category_label(key, interval),
    }
}

fn day_month(date: &NaiveDate) -> String {
    format!("{} {}", date.day(), date.format("%b"))
}

/// Summarize nutrients fed to `cow_id` within `filter`'s range.
pub fn summarize_nutrition(
    feeds: &[DailyFeed],
    cow_id: i64,
    filter: &FilterState,
) -> NutritionSummary {
    let range = filter.range();
    let selected: Vec<DailyFeed> = feeds
        .iter()
        .filter(|feed| feed.cow_id == cow_id && range.contains(&feed.date))
        .cloned()
        .collect();
    if selected.is_empty() {
        return NutritionSummary::default();
    }

    let mut nutrients: Vec<NutrientKey> = Vec::new();
    for nutrient in selected.iter().flat_map(DailyFeed::nutrients) {
        let key = NutrientKey {
            name: nutrient.name.clone(),
            unit: nutrient.unit.clone(),
        };
        if !nutrients.contains(&key) {
            nutrients.push(key);
        }
    }

    let interval = filter.effective_interval();
    let periods = group_by_key(&selected, |date| period_key(date, interval))
        .into_iter()
        .map(|bucket| {
            let mut totals = vec![0.0; nutrients.len()];
            for nutrient in bucket.members.iter().flat_map(|feed| feed.nutrients()) {
                if let Some(i) = nutrients
                    .iter()
                    .position(|key| key.name == nutrient.name && key.unit == nutrient.unit)
                {
                    totals[i] += nutrient.amount;
                }
            }
            NutritionPeriod {
                label: period_label(&bucket.key, interval),
                key: bucket.key,
                totals: totals.into_iter().map(|total| round_to(total, 2)).collect(),
            }
        })
        .collect();

    NutritionSummary { nutrients, periods }
}
