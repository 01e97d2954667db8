//! Series Extractor.
//!
//! Picks which feed names are plotted and builds one value per bucket for
//! each. A bucket where the feed was never administered is `None`, which
//! the renderer leaves blank instead of drawing a zero-height bar.

use crate::filter::FilterState;
use crate::grouping::{group_by_interval, Bucket};
use dairy_feed::usage::UsageRecord;
use dairy_utils::round::round_1;
use serde::Serialize;
use std::collections::HashMap;

/// Maximum number of plotted feed series.
pub const MAX_SERIES: usize = 5;

/// `dataMax` used when nothing positive is plotted.
pub const DATA_MAX_SENTINEL: f64 = 10.0;

/// How feed names are chosen when more than [`MAX_SERIES`] appear in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesSelection {
    /// First five names in order of first appearance.
    #[default]
    FirstSeen,
    /// Five largest total quantities; ties keep first-appearance order.
    ByVolume,
}

/// One plotted feed. `data[i]` belongs to bucket `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<Option<f64>>,
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    /// Bucket keys, ascending.
    pub buckets: Vec<String>,
    pub series: Vec<Series>,
    pub data_max: f64,
}

impl Aggregation {
    pub fn empty() -> Self {
        Self {
            buckets: Vec::new(),
            series: Vec::new(),
            data_max: DATA_MAX_SENTINEL,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Distinct feed names in order of first appearance.
pub fn feed_names_in_order(records: &[UsageRecord]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for feed in records.iter().flat_map(|record| record.feeds.iter()) {
        if !names.iter().any(|name| *name == feed.feed_name) {
            names.push(feed.feed_name.clone());
        }
    }
    names
}

/// Feed names that become series, at most [`MAX_SERIES`].
pub fn select_feed_names(records: &[UsageRecord], selection: SeriesSelection) -> Vec<String> {
    let mut names = feed_names_in_order(records);
    if selection == SeriesSelection::ByVolume {
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for feed in records.iter().flat_map(|record| record.feeds.iter()) {
            *totals.entry(feed.feed_name.as_str()).or_default() += feed.quantity_kg;
        }
        let volume = |name: &String| totals.get(name.as_str()).copied().unwrap_or(0.0);
        // stable sort keeps first-seen order among equal totals
        names.sort_by(|a, b| volume(b).total_cmp(&volume(a)));
    }
    names.truncate(MAX_SERIES);
    names
}

/// Build aligned series for `feed_names` over `buckets`.
///
/// Positive sums are rounded to one decimal, zero sums become `None`, and
/// a series with no value in any bucket is dropped. Returns the series
/// and `dataMax`, which falls back to [`DATA_MAX_SENTINEL`].
pub fn extract_series(buckets: &[Bucket<'_>], feed_names: &[String]) -> (Vec<Series>, f64) {
    let series: Vec<Series> = feed_names
        .iter()
        .map(|name| Series {
            name: name.clone(),
            data: buckets
                .iter()
                .map(|bucket| {
                    let sum = bucket.sum_of(name);
                    if sum > 0.0 {
                        Some(round_1(sum))
                    } else {
                        None
                    }
                })
                .collect(),
        })
        .filter(|series| series.data.iter().any(Option::is_some))
        .collect();
    let data_max = series
        .iter()
        .flat_map(|series| series.data.iter().flatten())
        .copied()
        .fold(0.0, f64::max);
    let data_max = if data_max > 0.0 {
        data_max
    } else {
        DATA_MAX_SENTINEL
    };
    (series, data_max)
}

/// Aggregate `records` for `filter` with the default series selection.
pub fn aggregate(records: &[UsageRecord], filter: &FilterState) -> Aggregation {
    aggregate_with(records, filter, SeriesSelection::default())
}

/// Aggregate `records` for `filter`.
///
/// Buckets by the filter's effective interval. Input with no feed entries
/// at all yields the empty aggregation.
pub fn aggregate_with(
    records: &[UsageRecord],
    filter: &FilterState,
    selection: SeriesSelection,
) -> Aggregation {
    let feed_names = select_feed_names(records, selection);
    if feed_names.is_empty() {
        return Aggregation::empty();
    }
    let buckets = group_by_interval(records, filter.effective_interval());
    let (series, data_max) = extract_series(&buckets, &feed_names);
    log::debug!(
        "aggregated {} records into {} buckets, {} series, dataMax {}",
        records.len(),
        buckets.len(),
        series.len(),
        data_max
    );
    Aggregation {
        buckets: buckets.into_iter().map(|bucket| bucket.key).collect(),
        series,
        data_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::resolve_filter;
    use chrono::NaiveDate;
    use dairy_feed::date_range::DateRange;
    use dairy_feed::filter::{FilterMode, Interval};
    use dairy_feed::usage::FeedQuantity;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, feeds: &[(&str, f64)]) -> UsageRecord {
        UsageRecord {
            date,
            feeds: feeds
                .iter()
                .map(|(name, kg)| FeedQuantity {
                    feed_id: name.len() as i64,
                    feed_name: name.to_string(),
                    quantity_kg: *kg,
                })
                .collect(),
        }
    }

    fn custom(start: NaiveDate, end: NaiveDate, interval: Interval) -> FilterState {
        FilterState {
            mode: FilterMode::Custom,
            start_date: start,
            end_date: end,
            interval,
        }
    }

    #[test]
    fn test_week_scenario() {
        let records = vec![
            record(date(2024, 3, 4), &[("Hay", 5.0)]),
            record(date(2024, 3, 5), &[("Hay", 3.0)]),
        ];
        let filter = resolve_filter(FilterMode::Week, date(2024, 3, 6), None).unwrap();
        let result = aggregate(&records, &filter);
        assert_eq!(result.buckets, vec!["2024-03-04", "2024-03-05"]);
        assert_eq!(
            result.series,
            vec![Series {
                name: "Hay".to_string(),
                data: vec![Some(5.0), Some(3.0)],
            }]
        );
        assert_eq!(result.data_max, 5.0);
    }

    #[test]
    fn test_empty_records() {
        let filter = resolve_filter(FilterMode::Month, date(2024, 3, 6), None).unwrap();
        let result = aggregate(&[], &filter);
        assert!(result.buckets.is_empty());
        assert!(result.series.is_empty());
        assert_eq!(result.data_max, DATA_MAX_SENTINEL);
    }

    #[test]
    fn test_null_versus_zero_within_week() {
        // same ISO week: Mon 4th, Tue 5th; next week: Mon 11th
        let records = vec![
            record(date(2024, 3, 4), &[("Hay", 2.5), ("Silage", 4.0)]),
            record(date(2024, 3, 5), &[("Silage", 1.0)]),
            record(date(2024, 3, 11), &[("Silage", 3.0)]),
        ];
        let filter = custom(date(2024, 3, 1), date(2024, 3, 31), Interval::Week);
        let result = aggregate(&records, &filter);
        assert_eq!(result.buckets, vec!["2024-W10", "2024-W11"]);
        let hay = &result.series[0];
        assert_eq!(hay.name, "Hay");
        assert_eq!(hay.data, vec![Some(2.5), None]);
        let silage = &result.series[1];
        assert_eq!(silage.data, vec![Some(5.0), Some(3.0)]);
    }

    #[test]
    fn test_zero_quantities_drop_series() {
        let records = vec![
            record(date(2024, 3, 4), &[("Hay", 0.0), ("Silage", 2.0)]),
            record(date(2024, 3, 5), &[("Hay", 0.0)]),
        ];
        let filter = custom(date(2024, 3, 4), date(2024, 3, 5), Interval::Day);
        let result = aggregate(&records, &filter);
        // buckets stay even though Hay is dropped
        assert_eq!(result.buckets.len(), 2);
        assert_eq!(result.series.len(), 1);
        assert_eq!(result.series[0].name, "Silage");
        assert_eq!(result.series[0].data, vec![Some(2.0), None]);
    }

    #[test]
    fn test_all_zero_falls_back_to_sentinel() {
        let records = vec![record(date(2024, 3, 4), &[("Hay", 0.0)])];
        let filter = custom(date(2024, 3, 4), date(2024, 3, 4), Interval::Day);
        let result = aggregate(&records, &filter);
        assert_eq!(result.buckets, vec!["2024-03-04"]);
        assert!(result.series.is_empty());
        assert_eq!(result.data_max, DATA_MAX_SENTINEL);
    }

    #[test]
    fn test_top_five_by_first_appearance() {
        let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
        let mut records: Vec<UsageRecord> = names
            .iter()
            .enumerate()
            .map(|(i, name)| record(date(2024, 3, 1 + i as u32), &[(*name, 1.0 + i as f64)]))
            .collect();
        // "C" only ever gets zero, so it is considered but not plotted
        records[2].feeds[0].quantity_kg = 0.0;

        assert_eq!(
            select_feed_names(&records, SeriesSelection::FirstSeen),
            vec!["A", "B", "C", "D", "E"]
        );
        let filter = custom(date(2024, 3, 1), date(2024, 3, 31), Interval::Day);
        let result = aggregate(&records, &filter);
        let plotted: Vec<&str> = result.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(plotted, vec!["A", "B", "D", "E"]);
        assert_eq!(result.buckets.len(), 8);
        assert_eq!(result.data_max, 5.0);
    }

    #[test]
    fn test_select_by_volume() {
        let records = vec![
            record(date(2024, 3, 1), &[("A", 1.0), ("B", 1.0), ("C", 1.0)]),
            record(date(2024, 3, 2), &[("D", 1.0), ("E", 1.0), ("F", 50.0)]),
            record(date(2024, 3, 3), &[("G", 20.0)]),
        ];
        assert_eq!(
            select_feed_names(&records, SeriesSelection::ByVolume),
            vec!["F", "G", "A", "B", "C"]
        );
    }

    #[test]
    fn test_sum_preservation_across_intervals() {
        let records: Vec<UsageRecord> = DateRange(date(2023, 11, 25), date(2024, 2, 3))
            .enumerate()
            .map(|(i, d)| {
                if i % 3 == 0 {
                    record(d, &[("Hay", 1.5), ("Silage", 0.3)])
                } else {
                    record(d, &[("Hay", 2.25)])
                }
            })
            .collect();
        let raw_hay: f64 = records.iter().map(|r| r.quantity_of("Hay")).sum();
        let raw_silage: f64 = records.iter().map(|r| r.quantity_of("Silage")).sum();

        for interval in [Interval::Day, Interval::Week, Interval::Month, Interval::Year] {
            let filter = custom(date(2023, 11, 25), date(2024, 2, 3), interval);
            let result = aggregate(&records, &filter);
            let tolerance = 0.05 * result.buckets.len() as f64 + 1e-9;
            for (series, raw) in result.series.iter().zip([raw_hay, raw_silage]) {
                let bucketed: f64 = series.data.iter().flatten().sum();
                assert!(
                    (bucketed - raw).abs() <= tolerance,
                    "{} by {}: {} vs {}",
                    series.name,
                    interval,
                    bucketed,
                    raw
                );
            }
        }
    }

    #[test]
    fn test_preset_mode_ignores_stored_interval() {
        let records = vec![
            record(date(2024, 1, 15), &[("Hay", 1.0)]),
            record(date(2024, 2, 15), &[("Hay", 2.0)]),
        ];
        let filter = FilterState {
            mode: FilterMode::Year,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            interval: Interval::Day,
        };
        let result = aggregate(&records, &filter);
        assert_eq!(result.buckets, vec!["2024-01", "2024-02"]);
    }

    #[test]
    fn test_records_without_feeds() {
        let records = vec![record(date(2024, 3, 4), &[])];
        let filter = custom(date(2024, 3, 4), date(2024, 3, 4), Interval::Day);
        assert_eq!(aggregate(&records, &filter), Aggregation::empty());
    }
}
