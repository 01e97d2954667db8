//! Interval Grouping Engine.
//!
//! Buckets irregular per-day records into day, ISO-week, month or year
//! buckets. Bucket keys are chosen so that lexicographic order is
//! chronological order:
//!
//! | interval | key          |
//! |----------|--------------|
//! | day      | `YYYY-MM-DD` |
//! | week     | `YYYY-Www`   |
//! | month    | `YYYY-MM`    |
//! | year     | `YYYY`       |

use chrono::{Datelike, NaiveDate};
use dairy_feed::filter::Interval;
use dairy_feed::nutrition::DailyFeed;
use dairy_feed::usage::UsageRecord;
use dairy_utils::dates::format_date;
use std::collections::BTreeMap;

/// Anything that can be placed in a time bucket.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for UsageRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for DailyFeed {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// A group of records sharing a calendar key. Derived on every pass, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket<'a, T = UsageRecord> {
    pub key: String,
    pub members: Vec<&'a T>,
}

impl Bucket<'_, UsageRecord> {
    /// Total kilograms of `feed_name` across the bucket. Absent feeds add 0.
    pub fn sum_of(&self, feed_name: &str) -> f64 {
        self.members
            .iter()
            .map(|record| record.quantity_of(feed_name))
            .sum()
    }
}

/// Bucket key of `date` for `interval`.
///
/// Weeks follow ISO-8601: a week belongs to the year of its Thursday, so
/// 2023-01-01 (a Sunday) is `2022-W52` and 2024-12-30 is `2025-W01`.
pub fn bucket_key(date: &NaiveDate, interval: Interval) -> String {
    match interval {
        Interval::Day => format_date(date),
        Interval::Week => {
            let week = date.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
        Interval::Month => format!("{}-{:02}", date.year(), date.month()),
        Interval::Year => format!("{}", date.year()),
    }
}

/// Group `records` into buckets sorted ascending by key.
///
/// Each record lands in exactly one bucket; within a bucket, records keep
/// their input order. Empty input yields no buckets.
pub fn group_by_interval<T: Dated>(records: &[T], interval: Interval) -> Vec<Bucket<'_, T>> {
    group_by_key(records, |date| bucket_key(date, interval))
}

/// Group `records` under keys produced by `key_of`, sorted ascending.
///
/// Keys must sort chronologically for the output to be in date order.
pub fn group_by_key<T: Dated, F>(records: &[T], key_of: F) -> Vec<Bucket<'_, T>>
where
    F: Fn(&NaiveDate) -> String,
{
    let mut grouped: BTreeMap<String, Vec<&T>> = BTreeMap::new();
    for record in records {
        grouped.entry(key_of(&record.date())).or_default().push(record);
    }
    grouped
        .into_iter()
        .map(|(key, members)| Bucket { key, members })
        .collect()
}
