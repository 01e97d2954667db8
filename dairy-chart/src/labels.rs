//! Display labels for bucket keys on the category axis.

use chrono::{Datelike, Month, NaiveDate};
use dairy_feed::filter::Interval;
use dairy_utils::dates::parse_date;

/// Human-readable label for `key` produced under `interval`.
///
/// Day `2024-03-04` → `4 Mar`, week `2024-W10` → `Week 10`,
/// month `2024-03` → `March`, year stays as is. Keys that do not parse
/// are shown verbatim.
pub fn category_label(key: &str, interval: Interval) -> String {
    let label = match interval {
        Interval::Day => parse_date(key)
            .ok()
            .map(|date| format!("{} {}", date.day(), short_month(&date))),
        Interval::Week => key
            .split_once("-W")
            .map(|(_, week)| format!("Week {}", week)),
        Interval::Month => key
            .split_once('-')
            .and_then(|(_, month)| month.parse::<u8>().ok())
            .and_then(|month| Month::try_from(month).ok())
            .map(|month| month.name().to_string()),
        Interval::Year => None,
    };
    label.unwrap_or_else(|| key.to_string())
}

/// Labels for every key, in order.
pub fn category_labels(keys: &[String], interval: Interval) -> Vec<String> {
    keys.iter().map(|key| category_label(key, interval)).collect()
}

fn short_month(date: &NaiveDate) -> String {
    date.format("%b").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_per_interval() {
        assert_eq!(category_label("2024-03-04", Interval::Day), "4 Mar");
        assert_eq!(category_label("2024-W09", Interval::Week), "Week 09");
        assert_eq!(category_label("2024-03", Interval::Month), "March");
        assert_eq!(category_label("2024", Interval::Year), "2024");
    }

    #[test]
    fn test_unparseable_keys_pass_through() {
        assert_eq!(category_label("not-a-date", Interval::Day), "not-a-date");
        assert_eq!(category_label("2024-13", Interval::Month), "2024-13");
    }

    #[test]
    fn test_category_labels_keep_order() {
        let keys = vec!["2024-01".to_string(), "2024-12".to_string()];
        assert_eq!(
            category_labels(&keys, Interval::Month),
            vec!["January", "December"]
        );
    }
}
