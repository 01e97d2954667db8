//! Filter Resolver: turns a selected mode into a concrete date range.

use crate::error::{ChartError, Result};
use chrono::{Local, NaiveDate};
use dairy_feed::date_range::DateRange;
use dairy_feed::filter::{FilterMode, Interval};
use dairy_utils::dates::{
    first_day_of_month, first_day_of_year, last_day_of_month, last_day_of_year,
    start_of_week_sunday,
};
use serde::{Deserialize, Serialize};

/// Caller-supplied bounds and interval for `FilterMode::Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub interval: Interval,
}

impl CustomRange {
    pub fn new(start: NaiveDate, end: NaiveDate, interval: Interval) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            interval,
        }
    }
}

/// A resolved filter. `start_date <= end_date` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub mode: FilterMode,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interval: Interval,
}

impl FilterState {
    pub fn range(&self) -> DateRange {
        DateRange(self.start_date, self.end_date)
    }

    /// Interval used for bucketing.
    ///
    /// Preset modes force their own interval regardless of `self.interval`;
    /// only `Custom` honors the caller's choice.
    pub fn effective_interval(&self) -> Interval {
        effective_interval(self.mode, self.interval)
    }
}

/// Interval forced by `mode`, or `chosen` under `Custom`.
pub fn effective_interval(mode: FilterMode, chosen: Interval) -> Interval {
    match mode {
        FilterMode::Year => Interval::Month,
        FilterMode::Month => Interval::Week,
        FilterMode::Week | FilterMode::Today => Interval::Day,
        FilterMode::Custom => chosen,
    }
}

/// Resolve `mode` against `today`.
///
/// `custom` is only consulted for `FilterMode::Custom`. A custom range with
/// start after end fails with [`ChartError::InvalidRange`] and must not be
/// fetched.
pub fn resolve_filter(
    mode: FilterMode,
    today: NaiveDate,
    custom: Option<CustomRange>,
) -> Result<FilterState> {
    let state = match mode {
        FilterMode::Today => FilterState {
            mode,
            start_date: today,
            end_date: today,
            interval: Interval::Day,
        },
        FilterMode::Week => {
            let start = start_of_week_sunday(&today);
            let end = start + chrono::Days::new(6);
            FilterState {
                mode,
                start_date: start,
                end_date: end,
                interval: Interval::Day,
            }
        }
        FilterMode::Month => FilterState {
            mode,
            start_date: first_day_of_month(&today),
            end_date: last_day_of_month(&today),
            interval: Interval::Week,
        },
        FilterMode::Year => FilterState {
            mode,
            start_date: first_day_of_year(&today),
            end_date: last_day_of_year(&today),
            interval: Interval::Month,
        },
        FilterMode::Custom => {
            let custom = custom.ok_or(ChartError::IncompleteCustomRange)?;
            let (start, end) = match (custom.start, custom.end) {
                (Some(start), Some(end)) => (start, end),
                _ => return Err(ChartError::IncompleteCustomRange),
            };
            if start > end {
                return Err(ChartError::InvalidRange { start, end });
            }
            if custom.interval == Interval::Year {
                return Err(ChartError::UnsupportedCustomInterval(custom.interval));
            }
            FilterState {
                mode,
                start_date: start,
                end_date: end,
                interval: custom.interval,
            }
        }
    };
    log::debug!(
        "resolved filter {} -> {}..={} by {}",
        state.mode,
        state.start_date,
        state.end_date,
        state.interval
    );
    Ok(state)
}

/// [`resolve_filter`] against the local current date.
pub fn resolve_filter_now(mode: FilterMode, custom: Option<CustomRange>) -> Result<FilterState> {
    resolve_filter(mode, Local::now().date_naive(), custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today() {
        let today = date(2024, 3, 6);
        let state = resolve_filter(FilterMode::Today, today, None).unwrap();
        assert_eq!(state.start_date, today);
        assert_eq!(state.end_date, today);
        assert_eq!(state.interval, Interval::Day);
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // Wednesday
        let state = resolve_filter(FilterMode::Week, date(2024, 3, 6), None).unwrap();
        assert_eq!(state.start_date, date(2024, 3, 3));
        assert_eq!(state.end_date, date(2024, 3, 9));
        assert_eq!(state.interval, Interval::Day);

        // Sunday is its own start
        let state = resolve_filter(FilterMode::Week, date(2024, 3, 10), None).unwrap();
        assert_eq!(state.start_date, date(2024, 3, 10));
    }

    #[test]
    fn test_month_and_year() {
        let state = resolve_filter(FilterMode::Month, date(2024, 2, 14), None).unwrap();
        assert_eq!(state.start_date, date(2024, 2, 1));
        assert_eq!(state.end_date, date(2024, 2, 29));
        assert_eq!(state.interval, Interval::Week);

        let state = resolve_filter(FilterMode::Year, date(2024, 2, 14), None).unwrap();
        assert_eq!(state.start_date, date(2024, 1, 1));
        assert_eq!(state.end_date, date(2024, 12, 31));
        assert_eq!(state.interval, Interval::Month);
    }

    #[test]
    fn test_custom_range() {
        let custom = CustomRange::new(date(2024, 1, 1), date(2024, 3, 31), Interval::Week);
        let state = resolve_filter(FilterMode::Custom, date(2024, 6, 1), Some(custom)).unwrap();
        assert_eq!(state.start_date, date(2024, 1, 1));
        assert_eq!(state.end_date, date(2024, 3, 31));
        assert_eq!(state.effective_interval(), Interval::Week);
    }

    #[test]
    fn test_custom_start_after_end_fails() {
        let custom = CustomRange::new(date(2024, 3, 5), date(2024, 3, 4), Interval::Day);
        let err = resolve_filter(FilterMode::Custom, date(2024, 6, 1), Some(custom)).unwrap_err();
        assert_eq!(
            err,
            ChartError::InvalidRange {
                start: date(2024, 3, 5),
                end: date(2024, 3, 4)
            }
        );
    }

    #[test]
    fn test_custom_requires_dates_and_supported_interval() {
        assert_eq!(
            resolve_filter(FilterMode::Custom, date(2024, 6, 1), None),
            Err(ChartError::IncompleteCustomRange)
        );
        let half = CustomRange {
            start: Some(date(2024, 1, 1)),
            end: None,
            interval: Interval::Day,
        };
        assert_eq!(
            resolve_filter(FilterMode::Custom, date(2024, 6, 1), Some(half)),
            Err(ChartError::IncompleteCustomRange)
        );
        let yearly = CustomRange::new(date(2024, 1, 1), date(2024, 2, 1), Interval::Year);
        assert_eq!(
            resolve_filter(FilterMode::Custom, date(2024, 6, 1), Some(yearly)),
            Err(ChartError::UnsupportedCustomInterval(Interval::Year))
        );
    }

    #[test]
    fn test_effective_interval_overrides_presets() {
        let state = FilterState {
            mode: FilterMode::Year,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            interval: Interval::Day,
        };
        assert_eq!(state.effective_interval(), Interval::Month);
        assert_eq!(effective_interval(FilterMode::Month, Interval::Day), Interval::Week);
        assert_eq!(effective_interval(FilterMode::Today, Interval::Month), Interval::Day);
        assert_eq!(effective_interval(FilterMode::Custom, Interval::Month), Interval::Month);
    }
}
