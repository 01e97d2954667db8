//! Shared utility functions for dairy dashboard crates.

/// Date utility functions
pub mod dates {
    use chrono::{Datelike, Days, NaiveDate};

    /// Wire and bucket-key date format: "YYYY-MM-DD"
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)?)
    }

    /// Most recent Sunday on or before `date`.
    ///
    /// The dashboard's "this week" runs Sunday through Saturday, which is
    /// not the ISO week used for weekly buckets.
    pub fn start_of_week_sunday(date: &NaiveDate) -> NaiveDate {
        let back = date.weekday().num_days_from_sunday() as u64;
        *date - Days::new(back)
    }

    /// First day of the month containing `date`.
    pub fn first_day_of_month(date: &NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(*date)
    }

    /// Last day of the month containing `date`.
    pub fn last_day_of_month(date: &NaiveDate) -> NaiveDate {
        let (year, month) = if date.month() == 12 {
            (date.year() + 1, 1)
        } else {
            (date.year(), date.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .unwrap_or(*date)
    }

    /// January 1st of the year containing `date`.
    pub fn first_day_of_year(date: &NaiveDate) -> NaiveDate {
        NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(*date)
    }

    /// December 31st of the year containing `date`.
    pub fn last_day_of_year(date: &NaiveDate) -> NaiveDate {
        NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(*date)
    }

}

/// Decimal rounding helpers
pub mod round {
    /// Round `value` to `places` decimal places.
    pub fn round_to(value: f64, places: u32) -> f64 {
        let factor = 10f64.powi(places as i32);
        (value * factor).round() / factor
    }

    /// Round to one decimal place, the precision of plotted kilograms.
    pub fn round_1(value: f64) -> f64 {
        round_to(value, 1)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_round_to() {
            assert_eq!(round_1(5.04), 5.0);
            assert_eq!(round_1(5.06), 5.1);
            assert_eq!(round_to(1.23456, 2), 1.23);
            assert_eq!(round_to(0.0, 2), 0.0);
        }
    }
}
