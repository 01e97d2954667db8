use chrono::NaiveDate;
use dairy_utils::dates::format_date;
use serde::{Deserialize, Serialize};
use std::mem::replace;

/// An inclusive calendar date range.
///
/// Iterating yields each date from the start date through the end date.
#[derive(Clone, Eq, PartialEq, Copy, Debug, Serialize, Deserialize)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl DateRange {
    pub fn start(&self) -> NaiveDate {
        self.0
    }

    pub fn end(&self) -> NaiveDate {
        self.1
    }

    /// Whether `date` falls within the range, both ends included.
    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.0 <= *date && *date <= self.1
    }

    /// Query parameters understood by the usage endpoint.
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("start_date", format_date(&self.0)),
            ("end_date", format_date(&self.1)),
        ]
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0.succ_opt()?;
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }
}
