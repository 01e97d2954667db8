use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The period the user asked to see.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    Today,
    Week,
    Month,
    Year,
    Custom,
}

/// Width of a chart bucket.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Day,
    Week,
    Month,
    Year,
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Today => "today",
            FilterMode::Week => "week",
            FilterMode::Month => "month",
            FilterMode::Year => "year",
            FilterMode::Custom => "custom",
        }
    }
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Day => "day",
            Interval::Week => "week",
            Interval::Month => "month",
            Interval::Year => "year",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(FilterMode::Today),
            "week" => Ok(FilterMode::Week),
            "month" => Ok(FilterMode::Month),
            "year" => Ok(FilterMode::Year),
            "custom" => Ok(FilterMode::Custom),
            _ => Err(ParseError::UnknownFilterMode(s.to_string())),
        }
    }
}

impl FromStr for Interval {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Interval::Day),
            "week" => Ok(Interval::Week),
            "month" => Ok(Interval::Month),
            "year" => Ok(Interval::Year),
            _ => Err(ParseError::UnknownInterval(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("week".parse::<FilterMode>().unwrap(), FilterMode::Week);
        assert_eq!("Custom".parse::<FilterMode>().unwrap(), FilterMode::Custom);
        assert_eq!(
            "fortnight".parse::<FilterMode>(),
            Err(ParseError::UnknownFilterMode("fortnight".to_string()))
        );
    }

    #[test]
    fn test_parse_intervals() {
        assert_eq!("month".parse::<Interval>().unwrap(), Interval::Month);
        assert!("hour".parse::<Interval>().is_err());
        assert_eq!(Interval::Week.to_string(), "week");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&FilterMode::Year).unwrap();
        assert_eq!(json, "\"year\"");
        let interval: Interval = serde_json::from_str("\"day\"").unwrap();
        assert_eq!(interval, Interval::Day);
    }
}
