//! Lenient decimal decoding for provider quantities.
//!
//! The usage endpoint formats kilograms as fixed-point strings (`"5.00"`),
//! other endpoints send plain numbers. Both decode to `f64`; a missing or
//! unparseable value counts as zero, and negatives are clamped to zero.

use serde::{de, Deserializer};
use std::fmt;

/// Deserialize a non-negative quantity from a number, numeric string or null.
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(QuantityVisitor)
}

struct QuantityVisitor;

impl<'de> de::Visitor<'de> for QuantityVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(sanitize(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(sanitize(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(sanitize(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        Ok(parse_lenient(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }
}

/// Parse a quantity string, treating anything unparseable as zero.
pub fn parse_lenient(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(v) => sanitize(v),
        Err(_) => {
            log::debug!("unparseable quantity {:?}, counting as 0", s);
            0.0
        }
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}
