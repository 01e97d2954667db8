//! Core types shared by the dairy dashboard crates.
//!
//! - `usage`: per-day feed usage records and the provider's response envelopes
//! - `nutrition`: per-cow daily feed schedules with nutrient breakdowns
//! - `filter`: filter modes and bucket intervals
//! - `date_range`: inclusive calendar date ranges
//! - `quantity`: lenient decimal parsing for quantities sent as strings

pub mod date_range;
pub mod error;
pub mod filter;
pub mod nutrition;
pub mod quantity;
pub mod usage;
