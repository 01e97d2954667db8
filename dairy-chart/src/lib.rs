//! Feed-consumption time-series aggregation for the dairy dashboard.
//!
//! This crate provides:
//! - `filter`: maps a filter mode to a concrete date range and interval
//! - `grouping`: buckets per-day records by day, ISO week, month or year
//! - `series`: picks plotted feeds and aligns their values to the buckets
//! - `scale`: axis bound, bar geometry and the zoom state machine
//! - `dashboard`: the fetch → aggregate → scale pipeline with stale-response discard
//! - `nutrition`: per-cow nutrient totals on the same bucket keys
//!
//! Everything except `dashboard` is synchronous and pure over its inputs.

pub mod dashboard;
pub mod error;
pub mod filter;
pub mod grouping;
pub mod labels;
pub mod nutrition;
pub mod scale;
pub mod series;
pub mod summary;

pub use dashboard::{ChartRenderer, ChartView, Dashboard, Notice, Refresh, UsageProvider, ViewState};
pub use error::ChartError;
pub use filter::{resolve_filter, CustomRange, FilterState};
pub use scale::{compute_scale, Scale, ZoomState};
pub use series::{aggregate, Aggregation, Series, SeriesSelection};
pub use summary::{CatalogCounts, UsageSummary};
