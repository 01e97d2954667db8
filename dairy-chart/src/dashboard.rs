//! The usage view pipeline: fetch → aggregate → scale, one pass per filter change.
//!
//! Provider and renderer sit behind narrow traits so this crate carries no
//! HTTP or drawing dependency. Every pass is tagged with a sequence number
//! taken before fetching; a response that arrives after a newer pass has
//! started is discarded instead of overwriting the newer view.

use crate::error::Result;
use crate::filter::{resolve_filter, CustomRange, FilterState};
use crate::labels::category_labels;
use crate::scale::{compute_scale, min_chart_width, Scale, ZoomState};
use crate::series::{aggregate_with, SeriesSelection, Series};
use crate::summary::{CatalogCounts, UsageSummary};
use chrono::NaiveDate;
use dairy_feed::date_range::DateRange;
use dairy_feed::filter::{FilterMode, Interval};
use dairy_feed::nutrition::NutritionType;
use dairy_feed::usage::{FeedType, UsageRecord};
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// Message attached to a successful fetch that returned no records.
pub const EMPTY_RESULT_MESSAGE: &str = "No feed usage data for this date range.";

/// Source of raw per-day usage records.
///
/// Timeouts and retries belong to the implementation.
pub trait UsageProvider {
    type Error: Display;

    fn fetch_usage(
        &self,
        range: DateRange,
    ) -> impl Future<Output = std::result::Result<Vec<UsageRecord>, Self::Error>> + Send;

    /// Feed-type catalog; only its length is shown.
    fn fetch_feed_types(
        &self,
    ) -> impl Future<Output = std::result::Result<Vec<FeedType>, Self::Error>> + Send;

    /// Nutrient catalog; only its length is shown.
    fn fetch_nutritions(
        &self,
    ) -> impl Future<Output = std::result::Result<Vec<NutritionType>, Self::Error>> + Send;
}

/// Consumer of finished chart views.
pub trait ChartRenderer {
    type Error;

    fn render(&mut self, view: &ChartView) -> std::result::Result<(), Self::Error>;
}

/// UI-scale state passed in by the caller; never triggers a refetch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewState {
    pub zoom: ZoomState,
    pub fullscreen: bool,
}

impl ViewState {
    /// Resolve a newly selected mode and reset zoom to 1.0.
    ///
    /// Zoom is left untouched when resolution fails.
    pub fn select_mode(
        &mut self,
        mode: FilterMode,
        today: NaiveDate,
        custom: Option<CustomRange>,
    ) -> Result<FilterState> {
        let filter = resolve_filter(mode, today, custom)?;
        self.zoom.reset();
        Ok(filter)
    }
}

/// Informational message shown with a view; never a failure of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notice {
    /// Fetch succeeded with zero records in range.
    Empty,
    /// Fetch failed; the view is rendered over no data.
    ProviderFailure(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Empty => EMPTY_RESULT_MESSAGE,
            Notice::ProviderFailure(message) => message,
        }
    }
}

/// Everything the renderer needs for one usage chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub filter: FilterState,
    pub interval: Interval,
    /// Bucket keys, ascending.
    pub buckets: Vec<String>,
    /// Display labels aligned with `buckets`.
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub data_max: f64,
    pub scale: Scale,
    pub min_width_px: u32,
    pub summary: UsageSummary,
    pub notice: Option<Notice>,
}

impl ChartView {
    /// Build a view from already-fetched records.
    pub fn build(
        filter: &FilterState,
        records: &[UsageRecord],
        view: &ViewState,
        selection: SeriesSelection,
        catalog: CatalogCounts,
        notice: Option<Notice>,
    ) -> Self {
        let interval = filter.effective_interval();
        let aggregation = aggregate_with(records, filter, selection);
        let categories = category_labels(&aggregation.buckets, interval);
        Self {
            filter: *filter,
            interval,
            min_width_px: min_chart_width(categories.len()),
            scale: compute_scale(aggregation.data_max, view.zoom.level(), view.fullscreen),
            buckets: aggregation.buckets,
            categories,
            series: aggregation.series,
            data_max: aggregation.data_max,
            summary: UsageSummary::from_records(records, catalog),
            notice,
        }
    }

    /// Same data under a new zoom level or fullscreen setting.
    pub fn rescaled(&self, view: &ViewState) -> Self {
        Self {
            scale: compute_scale(self.data_max, view.zoom.level(), view.fullscreen),
            ..self.clone()
        }
    }

    pub fn has_data(&self) -> bool {
        !self.series.is_empty()
    }
}

/// Outcome of one pipeline pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Refresh {
    Applied(ChartView),
    /// A newer pass started while this one was fetching.
    Stale { seq: u64 },
}

/// Monotonic counter identifying the latest issued request.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    /// Take the next number; it becomes the only current one.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }
}

/// Drives the usage chart from filter changes.
pub struct Dashboard<P> {
    provider: P,
    sequence: RequestSequence,
    selection: SeriesSelection,
}

impl<P: UsageProvider> Dashboard<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            sequence: RequestSequence::default(),
            selection: SeriesSelection::default(),
        }
    }

    pub fn with_selection(mut self, selection: SeriesSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Supersede any in-flight pass without starting a new one.
    pub fn invalidate(&self) -> u64 {
        self.sequence.issue()
    }

    /// Apply a mode or range change from the caller.
    ///
    /// In-flight passes become stale even when the new filter fails to
    /// resolve, so an older range is never shown under an invalid selection.
    pub fn select_mode(
        &self,
        view: &mut ViewState,
        mode: FilterMode,
        today: NaiveDate,
        custom: Option<CustomRange>,
    ) -> Result<FilterState> {
        let seq = self.invalidate();
        view.select_mode(mode, today, custom).inspect_err(|e| {
            log::info!("filter change #{} rejected: {}", seq, e);
        })
    }

    /// Fetch, aggregate and scale for `filter`.
    ///
    /// Provider failures become an empty view carrying the message. Returns
    /// [`Refresh::Stale`] if another call began before this fetch finished.
    pub async fn on_filter_changed(&self, filter: &FilterState, view: &ViewState) -> Refresh {
        let seq = self.sequence.issue();
        log::debug!(
            "request #{} for {}..={}",
            seq,
            filter.start_date,
            filter.end_date
        );

        let (usage, feed_types, nutritions) = futures::join!(
            self.provider.fetch_usage(filter.range()),
            self.provider.fetch_feed_types(),
            self.provider.fetch_nutritions()
        );

        if !self.sequence.is_current(seq) {
            log::info!("discarding stale response for request #{}", seq);
            return Refresh::Stale { seq };
        }

        let (records, notice) = match usage {
            Ok(records) if records.is_empty() => (records, Some(Notice::Empty)),
            Ok(records) => (records, None),
            Err(e) => {
                log::warn!("feed usage fetch failed: {}", e);
                (Vec::new(), Some(Notice::ProviderFailure(e.to_string())))
            }
        };
        let catalog = CatalogCounts {
            feed_types: catalog_len(feed_types, "feed type"),
            nutritions: catalog_len(nutritions, "nutrient"),
        };
        log::debug!("request #{} received {} records", seq, records.len());

        Refresh::Applied(ChartView::build(
            filter,
            &records,
            view,
            self.selection,
            catalog,
            notice,
        ))
    }
}

fn catalog_len<T, E: Display>(fetched: std::result::Result<Vec<T>, E>, what: &str) -> usize {
    match fetched {
        Ok(entries) => entries.len(),
        Err(e) => {
            log::warn!("{} catalog fetch failed: {}", what, e);
            0
        }
    }
}
