//! `usage` subcommand: one filter change through the dashboard pipeline.

use crate::file::FileUsageProvider;
use crate::http::HttpUsageProvider;
use crate::render::JsonRenderer;
use crate::{FilterArgs, SourceArgs};
use dairy_chart::{
    ChartRenderer, Dashboard, FilterState, Refresh, SeriesSelection, UsageProvider, ViewState,
    ZoomState,
};
use log::{info, warn};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct UsageOptions {
    pub zoom: f64,
    pub fullscreen: bool,
    pub by_volume: bool,
    pub pretty: bool,
}

/// Resolve the filter, fetch, aggregate and print the chart view.
///
/// An invalid custom range fails here, before any request is made.
pub async fn run_usage(
    source: &SourceArgs,
    filter_args: &FilterArgs,
    options: UsageOptions,
) -> anyhow::Result<()> {
    let mut view = ViewState::default();
    let filter = view.select_mode(filter_args.mode, filter_args.today(), filter_args.custom_range())?;
    view.zoom = ZoomState::new(options.zoom);
    view.fullscreen = options.fullscreen;
    let selection = if options.by_volume {
        SeriesSelection::ByVolume
    } else {
        SeriesSelection::FirstSeen
    };

    info!(
        "Feed usage {} from {} to {} by {}",
        filter.mode,
        filter.start_date,
        filter.end_date,
        filter.effective_interval()
    );

    match (&source.input, &source.base_url) {
        (Some(path), _) => {
            let mut provider = FileUsageProvider::new(path);
            if let Some(catalog) = &source.nutrition_catalog {
                provider = provider.with_nutrition_catalog(catalog);
            }
            let dashboard = Dashboard::new(provider).with_selection(selection);
            render_once(&dashboard, &filter, &view, options.pretty).await
        }
        (None, Some(base_url)) => {
            let provider = HttpUsageProvider::new(
                base_url,
                source.token.clone(),
                Duration::from_secs(source.timeout_secs),
            )?;
            let dashboard = Dashboard::new(provider).with_selection(selection);
            render_once(&dashboard, &filter, &view, options.pretty).await
        }
        (None, None) => anyhow::bail!("Provide --input or --base-url (or set DAIRY_API_URL)"),
    }
}

async fn render_once<P: UsageProvider>(
    dashboard: &Dashboard<P>,
    filter: &FilterState,
    view: &ViewState,
    pretty: bool,
) -> anyhow::Result<()> {
    match dashboard.on_filter_changed(filter, view).await {
        Refresh::Applied(chart) => {
            if let Some(notice) = &chart.notice {
                warn!("{}", notice.message());
            }
            info!(
                "{} buckets, {} series, axis max {:.1}",
                chart.buckets.len(),
                chart.series.len(),
                chart.scale.axis_max
            );
            let mut renderer = JsonRenderer::new(std::io::stdout().lock(), pretty);
            renderer.render(&chart)
        }
        Refresh::Stale { seq } => {
            anyhow::bail!("Request #{} was superseded before it completed", seq)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dairy_feed::filter::{FilterMode, Interval};

    fn source(input: Option<String>) -> SourceArgs {
        SourceArgs {
            input,
            base_url: None,
            token: None,
            nutrition_catalog: None,
            timeout_secs: 5,
        }
    }

    fn filter(mode: FilterMode, start: u32, end: u32) -> FilterArgs {
        FilterArgs {
            mode,
            start: NaiveDate::from_ymd_opt(2024, 3, start),
            end: NaiveDate::from_ymd_opt(2024, 3, end),
            interval: Interval::Day,
            today: NaiveDate::from_ymd_opt(2024, 3, 6),
        }
    }

    fn options() -> UsageOptions {
        UsageOptions {
            zoom: 1.0,
            fullscreen: false,
            by_volume: false,
            pretty: false,
        }
    }

    #[tokio::test]
    async fn test_invalid_range_fails_before_source_check() {
        let err = run_usage(&source(None), &filter(FilterMode::Custom, 10, 1), options())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("must not be after"));
    }

    #[tokio::test]
    async fn test_missing_source_is_reported() {
        let err = run_usage(&source(None), &filter(FilterMode::Week, 1, 1), options())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("--base-url"));
    }

    #[tokio::test]
    async fn test_missing_fixture_renders_failure_notice() {
        let input = Some("/nonexistent/dairy-usage.json".to_string());
        let result = run_usage(&source(input), &filter(FilterMode::Week, 1, 1), options()).await;
        assert!(result.is_ok());
    }
}
