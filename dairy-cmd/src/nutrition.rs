//! `nutrition` and `cows` subcommands.

use crate::file::parse_daily_feeds_json;
use crate::http::HttpUsageProvider;
use crate::render::JsonRenderer;
use crate::{FilterArgs, SourceArgs};
use dairy_chart::nutrition::{summarize_nutrition, unique_cows};
use dairy_feed::date_range::DateRange;
use dairy_feed::nutrition::DailyFeed;
use log::info;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct NutritionOutput {
    cow_id: i64,
    categories: Vec<String>,
    series: Vec<dairy_chart::nutrition::NutritionSeries>,
    periods: Vec<dairy_chart::nutrition::NutritionPeriod>,
}

async fn load_daily_feeds(source: &SourceArgs, range: DateRange) -> anyhow::Result<Vec<DailyFeed>> {
    let mut feeds = match (&source.input, &source.base_url) {
        (Some(path), _) => {
            let body = tokio::fs::read_to_string(path).await?;
            parse_daily_feeds_json(&body)?
        }
        (None, Some(base_url)) => {
            let provider = HttpUsageProvider::new(
                base_url,
                source.token.clone(),
                Duration::from_secs(source.timeout_secs),
            )?;
            provider.fetch_daily_feeds(range).await?
        }
        (None, None) => anyhow::bail!("Provide --input or --base-url (or set DAIRY_API_URL)"),
    };
    feeds.retain(|feed| range.contains(&feed.date));
    info!("Loaded {} daily feed schedules", feeds.len());
    Ok(feeds)
}

pub async fn run_nutrition(
    source: &SourceArgs,
    filter_args: &FilterArgs,
    cow_id: i64,
    pretty: bool,
) -> anyhow::Result<()> {
    let filter = filter_args.resolve()?;
    let feeds = load_daily_feeds(source, filter.range()).await?;
    let summary = summarize_nutrition(&feeds, cow_id, &filter);
    if summary.periods.is_empty() {
        info!("No feed schedules for cow {} in this date range", cow_id);
    }
    let output = NutritionOutput {
        cow_id,
        categories: summary.categories(),
        series: summary.series(),
        periods: summary.periods,
    };
    JsonRenderer::new(std::io::stdout().lock(), pretty).write_value(&output)
}

pub async fn run_cows(source: &SourceArgs, filter_args: &FilterArgs) -> anyhow::Result<()> {
    let filter = filter_args.resolve()?;
    let feeds = load_daily_feeds(source, filter.range()).await?;
    for cow in unique_cows(&feeds) {
        println!("{}\t{}", cow.id, cow.name);
    }
    Ok(())
}
