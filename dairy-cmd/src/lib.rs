//! Command implementations for the dairy dashboard CLI.
//!
//! Provides providers (HTTP and local fixture), a JSON renderer, and the
//! subcommands that drive the aggregation core.

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use dairy_chart::{resolve_filter, CustomRange, FilterState};
use dairy_feed::filter::{FilterMode, Interval};

pub mod error;
pub mod file;
pub mod http;
pub mod nutrition;
pub mod render;
pub mod usage;

/// Where usage records come from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Local fixture (.json envelope or .csv rows) instead of the API
    #[arg(short, long)]
    pub input: Option<String>,

    /// Base URL of the dashboard API, e.g. http://localhost:5000/api
    #[arg(long, env = "DAIRY_API_URL")]
    pub base_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, env = "DAIRY_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Nutrient catalog (.json) counted beside a local --input fixture
    #[arg(long, requires = "input")]
    pub nutrition_catalog: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Which period to show.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// today, week, month, year or custom
    #[arg(short, long, default_value = "week")]
    pub mode: FilterMode,

    /// Custom range start (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Custom range end (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Bucket width for a custom range: day, week or month
    #[arg(long, default_value = "day")]
    pub interval: Interval,

    /// Treat this date as today (defaults to the local date)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn custom_range(&self) -> Option<CustomRange> {
        (self.mode == FilterMode::Custom).then_some(CustomRange {
            start: self.start,
            end: self.end,
            interval: self.interval,
        })
    }

    pub fn resolve(&self) -> anyhow::Result<FilterState> {
        Ok(resolve_filter(self.mode, self.today(), self.custom_range())?)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the feed usage chart for a period as JSON
    Usage {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Zoom level between 0.4 and 2.5
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,

        /// Use the fullscreen chart height
        #[arg(long)]
        fullscreen: bool,

        /// Plot the five largest feeds instead of the first five seen
        #[arg(long)]
        by_volume: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Summarize nutrients fed to one cow as JSON
    Nutrition {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Cow ID to summarize
        #[arg(long)]
        cow: i64,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List cows present in the daily feed schedules of a period
    Cows {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Usage {
            source,
            filter,
            zoom,
            fullscreen,
            by_volume,
            pretty,
        } => {
            let options = usage::UsageOptions {
                zoom,
                fullscreen,
                by_volume,
                pretty,
            };
            usage::run_usage(&source, &filter, options).await
        }
        Command::Nutrition {
            source,
            filter,
            cow,
            pretty,
        } => nutrition::run_nutrition(&source, &filter, cow, pretty).await,
        Command::Cows { source, filter } => nutrition::run_cows(&source, &filter).await,
    }
}
