//! Dairy CLI - feed usage charts and nutrition summaries from the dashboard API.

use clap::Parser;

#[derive(Parser)]
#[command(name = "dairy-cli", version, about = "Dairy feed usage dashboard toolkit")]
struct Cli {
    #[command(subcommand)]
    command: dairy_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("dairy-cli {}", env!("CARGO_PKG_VERSION"));
    dairy_cmd::run(cli.command).await
}
