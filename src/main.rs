use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u_filter::{
    config::Config,
    pipeline::{PlaylistPipeline, PlaylistSource},
    utils::url::UrlUtils,
};

#[derive(Parser)]
#[command(name = "m3u-filter")]
#[command(version)]
#[command(about = "Fetches an IPTV M3U playlist and writes a curated copy")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (falls back to $CONFIG_FILE, then config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Source playlist URL (overrides config file)
    #[arg(short = 'u', long, value_name = "URL", conflicts_with = "input")]
    source_url: Option<String>,

    /// Read the source playlist from a local file instead of fetching it
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output playlist path (overrides config file)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the run summary
    let log_filter = format!("m3u_filter={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting m3u-filter v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    // Override config with CLI arguments
    if let Some(url) = cli.source_url {
        config.source.url = UrlUtils::normalize_scheme(&url);
    }
    if let Some(output) = cli.output {
        config.output.path = output;
    }
    config.validate().context("invalid configuration")?;

    let mut pipeline = PlaylistPipeline::from_config(&config);
    if let Some(input) = cli.input {
        pipeline = pipeline.with_source(PlaylistSource::File(input));
    }

    let outcome = pipeline.run().await.map_err(|e| {
        error!("Playlist generation failed: {}", e);
        e
    })?;

    println!(
        "Generated {} with {} channels",
        outcome.output_path.display(),
        outcome.channel_count
    );
    Ok(())
}
