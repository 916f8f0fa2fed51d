//! # sonarelay
//!
//! Webhook relay that debounces per-season episode-update bursts into a
//! single downstream notification.
//!
//! Media managers fire one webhook per episode, which turns a season pack
//! import into dozens of near-simultaneous notifications. This process
//! accepts those webhooks, aggregates them per (series, season) for a
//! configurable idle window, then POSTs one composed message to the
//! configured target (typically a messenger bot API).

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use sonarelay_core::{
    dispatch::HttpDispatcher,
    relay::Relay,
    settings::{
        DEFAULT_ADDITIONAL_PARAMS, DEFAULT_CONTENT_HEADER, DEFAULT_EPISODE_FORMAT,
        DEFAULT_TEXT_CONTENT, DEFAULT_TEXT_KEY, DEFAULT_WAIT_SECONDS, RelaySettings,
    },
};
use sonarelay_server::routes;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "sonarelay")]
#[command(about = "Debounces per-season episode update bursts into one downstream notification")]
struct Cli {
    /// Address to bind the webhook listener on
    #[arg(long, env = "SONARELAY_LISTEN_ADDRESS", default_value = "::1")]
    listen_address: IpAddr,

    /// Port to bind the webhook listener on
    #[arg(long, env = "SONARELAY_LISTEN_PORT", default_value_t = 8520)]
    listen_port: u16,

    /// Seconds between the first event of a burst and its flush
    #[arg(long, env = "SONARELAY_WAIT_SECOND", default_value_t = DEFAULT_WAIT_SECONDS)]
    wait_second: u64,

    /// JSON key the composed text is injected under
    #[arg(long, env = "SONARELAY_TEXT_KEY", default_value = DEFAULT_TEXT_KEY)]
    text_key: String,

    /// Header template, rendered with {{.SeriesName}} and {{.SeasonNumber}}
    #[arg(long, env = "SONARELAY_TEXT_CONTENT", default_value = DEFAULT_TEXT_CONTENT)]
    text_content: String,

    /// Per-episode template, rendered with {{.EpisodeNumber}} and {{.EpisodeName}}
    #[arg(long, env = "SONARELAY_EPISODE_FORMAT", default_value = DEFAULT_EPISODE_FORMAT)]
    episode_format: String,

    /// Downstream URL the composed payload is POSTed to (required)
    #[arg(long, env = "SONARELAY_TARGET_URL", default_value = "")]
    target_url: String,

    /// JSON object template merged into the outbound payload, rendered with {{.SeriesId}}
    #[arg(long, env = "SONARELAY_ADDITIONAL_PARAMS", default_value = DEFAULT_ADDITIONAL_PARAMS)]
    additional_params: String,

    /// Content-Type header value for the outbound request
    #[arg(long, env = "SONARELAY_CONTENT_HEADER", default_value = DEFAULT_CONTENT_HEADER)]
    content_header: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Arc::new(RelaySettings {
        idle_window: Duration::from_secs(cli.wait_second),
        text_content: cli.text_content,
        episode_format: cli.episode_format,
        target_url: cli.target_url,
        additional_params: cli.additional_params,
        text_key: cli.text_key,
        content_header: cli.content_header,
    });

    // Fail fast: a relay that could never deliver must not accept webhooks.
    settings
        .validate()
        .context("refusing to start with invalid configuration")?;

    let dispatcher = Arc::new(HttpDispatcher::new(
        settings.target_url.clone(),
        settings.content_header.clone(),
    ));
    let relay = Arc::new(Relay::new(Arc::clone(&settings), dispatcher));
    let app = routes::router(relay);

    let address = SocketAddr::new(cli.listen_address, cli.listen_port);
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    info!(
        %address,
        wait_second = cli.wait_second,
        target_url = %settings.target_url,
        "server started"
    );

    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}
