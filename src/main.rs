//! Authentication Settings Console - Main Entry Point

use anyhow::Context;
use authcfg_console::app::application::run_app;
use authcfg_console::connection::select_profile;
use authcfg_console::constants::LOG_FILE_PREFIX;
use authcfg_console::helpers::{get_or_create_data_dir, is_development};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let default_level = if is_development() {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let log_dir = get_or_create_data_dir().context("Failed to create data directory")?;
    let (file_writer, _guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(default_level.into())
                        .from_env_lossy(),
                ),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::DEBUG.into())
                        .from_env_lossy(),
                ),
        )
        .init();

    tracing::info!("Starting authentication settings console...");

    let profile = select_profile().context("Failed to load connection profile")?;
    run_app(profile).await.context("Console session failed")?;

    Ok(())
}
