//! folio — portfolio backend server binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Portfolio backend: static site, contact form, GitHub proxy, live
/// visitor count over SSE.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Settings file path (defaults to `folio.json` when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the static site directory.
    #[arg(long)]
    site_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = match cli.config.as_deref() {
        Some(path) => folio_settings::load_settings_from_path(path)?,
        None => folio_settings::load_settings()?,
    };
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    if let Some(site_dir) = cli.site_dir {
        settings.server.site_dir = site_dir.display().to_string();
    }

    let metrics = folio_server::metrics::install_recorder();

    let handle = folio_server::start(Arc::new(settings), Some(metrics)).await?;
    tracing::info!(port = handle.port, "folio ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    handle.stop().await;

    Ok(())
}
