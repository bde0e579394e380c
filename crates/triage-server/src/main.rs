//! triage-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the triage API over HTTP.
//!
//! Every setting can be overridden with a `TRIAGE_`-prefixed environment
//! variable, e.g. `TRIAGE_AVG_SERVICE_MINUTES=15`.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use triage_core::desk::TriageDesk;
use triage_server::{ServerConfig, expand_tilde};
use triage_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Emergency department triage queue server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let queue_config = server_cfg.queue_config();
  tracing::info!(
    avg_service_minutes = queue_config.avg_service_minutes,
    store = %store_path.display(),
    "triage desk ready"
  );
  let desk = Arc::new(TriageDesk::new(store, queue_config));

  let static_dir = server_cfg.static_dir.as_deref().map(expand_tilde);
  let app = triage_server::router(desk, static_dir.as_deref());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
