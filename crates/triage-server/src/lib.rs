//! HTTP server assembly for the triage queue.
//!
//! Mounts the JSON API under `/api`, optionally serves a static front-end
//! directory at `/`, and wraps everything in request tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};
use triage_core::{desk::TriageDesk, queue::QueueConfig, store::PatientStore};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `TRIAGE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub store_path:          PathBuf,
  /// Assumed minutes to fully service one patient; drives wait estimates.
  pub avg_service_minutes: u32,
  /// Directory of static front-end files served at `/`.
  pub static_dir:          Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                "127.0.0.1".to_string(),
      port:                3000,
      store_path:          PathBuf::from("triage.db"),
      avg_service_minutes: QueueConfig::DEFAULT_AVG_SERVICE_MINUTES,
      static_dir:          None,
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `TRIAGE_*` environment
  /// variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("TRIAGE"))
      .build()?
      .try_deserialize()
  }

  pub fn queue_config(&self) -> QueueConfig {
    QueueConfig::new(self.avg_service_minutes)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the top-level axum [`Router`].
pub fn router<S>(desk: Arc<TriageDesk<S>>, static_dir: Option<&Path>) -> Router
where
  S: PatientStore + 'static,
{
  let app = Router::new().nest("/api", triage_api::api_router(desk));
  let app = match static_dir {
    Some(dir) => app.fallback_service(ServeDir::new(dir)),
    None => app,
  };
  app.layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use tower::ServiceExt as _;
  use triage_store_sqlite::SqliteStore;

  async fn desk() -> Arc<TriageDesk<SqliteStore>> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    Arc::new(TriageDesk::new(store, QueueConfig::new(20)))
  }

  async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
  }

  #[test]
  fn defaults_apply_without_a_config_file() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/triage-config.toml")).unwrap();
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.avg_service_minutes, 20);
    assert_eq!(cfg.queue_config(), QueueConfig::new(20));
    assert!(cfg.static_dir.is_none());
  }

  #[test]
  fn config_file_overrides_defaults() {
    let dir = std::env::temp_dir().join(format!("triage-cfg-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "port = 8080\navg_service_minutes = 15\n").unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.avg_service_minutes, 15);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.address(), "127.0.0.1:8080");

    std::fs::remove_dir_all(&dir).ok();
  }

  #[test]
  fn tilde_expansion() {
    let plain = Path::new("/var/lib/triage.db");
    assert_eq!(expand_tilde(plain), plain);
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(
        expand_tilde(Path::new("~/triage.db")),
        PathBuf::from(home).join("triage.db")
      );
    }
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let app = router(desk().await, None);
    let (status, body) = get(app.clone(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"ok\":true"), "{body}");

    let (status, body) = get(app.clone(), "/api/patients").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");

    let (status, _) = get(app, "/health").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn static_dir_is_served_at_root() {
    let dir = std::env::temp_dir().join(format!("triage-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>Waiting room</h1>").unwrap();

    let app = router(desk().await, Some(&dir));
    let (status, body) = get(app.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Waiting room"));

    let (status, body) = get(app, "/api/patients").await;
    assert_eq!(status, StatusCode::OK);
    let queue: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(queue, serde_json::json!([]));

    std::fs::remove_dir_all(&dir).ok();
  }
}
