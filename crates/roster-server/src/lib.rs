//! Configuration and application assembly for the Roster server binary.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use axum::{Router, http::HeaderName};
use roster_api::{AppState, SessionConfig, api_router, session::DEFAULT_SESSION_HEADER};
use roster_core::store::ContactStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:           String,
  #[serde(default = "default_port")]
  pub port:           u16,
  #[serde(default = "default_store_path")]
  pub store_path:     PathBuf,
  /// Request header carrying the session user id.
  #[serde(default = "default_session_header")]
  pub session_header: String,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("roster.db") }

fn default_session_header() -> String { DEFAULT_SESSION_HEADER.to_string() }

impl ServerConfig {
  /// Read `path` (optional) layered under `ROSTER_*` environment variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ROSTER"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn session(&self) -> anyhow::Result<SessionConfig> {
    let header = HeaderName::try_from(self.session_header.as_str())
      .with_context(|| format!("invalid session header {:?}", self.session_header))?;
    Ok(SessionConfig { header })
  }

  /// The store path with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Application ──────────────────────────────────────────────────────────────

/// The full HTTP application: the API under `/api`, with request tracing.
pub fn app<S>(state: AppState<S>) -> Router
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use roster_core::{ContactService, Permission, user::NewUser};
  use roster_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  fn config() -> ServerConfig {
    ServerConfig {
      host:           default_host(),
      port:           default_port(),
      store_path:     default_store_path(),
      session_header: default_session_header(),
    }
  }

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = ServerConfig::load(Path::new("definitely-missing-roster.toml")).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.session_header, "x-session-user-id");
    assert_eq!(cfg.address(), format!("{}:8080", cfg.host));
  }

  #[test]
  fn session_header_must_be_valid() {
    let cfg = ServerConfig { session_header: "bad header".into(), ..config() };
    assert!(cfg.session().is_err());
    assert_eq!(config().session().unwrap().header, DEFAULT_SESSION_HEADER);
  }

  #[test]
  fn tilde_is_expanded() {
    let cfg = ServerConfig { store_path: PathBuf::from("roster.db"), ..config() };
    assert_eq!(cfg.resolved_store_path(), PathBuf::from("roster.db"));

    if let Ok(home) = std::env::var("HOME") {
      let cfg = ServerConfig { store_path: PathBuf::from("~/data/roster.db"), ..config() };
      assert_eq!(cfg.resolved_store_path(), PathBuf::from(home).join("data/roster.db"));
    }
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let user = store
      .add_user(NewUser { permissions: Permission::Admin, ..Default::default() })
      .await
      .unwrap();
    let state = AppState::new(
      ContactService::new(Arc::new(store)),
      config().session().unwrap(),
    );

    let req = Request::builder()
      .uri("/api/contacts/active")
      .header(DEFAULT_SESSION_HEADER, user.id.to_string())
      .body(Body::empty())
      .unwrap();
    let resp = app(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder()
      .uri("/contacts/active")
      .body(Body::empty())
      .unwrap();
    let resp = app(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
