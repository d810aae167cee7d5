//! HTTP host for Agora.
//!
//! Mounts the [`agora_api`] router under `/api` and wraps it with CORS and
//! request tracing. Configuration and seeding live here so the `server`
//! binary stays a thin shell.

pub mod seed;

use std::path::PathBuf;

use agora_core::{ArgumentationService, store::GraphStore};
use axum::{
  Router,
  http::{HeaderValue, Method},
};
use serde::Deserialize;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `AGORA_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  pub store_path:   PathBuf,
  /// Allowed browser origins. A single `"*"` allows any origin.
  pub cors_origins: Vec<String>,
  /// JSON graph loaded at startup, if any.
  pub seed_path:    Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:         "127.0.0.1".into(),
      port:         8081,
      store_path:   PathBuf::from("agora.sqlite3"),
      cors_origins: vec!["http://localhost:4200".into()],
      seed_path:    None,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application: API under `/api`, CORS, request tracing.
pub fn app<S>(
  service: ArgumentationService<S>,
  config: &ServerConfig,
) -> anyhow::Result<Router>
where
  S: GraphStore + 'static,
{
  Ok(
    Router::new()
      .nest("/api", agora_api::api_router(service))
      .layer(cors_layer(&config.cors_origins)?)
      .layer(TraceLayer::new_for_http()),
  )
}

fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
  let layer = CorsLayer::new()
    .allow_methods([
      Method::GET,
      Method::POST,
      Method::PUT,
      Method::DELETE,
      Method::OPTIONS,
    ])
    .allow_headers(Any);

  if origins.iter().any(|o| o == "*") {
    return Ok(layer.allow_origin(Any));
  }

  let origins = origins
    .iter()
    .map(|o| {
      o.parse::<HeaderValue>()
        .map_err(|e| anyhow::anyhow!("invalid CORS origin {o:?}: {e}"))
    })
    .collect::<anyhow::Result<Vec<_>>>()?;
  Ok(layer.allow_origin(origins))
}
