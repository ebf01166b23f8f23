//! HTTP server wiring for the patient registry.
//!
//! Mounts the [`patient_api`] router under `/api` with request tracing, and
//! loads [`ServerConfig`] from defaults, an optional TOML file and
//! `PATIENTS_*` environment variables.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use patient_core::{PatientService, PatientStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

/// Layer defaults, the file at `path` (if present) and `PATIENTS_*`
/// environment variables, later sources winning.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 4000_i64)?
    .set_default("store_path", "patients.db")?
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("PATIENTS"))
    .build()?
    .try_deserialize()
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

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router over `store`.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: PatientStore + 'static,
{
  let service = Arc::new(PatientService::new(store));
  Router::new()
    .nest("/api", patient_api::api_router(service))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
