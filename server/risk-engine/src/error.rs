//! Structured error types for the risk engine and its collaborators.

use thiserror::Error;

/// Errors surfaced to callers of an evaluation.
#[derive(Debug, Error)]
pub enum EngineError {
  #[error("supplier {supplier_id} not found")]
  NotFound { supplier_id: String },

  #[error(transparent)]
  Config(#[from] ConfigError),
}

impl EngineError {
  pub fn not_found(supplier_id: &str) -> Self {
    Self::NotFound {
      supplier_id: supplier_id.to_string(),
    }
  }
}

/// Setup-time configuration problems. Raised before any evaluation runs.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config: {field}: {reason}")]
  Invalid { field: String, reason: String },
}

impl ConfigError {
  pub fn invalid(field: &str, reason: &str) -> Self {
    Self::Invalid {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}

/// Failures of an external collaborator call (graph, geocoder, weather, inventory).
///
/// These never abort an evaluation; the engine absorbs them into fallback scores.
#[derive(Debug, Error)]
pub enum ClientError {
  #[error("configuration error: {0}")]
  Config(String),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("serialization error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("collaborator returned invalid response: {0}")]
  InvalidResponse(String),

  #[error("collaborator API error: status={status}, body={body}")]
  Api { status: u16, body: String },
}

impl From<ConfigError> for ClientError {
  fn from(e: ConfigError) -> Self {
    Self::Config(e.to_string())
  }
}
