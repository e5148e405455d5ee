use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, ConfigError};
use crate::normalize;
use crate::traits::SupplierGraph;
use crate::types::SupplierRecord;

const SUPPLIER_QUERY: &str = "\
MATCH (s:Supplier {id: $supplier_id})
OPTIONAL MATCH (s)-[:HAS_INCIDENT]->(inc:Incident)
WITH s, collect(inc {.*}) AS incidents
RETURN s {.*, incidents: incidents} AS supplier";

#[derive(Debug, Clone)]
pub struct Neo4jConfig {
  pub base_url: String,
  pub database: String,
  pub user: String,
  pub password: String,
  pub timeout: Duration,
}

impl Neo4jConfig {
  pub fn new(base_url: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      database: "neo4j".to_string(),
      user: user.into(),
      password: password.into(),
      timeout: Duration::from_secs(10),
    }
  }

  pub fn from_vars<F>(lookup: &F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut cfg = Self::new(
      lookup("NEO4J_HTTP_URL").unwrap_or_else(|| "http://localhost:7474".into()),
      lookup("NEO4J_USER").unwrap_or_else(|| "neo4j".into()),
      lookup("NEO4J_PASSWORD").unwrap_or_else(|| "test".into()),
    );
    if let Some(db) = lookup("NEO4J_DATABASE").filter(|d| !d.trim().is_empty()) {
      cfg.database = db;
    }
    cfg
  }
}

/// Supplier graph backed by the Neo4j HTTP transactional endpoint.
#[derive(Clone)]
pub struct Neo4jGraph {
  config: Neo4jConfig,
  client: Client,
}

impl Neo4jGraph {
  pub fn new(config: Neo4jConfig) -> Result<Self, ClientError> {
    if config.base_url.trim().is_empty() {
      return Err(ConfigError::invalid("neo4j.base_url", "must not be empty").into());
    }
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { config, client })
  }

  fn endpoint(&self) -> String {
    format!(
      "{}/db/{}/tx/commit",
      self.config.base_url.trim_end_matches('/'),
      self.config.database
    )
  }
}

#[async_trait::async_trait]
impl SupplierGraph for Neo4jGraph {
  fn name(&self) -> &'static str {
    "neo4j"
  }

  async fn supplier(&self, supplier_id: &str) -> Result<Option<SupplierRecord>, ClientError> {
    let payload = serde_json::json!({
      "statements": [{
        "statement": SUPPLIER_QUERY,
        "parameters": {"supplier_id": supplier_id},
      }]
    });

    let res = self
      .client
      .post(self.endpoint())
      .basic_auth(&self.config.user, Some(&self.config.password))
      .json(&payload)
      .send()
      .await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      return Err(ClientError::Api { status, body });
    }

    let parsed: TxResponse = res.json().await?;
    supplier_from_response(supplier_id, parsed)
  }
}

fn supplier_from_response(supplier_id: &str, parsed: TxResponse) -> Result<Option<SupplierRecord>, ClientError> {
  if let Some(err) = parsed.errors.first() {
    return Err(ClientError::InvalidResponse(format!("{}: {}", err.code, err.message)));
  }
  let row = parsed
    .results
    .into_iter()
    .next()
    .and_then(|r| r.data.into_iter().next())
    .and_then(|d| d.row.into_iter().next());

  match row {
    None | Some(Value::Null) => Ok(None),
    Some(v) if v.is_object() => Ok(Some(normalize::supplier(supplier_id, &v))),
    Some(other) => Err(ClientError::InvalidResponse(format!(
      "expected supplier map, got {}",
      other
    ))),
  }
}

#[derive(Debug, Deserialize)]
struct TxResponse {
  #[serde(default)]
  results: Vec<TxResult>,
  #[serde(default)]
  errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
  #[serde(default)]
  data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
struct TxRow {
  #[serde(default)]
  row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
  #[serde(default)]
  code: String,
  #[serde(default)]
  message: String,
}
