use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::ClientError;
use crate::traits::InventorySource;

const STATUS_PATH: &str = "/api/inventory/status";

#[derive(Debug, Clone)]
pub struct InventoryApiConfig {
  pub base_url: String,
  pub api_key: Option<String>,
  pub timeout: Duration,
}

impl InventoryApiConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      api_key: None,
      timeout: Duration::from_secs(5),
    }
  }

  pub fn from_vars<F>(lookup: &F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut cfg = Self::new(lookup("INVENTORY_API_URL").unwrap_or_else(|| "http://localhost:8080".into()));
    cfg.api_key = lookup("INVENTORY_API_KEY").filter(|k| !k.trim().is_empty());
    cfg
  }
}

/// Inventory REST service: `GET /api/inventory/status?item_id=..` -> `{"quantity": n}`.
#[derive(Clone)]
pub struct InventoryApi {
  config: InventoryApiConfig,
  client: Client,
}

impl InventoryApi {
  pub fn new(config: InventoryApiConfig) -> Result<Self, ClientError> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { config, client })
  }
}

#[async_trait::async_trait]
impl InventorySource for InventoryApi {
  fn name(&self) -> &'static str {
    "inventory-api"
  }

  async fn stock_level(&self, item_id: &str) -> Result<u64, ClientError> {
    let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), STATUS_PATH);
    let mut req = self.client.get(url).query(&[("item_id", item_id)]);
    if let Some(key) = &self.config.api_key {
      req = req.header("X-API-Key", key);
    }
    let res = req.send().await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      return Err(ClientError::Api { status, body });
    }

    let body: Value = res.json().await?;
    quantity(&body)
  }
}

/// Non-negative `quantity`; fractional values truncate.
fn quantity(body: &Value) -> Result<u64, ClientError> {
  match body.get("quantity").and_then(Value::as_f64) {
    Some(q) if q.is_finite() && q >= 0.0 => Ok(q.trunc() as u64),
    _ => Err(ClientError::InvalidResponse(format!(
      "'quantity' field was missing, null, or invalid in response: {}",
      body
    ))),
  }
}
