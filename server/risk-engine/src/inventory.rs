//! Inventory risk: classify a stock level into a 1-5 tier.
//!
//! Standalone; the composite supplier score does not include it.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;
use crate::signal::{bounded, Degradation, Outcome};
use crate::traits::InventorySource;

/// Stock thresholds: at or above `low_risk_min` is safe, at or below `high_risk_max` is critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryThresholds {
  pub low_risk_min: u64,
  pub high_risk_max: u64,
}

impl Default for InventoryThresholds {
  fn default() -> Self {
    Self {
      low_risk_min: 100,
      high_risk_max: 20,
    }
  }
}

impl InventoryThresholds {
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.high_risk_max == 0 {
      return Err(ConfigError::invalid("inventory.high_risk_max", "must be greater than zero"));
    }
    if self.high_risk_max >= self.low_risk_min {
      return Err(ConfigError::invalid(
        "inventory.high_risk_max",
        "must be below inventory.low_risk_min",
      ));
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InventoryTier {
  Safe = 1,
  LowMedium = 2,
  Medium = 3,
  High = 4,
  Critical = 5,
}

impl InventoryTier {
  pub fn level(self) -> u8 {
    self as u8
  }

  pub fn from_level(level: u8) -> Option<Self> {
    match level {
      1 => Some(Self::Safe),
      2 => Some(Self::LowMedium),
      3 => Some(Self::Medium),
      4 => Some(Self::High),
      5 => Some(Self::Critical),
      _ => None,
    }
  }

  pub fn status(self) -> &'static str {
    match self {
      Self::Critical => "Critical: Stock is severely low, immediate reorder required.",
      Self::High => "High Risk: Stock is low, needs urgent attention and review.",
      Self::Medium => "Medium Risk: Stock is approaching reorder level, monitor closely.",
      Self::LowMedium => "Low Risk: Stock is healthy but below ideal safety buffer.",
      Self::Safe => "Safe: Stock is at optimal level, no action required.",
    }
  }
}

/// A tier, or the distinct "unavailable" state when stock could not be read.
///
/// Serialized as the tier number or the string `"unavailable"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryRisk {
  Tier(InventoryTier),
  Unavailable,
}

impl Serialize for InventoryRisk {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Self::Tier(t) => serializer.serialize_u8(t.level()),
      Self::Unavailable => serializer.serialize_str("unavailable"),
    }
  }
}

impl<'de> Deserialize<'de> for InventoryRisk {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let v = serde_json::Value::deserialize(deserializer)?;
    match &v {
      serde_json::Value::String(s) if s == "unavailable" => Ok(Self::Unavailable),
      serde_json::Value::Number(n) => n
        .as_u64()
        .and_then(|l| u8::try_from(l).ok())
        .and_then(InventoryTier::from_level)
        .map(Self::Tier)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid risk tier {}", n))),
      other => Err(serde::de::Error::custom(format!("invalid risk tier {}", other))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
  Api,
  Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRiskResult {
  pub item_id: String,
  /// `None` when the stock level could not be retrieved.
  pub stock_level: Option<u64>,
  pub risk_tier: InventoryRisk,
  pub status: String,
  pub data_source: DataSource,
  pub thresholds: InventoryThresholds,
}

/// First match wins: critical, high, medium, low-medium, safe.
pub fn classify(stock: u64, thresholds: &InventoryThresholds) -> InventoryTier {
  let stock = stock as f64;
  let high_max = thresholds.high_risk_max as f64;
  let low_min = thresholds.low_risk_min as f64;

  if stock <= high_max {
    InventoryTier::Critical
  } else if stock <= high_max * 1.5 {
    InventoryTier::High
  } else if stock <= low_min / 2.0 {
    InventoryTier::Medium
  } else if stock < low_min {
    InventoryTier::LowMedium
  } else {
    InventoryTier::Safe
  }
}

/// Fetches stock levels and classifies them.
#[derive(Clone)]
pub struct InventoryMonitor {
  source: Arc<dyn InventorySource>,
  thresholds: InventoryThresholds,
  timeout: Duration,
}

impl InventoryMonitor {
  pub fn new(
    source: Arc<dyn InventorySource>,
    thresholds: InventoryThresholds,
    timeout: Duration,
  ) -> Result<Self, ConfigError> {
    thresholds.validate()?;
    Ok(Self {
      source,
      thresholds,
      timeout,
    })
  }

  pub async fn assess(&self, item_id: &str) -> InventoryRiskResult {
    match bounded(self.source.name(), self.timeout, self.source.stock_level(item_id)).await {
      Outcome::Ready(stock) => {
        let tier = classify(stock, &self.thresholds);
        tracing::info!(item_id, stock, tier = tier.level(), "inventory assessed");
        InventoryRiskResult {
          item_id: item_id.to_string(),
          stock_level: Some(stock),
          risk_tier: InventoryRisk::Tier(tier),
          status: tier.status().to_string(),
          data_source: DataSource::Api,
          thresholds: self.thresholds,
        }
      }
      Outcome::Degraded(d) => {
        let reason = match d {
          Degradation::TimedOut { service } => format!("{} timed out", service),
          Degradation::Failed { reason, .. } => reason,
        };
        InventoryRiskResult {
          item_id: item_id.to_string(),
          stock_level: None,
          risk_tier: InventoryRisk::Unavailable,
          status: format!("Data Retrieval Failure: {}", reason),
          data_source: DataSource::Failed,
          thresholds: self.thresholds,
        }
      }
    }
  }
}
