//! Core types for the risk engine (domain records + JSON contracts).

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

// ---------------------------------------------------------------------------
// Supplier snapshot (normalized from the graph store)
// ---------------------------------------------------------------------------

/// One incident attached to a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
  pub description: String,
  /// Severity in [0, 1]. `None` when the source value was missing or unusable.
  #[serde(default)]
  pub severity: Option<f64>,
}

/// Immutable supplier snapshot fetched once per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRecord {
  pub id: String,
  #[serde(default)]
  pub name: String,
  /// Reliability in [0, 1]; `None` means unknown.
  #[serde(default)]
  pub reliability: Option<f64>,
  #[serde(default)]
  pub delayed: bool,
  #[serde(default)]
  pub incidents: Vec<IncidentRecord>,
  #[serde(default)]
  pub lat: Option<f64>,
  #[serde(default)]
  pub lon: Option<f64>,
  /// Free-text location used for geocoding when coordinates are missing.
  #[serde(default)]
  pub location: Option<String>,
}

impl SupplierRecord {
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      reliability: None,
      delayed: false,
      incidents: Vec::new(),
      lat: None,
      lon: None,
      location: None,
    }
  }

  /// Explicit coordinates, when both are present and form a valid point.
  pub fn coordinates(&self) -> Option<GeoPoint> {
    match (self.lat, self.lon) {
      (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)).filter(GeoPoint::is_valid),
      _ => None,
    }
  }
}

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Per-signal weights for the composite. A raw weighted sum; never normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
  pub dependency: f64,
  pub distance: f64,
  pub weather: f64,
}

impl Default for Weights {
  fn default() -> Self {
    Self {
      dependency: 0.4,
      distance: 0.2,
      weather: 0.4,
    }
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract)
// ---------------------------------------------------------------------------

/// Scores and recommendations for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeRiskResult {
  pub dependency_risk: f64,
  /// `null` when supplier coordinates could not be resolved.
  pub distance_km: Option<f64>,
  pub distance_risk: f64,
  pub weather_risk: f64,
  pub composite_risk: f64,
  pub recommendations: Vec<String>,
}

/// The report handed to the CLI and the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRiskReport {
  pub supplier_id: String,
  pub supplier_name: String,
  #[serde(flatten)]
  pub risk: CompositeRiskResult,
}

// ---------------------------------------------------------------------------
// CLI / HTTP error wrapper
// ---------------------------------------------------------------------------

/// Structured error output for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn coordinates_need_both_parts() {
    let mut s = SupplierRecord::new("SUP001", "LankaCoco");
    assert!(s.coordinates().is_none());
    s.lat = Some(7.0);
    assert!(s.coordinates().is_none());
    s.lon = Some(80.0);
    assert_eq!(s.coordinates(), Some(GeoPoint::new(7.0, 80.0)));
    s.lon = Some(f64::NAN);
    assert!(s.coordinates().is_none());
  }

  #[test]
  fn out_of_range_coordinates_are_ignored() {
    let mut s = SupplierRecord::new("SUP001", "LankaCoco");
    s.lat = Some(200.0);
    s.lon = Some(80.0);
    assert!(s.coordinates().is_none());
    s.lat = Some(7.0);
    s.lon = Some(-181.0);
    assert!(s.coordinates().is_none());
  }

  #[test]
  fn report_serializes_flat_with_null_distance() {
    let report = SupplierRiskReport {
      supplier_id: "SUP001".into(),
      supplier_name: "LankaCoco".into(),
      risk: CompositeRiskResult {
        dependency_risk: 1.0,
        distance_km: None,
        distance_risk: 5.0,
        weather_risk: 4.0,
        composite_risk: 3.0,
        recommendations: vec!["Low risk: continue normal procurement cadence.".into()],
      },
    };
    let v = serde_json::to_value(&report).unwrap();
    let obj = v.as_object().unwrap();
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(
      keys,
      vec![
        "composite_risk",
        "dependency_risk",
        "distance_km",
        "distance_risk",
        "recommendations",
        "supplier_id",
        "supplier_name",
        "weather_risk",
      ]
    );
    assert!(obj["distance_km"].is_null());
  }
}
