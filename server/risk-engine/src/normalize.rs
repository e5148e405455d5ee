//! Normalize loosely typed graph property maps into canonical `SupplierRecord`s.
//!
//! Garbage never fails normalization: unusable values become "absent" and the
//! calculators apply their documented defaults.

use serde_json::Value;

use crate::types::{IncidentRecord, SupplierRecord};

/// Build a supplier from a JSON object. `requested_id` fills in a missing `id`.
pub fn supplier(requested_id: &str, raw: &Value) -> SupplierRecord {
  let id = non_empty_str(raw.get("id")).unwrap_or_else(|| requested_id.to_string());
  let name = non_empty_str(raw.get("name")).unwrap_or_default();

  let incidents = raw
    .get("incidents")
    .and_then(Value::as_array)
    .map(|items| items.iter().filter_map(incident).collect())
    .unwrap_or_default();

  SupplierRecord {
    id,
    name,
    reliability: loose_f64(raw.get("reliability")),
    delayed: truthy(raw.get("delayed")),
    incidents,
    lat: loose_f64(raw.get("lat")),
    lon: loose_f64(raw.get("lon")),
    location: non_empty_str(raw.get("location")),
  }
}

/// Supplier id carried by a raw entry, if any.
pub fn supplier_id(raw: &Value) -> Option<String> {
  non_empty_str(raw.get("id"))
}

fn incident(raw: &Value) -> Option<IncidentRecord> {
  let obj = raw.as_object()?;
  let severity = obj
    .get("severity")
    .and_then(Value::as_f64)
    .filter(|s| s.is_finite() && (0.0..=1.0).contains(s));
  Some(IncidentRecord {
    description: obj
      .get("description")
      .and_then(Value::as_str)
      .unwrap_or_default()
      .to_string(),
    severity,
  })
}

fn non_empty_str(v: Option<&Value>) -> Option<String> {
  v.and_then(Value::as_str)
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
}

/// JSON number or numeric string, finite.
fn loose_f64(v: Option<&Value>) -> Option<f64> {
  let n = match v? {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  }?;
  n.is_finite().then_some(n)
}

fn truthy(v: Option<&Value>) -> bool {
  match v {
    Some(Value::Bool(b)) => *b,
    Some(Value::Number(n)) => n.as_f64().is_some_and(|x| x != 0.0),
    Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
    _ => false,
  }
}
