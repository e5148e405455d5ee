//! Dependency risk from supplier reliability, incident history and delay status.

use crate::signal::clamp_score;
use crate::types::SupplierRecord;

/// Reliability assumed when the graph has none.
pub const DEFAULT_RELIABILITY: f64 = 0.7;
const RELIABILITY_FACTOR: f64 = 6.0;
const INCIDENT_FACTOR: f64 = 4.0;
const DELAYED_PENALTY: f64 = 1.5;

/// Mean of the usable incident severities (finite, within [0, 1]); 0 when none.
pub fn mean_incident_severity(supplier: &SupplierRecord) -> f64 {
  let valid: Vec<f64> = supplier
    .incidents
    .iter()
    .filter_map(|inc| inc.severity)
    .filter(|s| s.is_finite() && (0.0..=1.0).contains(s))
    .collect();
  if valid.is_empty() {
    0.0
  } else {
    valid.iter().sum::<f64>() / valid.len() as f64
  }
}

/// `(1 - reliability) * 6 + mean_severity * 4 + (1.5 if delayed)`, clamped to [0, 10].
///
/// Reliability outside [0, 1] is used as given; only the final clamp bounds it.
pub fn dependency_risk(supplier: &SupplierRecord) -> f64 {
  let reliability = supplier
    .reliability
    .filter(|r| r.is_finite())
    .unwrap_or(DEFAULT_RELIABILITY);

  let base = (1.0 - reliability) * RELIABILITY_FACTOR;
  let incident_score = mean_incident_severity(supplier) * INCIDENT_FACTOR;
  let delayed_penalty = if supplier.delayed { DELAYED_PENALTY } else { 0.0 };

  clamp_score(base + incident_score + delayed_penalty)
}
