//! Composite score and the ordered recommendation list.

use crate::signal::clamp_score;
use crate::types::Weights;

pub const HIGH_RISK_THRESHOLD: f64 = 7.5;
pub const MEDIUM_RISK_THRESHOLD: f64 = 5.0;
pub const DEPENDENCY_ADVISORY_THRESHOLD: f64 = 6.5;
pub const DISTANCE_ADVISORY_THRESHOLD: f64 = 6.0;
pub const WEATHER_ADVISORY_THRESHOLD: f64 = 7.0;

/// Raw weighted sum of the three signals, clamped to [0, 10]. Weights are not normalized.
pub fn composite(dependency: f64, distance: f64, weather: f64, weights: &Weights) -> f64 {
  clamp_score(dependency * weights.dependency + distance * weights.distance + weather * weights.weather)
}

/// One primary tier statement, then advisories in fixed order (dependency, distance, weather).
pub fn recommendations(composite: f64, dependency: f64, distance: f64, weather: f64) -> Vec<String> {
  let mut out = Vec::new();

  let primary = if composite >= HIGH_RISK_THRESHOLD {
    "High risk: consider placing a smaller emergency order and sourcing an alternative vendor."
  } else if composite >= MEDIUM_RISK_THRESHOLD {
    "Medium risk: increase safety stock and monitor shipments."
  } else {
    "Low risk: continue normal procurement cadence."
  };
  out.push(primary.to_string());

  if dependency >= DEPENDENCY_ADVISORY_THRESHOLD {
    out.push("Supplier reliability / incidents contribute significantly to risk.".to_string());
  }
  if distance >= DISTANCE_ADVISORY_THRESHOLD {
    out.push("Long distance increases transit risk; consider local suppliers.".to_string());
  }
  if weather >= WEATHER_ADVISORY_THRESHOLD {
    out.push("Severe weather risk: expect potential delays.".to_string());
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn weighted_sum_with_default_weights() {
    let c = composite(0.6, 1.5, 3.0, &Weights::default());
    assert!((c - 1.74).abs() < 1e-9);
  }

  #[test]
  fn weights_are_not_normalized() {
    let w = Weights {
      dependency: 1.0,
      distance: 1.0,
      weather: 1.0,
    };
    assert!((composite(1.0, 2.0, 3.0, &w) - 6.0).abs() < 1e-12);
    assert_eq!(composite(5.0, 5.0, 5.0, &w), 10.0);
  }

  #[test]
  fn zero_weights_give_zero() {
    let w = Weights {
      dependency: 0.0,
      distance: 0.0,
      weather: 0.0,
    };
    assert_eq!(composite(9.0, 9.0, 9.0, &w), 0.0);
  }

  #[test]
  fn low_risk_without_advisories() {
    let r = recommendations(1.74, 0.6, 1.5, 3.0);
    assert_eq!(r, vec!["Low risk: continue normal procurement cadence."]);
  }

  #[test]
  fn primary_tier_boundaries() {
    assert!(recommendations(7.5, 0.0, 0.0, 0.0)[0].starts_with("High risk"));
    assert!(recommendations(7.49, 0.0, 0.0, 0.0)[0].starts_with("Medium risk"));
    assert!(recommendations(5.0, 0.0, 0.0, 0.0)[0].starts_with("Medium risk"));
    assert!(recommendations(4.99, 0.0, 0.0, 0.0)[0].starts_with("Low risk"));
  }

  #[test]
  fn advisories_follow_fixed_order() {
    let r = recommendations(8.0, 6.5, 6.0, 7.0);
    assert_eq!(r.len(), 4);
    assert!(r[0].starts_with("High risk"));
    assert!(r[1].starts_with("Supplier reliability"));
    assert!(r[2].starts_with("Long distance"));
    assert!(r[3].starts_with("Severe weather"));
  }

  #[test]
  fn only_triggered_advisories_appear() {
    let r = recommendations(3.0, 1.0, 1.0, 9.0);
    assert_eq!(r.len(), 2);
    assert!(r[1].starts_with("Severe weather"));
    assert!(r.iter().all(|s| !s.is_empty()));
  }
}
