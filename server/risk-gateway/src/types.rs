//! Request types for the gateway.

use serde::Deserialize;
use supplier_risk::{ErrorOutput, GeoPoint, Weights};

/// Optional per-request overrides for `GET /suppliers/:id/risk`.
#[derive(Debug, Default, Deserialize)]
pub struct RiskQuery {
  pub lat: Option<f64>,
  pub lon: Option<f64>,
  pub dependency: Option<f64>,
  pub distance: Option<f64>,
  pub weather: Option<f64>,
}

impl RiskQuery {
  /// Reference point override. `lat` and `lon` must come together.
  pub fn reference(&self) -> Result<Option<GeoPoint>, ErrorOutput> {
    match (self.lat, self.lon) {
      (Some(lat), Some(lon)) => Ok(Some(GeoPoint::new(lat, lon))),
      (None, None) => Ok(None),
      (Some(_), None) => Err(ErrorOutput::new("lon is required when lat is given").with_field("lon")),
      (None, Some(_)) => Err(ErrorOutput::new("lat is required when lon is given").with_field("lat")),
    }
  }

  /// Weights override; unspecified weights keep the configured value.
  pub fn weights(&self, configured: Weights) -> Option<Weights> {
    if self.dependency.is_none() && self.distance.is_none() && self.weather.is_none() {
      return None;
    }
    Some(Weights {
      dependency: self.dependency.unwrap_or(configured.dependency),
      distance: self.distance.unwrap_or(configured.distance),
      weather: self.weather.unwrap_or(configured.weather),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reference_needs_both_coordinates() {
    let q = RiskQuery {
      lat: Some(6.9),
      ..RiskQuery::default()
    };
    assert_eq!(q.reference().unwrap_err().field.as_deref(), Some("lon"));

    let q = RiskQuery {
      lat: Some(6.9),
      lon: Some(79.8),
      ..RiskQuery::default()
    };
    assert_eq!(q.reference().unwrap(), Some(GeoPoint::new(6.9, 79.8)));
    assert_eq!(RiskQuery::default().reference().unwrap(), None);
  }

  #[test]
  fn partial_weights_fill_from_config() {
    assert!(RiskQuery::default().weights(Weights::default()).is_none());

    let q = RiskQuery {
      weather: Some(0.8),
      ..RiskQuery::default()
    };
    let w = q.weights(Weights::default()).unwrap();
    assert_eq!(w.dependency, 0.4);
    assert_eq!(w.distance, 0.2);
    assert_eq!(w.weather, 0.8);
  }
}
