//! Distance risk: resolve supplier coordinates, then score the haversine distance
//! to the enterprise reference point.

use crate::geo::{haversine_km, GeoPoint};
use crate::geocode::PacedGeocoder;
use crate::signal::{FallbackCause, Signal};
use crate::types::SupplierRecord;

/// Neutral distance risk when coordinates cannot be resolved.
pub const UNRESOLVED_DISTANCE_RISK: f64 = 5.0;

/// Resolved coordinates (if any), the distance, and its risk signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceAssessment {
  pub coords: Option<GeoPoint>,
  pub distance_km: Option<f64>,
  pub signal: Signal,
}

impl DistanceAssessment {
  pub fn unresolved() -> Self {
    Self {
      coords: None,
      distance_km: None,
      signal: Signal::fallback(UNRESOLVED_DISTANCE_RISK, FallbackCause::Unresolved),
    }
  }

  pub fn from_coords(coords: GeoPoint, reference: GeoPoint) -> Self {
    let km = haversine_km(coords, reference);
    Self {
      coords: Some(coords),
      distance_km: Some(km),
      signal: Signal::measured(distance_risk(km)),
    }
  }
}

/// Tiered risk by distance, plus a proportional bump of 2 points per 2000 km, capped at 10.
pub fn distance_risk(km: f64) -> f64 {
  let tier = if km <= 50.0 {
    1.5
  } else if km <= 300.0 {
    3.5
  } else if km <= 1000.0 {
    6.0
  } else {
    8.5
  };
  (tier + (km / 2000.0) * 2.0).min(10.0)
}

/// Explicit coordinates first, then the location text, then the supplier name.
pub async fn resolve_coordinates(supplier: &SupplierRecord, geocoder: &PacedGeocoder) -> Option<GeoPoint> {
  if let Some(p) = supplier.coordinates() {
    return Some(p);
  }

  let candidates = [supplier.location.as_deref(), Some(supplier.name.as_str())];
  for text in candidates.into_iter().flatten() {
    let text = text.trim();
    if text.is_empty() {
      continue;
    }
    if let Some(p) = geocoder.locate(text).await {
      tracing::debug!(supplier_id = %supplier.id, query = text, "resolved supplier coordinates by geocoding");
      return Some(p);
    }
  }
  None
}

/// Resolve and score. Never fails; unresolved coordinates yield the neutral fallback.
pub async fn assess(supplier: &SupplierRecord, reference: GeoPoint, geocoder: &PacedGeocoder) -> DistanceAssessment {
  match resolve_coordinates(supplier, geocoder).await {
    Some(coords) => DistanceAssessment::from_coords(coords, reference),
    None => DistanceAssessment::unresolved(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ClientError;
  use crate::traits::Geocoder;
  use async_trait::async_trait;
  use std::collections::HashMap;
  use std::sync::{Arc, Mutex};
  use std::time::Duration;

  #[derive(Default)]
  struct Recorder {
    known: HashMap<String, GeoPoint>,
    queries: Mutex<Vec<String>>,
  }

  #[async_trait]
  impl Geocoder for Recorder {
    fn name(&self) -> &'static str {
      "recorder"
    }

    async fn geocode(&self, text: &str) -> Result<Option<GeoPoint>, ClientError> {
      self.queries.lock().unwrap().push(text.to_string());
      Ok(self.known.get(text).copied())
    }
  }

  fn paced(rec: Arc<Recorder>) -> PacedGeocoder {
    PacedGeocoder::new(rec, Duration::from_secs(1), Duration::from_secs(5))
  }

  #[test]
  fn tier_boundaries() {
    assert!((distance_risk(0.0) - 1.5).abs() < 1e-12);
    assert!((distance_risk(50.0) - 1.55).abs() < 1e-12);
    assert!((distance_risk(300.0) - 3.8).abs() < 1e-12);
    assert!((distance_risk(1000.0) - 7.0).abs() < 1e-12);
    assert!((distance_risk(1500.0) - 10.0).abs() < 1e-12);
    assert_eq!(distance_risk(20_000.0), 10.0);
  }

  #[test]
  fn risk_is_monotone_in_distance() {
    let mut prev = 0.0;
    for step in 0..=2500 {
      let km = step as f64 * 2.0;
      let r = distance_risk(km);
      assert!(r >= prev, "risk dropped at {} km", km);
      assert!((0.0..=10.0).contains(&r));
      prev = r;
    }
  }

  #[test]
  fn colocated_supplier_scores_lowest_tier() {
    let p = GeoPoint::new(7.8731, 80.7718);
    let a = DistanceAssessment::from_coords(p, p);
    assert_eq!(a.distance_km, Some(0.0));
    assert_eq!(a.signal, Signal::Measured(1.5));
  }

  #[test]
  fn unresolved_is_neutral() {
    let a = DistanceAssessment::unresolved();
    assert_eq!(a.distance_km, None);
    assert_eq!(a.coords, None);
    assert_eq!(a.signal.value(), 5.0);
    assert_eq!(a.signal.cause(), Some(FallbackCause::Unresolved));
  }

  #[tokio::test(start_paused = true)]
  async fn explicit_coordinates_skip_geocoding() {
    let rec = Arc::new(Recorder::default());
    let mut s = SupplierRecord::new("SUP001", "LankaCoco");
    s.lat = Some(7.0);
    s.lon = Some(80.0);
    s.location = Some("Kurunegala".into());
    let p = resolve_coordinates(&s, &paced(rec.clone())).await;
    assert_eq!(p, Some(GeoPoint::new(7.0, 80.0)));
    assert!(rec.queries.lock().unwrap().is_empty());
  }

  #[tokio::test(start_paused = true)]
  async fn location_then_name() {
    let mut known = HashMap::new();
    known.insert("LankaCoco".to_string(), GeoPoint::new(7.48, 80.36));
    let rec = Arc::new(Recorder {
      known,
      ..Recorder::default()
    });
    let mut s = SupplierRecord::new("SUP001", "LankaCoco");
    s.location = Some("Somewhere Unknown".into());
    let p = resolve_coordinates(&s, &paced(rec.clone())).await;
    assert_eq!(p, Some(GeoPoint::new(7.48, 80.36)));
    assert_eq!(*rec.queries.lock().unwrap(), vec!["Somewhere Unknown", "LankaCoco"]);
  }

  #[tokio::test(start_paused = true)]
  async fn nothing_to_geocode_is_unresolved() {
    let rec = Arc::new(Recorder::default());
    let s = SupplierRecord::new("SUP009", "  ");
    let a = assess(&s, GeoPoint::new(7.8731, 80.7718), &paced(rec.clone())).await;
    assert_eq!(a, DistanceAssessment::unresolved());
    assert!(rec.queries.lock().unwrap().is_empty());
  }
}
