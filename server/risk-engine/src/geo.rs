//! Great-circle distance on a spherical Earth.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
  pub lat: f64,
  pub lon: f64,
}

impl GeoPoint {
  pub fn new(lat: f64, lon: f64) -> Self {
    Self { lat, lon }
  }

  /// Finite and within the usual degree ranges.
  pub fn is_valid(&self) -> bool {
    self.lat.is_finite()
      && self.lon.is_finite()
      && (-90.0..=90.0).contains(&self.lat)
      && (-180.0..=180.0).contains(&self.lon)
  }
}

/// Haversine distance between two points in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
  let phi1 = a.lat.to_radians();
  let phi2 = b.lat.to_radians();
  let dphi = (b.lat - a.lat).to_radians();
  let dlambda = (b.lon - a.lon).to_radians();

  let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
  let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
  EARTH_RADIUS_KM * c
}
