//! Rate-limited geocoding: every request waits out a fixed pause first.

use std::sync::Arc;
use std::time::Duration;

use crate::geo::GeoPoint;
use crate::signal::{bounded, Outcome};
use crate::traits::Geocoder;

/// Owns the geocoder handle so no caller can reach it without the pause.
#[derive(Clone)]
pub struct PacedGeocoder {
  inner: Arc<dyn Geocoder>,
  pause: Duration,
  timeout: Duration,
}

impl PacedGeocoder {
  pub fn new(inner: Arc<dyn Geocoder>, pause: Duration, timeout: Duration) -> Self {
    Self { inner, pause, timeout }
  }

  /// Resolve `text`, or `None` on no match, failure, timeout, or out-of-range coordinates.
  pub async fn locate(&self, text: &str) -> Option<GeoPoint> {
    tokio::time::sleep(self.pause).await;
    match bounded(self.inner.name(), self.timeout, self.inner.geocode(text)).await {
      Outcome::Ready(Some(p)) if p.is_valid() => Some(p),
      Outcome::Ready(Some(p)) => {
        tracing::warn!(query = text, lat = p.lat, lon = p.lon, "geocoder returned invalid coordinates");
        None
      }
      Outcome::Ready(None) => {
        tracing::debug!(query = text, "geocoder found no match");
        None
      }
      Outcome::Degraded(_) => None,
    }
  }
}
