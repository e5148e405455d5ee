use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::ClientError;
use crate::geo::GeoPoint;
use crate::traits::Geocoder;

#[derive(Debug, Clone)]
pub struct NominatimConfig {
  pub base_url: String,
  pub user_agent: String,
  pub timeout: Duration,
}

impl Default for NominatimConfig {
  fn default() -> Self {
    Self {
      base_url: "https://nominatim.openstreetmap.org".to_string(),
      user_agent: "supplier-risk-geocoder".to_string(),
      timeout: Duration::from_secs(10),
    }
  }
}

impl NominatimConfig {
  pub fn from_vars<F>(lookup: &F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut cfg = Self::default();
    if let Some(url) = lookup("NOMINATIM_URL").filter(|v| !v.trim().is_empty()) {
      cfg.base_url = url;
    }
    if let Some(ua) = lookup("GEOCODE_USER_AGENT").filter(|v| !v.trim().is_empty()) {
      cfg.user_agent = ua;
    }
    cfg
  }
}

/// OpenStreetMap Nominatim search. Callers must go through `PacedGeocoder`.
#[derive(Clone)]
pub struct NominatimGeocoder {
  config: NominatimConfig,
  client: Client,
}

impl NominatimGeocoder {
  pub fn new(config: NominatimConfig) -> Result<Self, ClientError> {
    if config.user_agent.trim().is_empty() {
      return Err(ClientError::Config("nominatim requires a user agent".into()));
    }
    let client = Client::builder()
      .timeout(config.timeout)
      .user_agent(config.user_agent.clone())
      .build()?;
    Ok(Self { config, client })
  }
}

#[async_trait::async_trait]
impl Geocoder for NominatimGeocoder {
  fn name(&self) -> &'static str {
    "nominatim"
  }

  async fn geocode(&self, text: &str) -> Result<Option<GeoPoint>, ClientError> {
    let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
    let res = self
      .client
      .get(url)
      .query(&[("q", text), ("format", "json"), ("limit", "1")])
      .send()
      .await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      return Err(ClientError::Api { status, body });
    }

    let places: Vec<Place> = res.json().await?;
    first_point(&places)
  }
}

fn first_point(places: &[Place]) -> Result<Option<GeoPoint>, ClientError> {
  let Some(place) = places.first() else {
    return Ok(None);
  };
  let lat = place
    .lat
    .trim()
    .parse::<f64>()
    .map_err(|e| ClientError::InvalidResponse(format!("lat {:?}: {}", place.lat, e)))?;
  let lon = place
    .lon
    .trim()
    .parse::<f64>()
    .map_err(|e| ClientError::InvalidResponse(format!("lon {:?}: {}", place.lon, e)))?;
  Ok(Some(GeoPoint::new(lat, lon)))
}

#[derive(Debug, Deserialize)]
struct Place {
  lat: String,
  lon: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_first_match() {
    let raw = r#"[
      {"place_id": 1, "lat": "7.2905715", "lon": "80.6337262", "display_name": "Kandy"},
      {"place_id": 2, "lat": "0", "lon": "0"}
    ]"#;
    let places: Vec<Place> = serde_json::from_str(raw).unwrap();
    let p = first_point(&places).unwrap().unwrap();
    assert!((p.lat - 7.2905715).abs() < 1e-9);
    assert!((p.lon - 80.6337262).abs() < 1e-9);
  }

  #[test]
  fn empty_is_unresolved() {
    assert!(first_point(&[]).unwrap().is_none());
  }

  #[test]
  fn garbage_coordinates_are_invalid() {
    let places = vec![Place {
      lat: "north".into(),
      lon: "80".into(),
    }];
    assert!(first_point(&places).is_err());
  }
}
