use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::ClientError;
use crate::geo::GeoPoint;
use crate::traits::WeatherSource;
use crate::weather::RawWeatherObservation;

#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
  /// Empty means "no key": the source reports no observation without calling out.
  pub api_key: String,
  pub base_url: String,
  pub timeout: Duration,
}

impl OpenWeatherConfig {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key: api_key.into(),
      base_url: "https://api.openweathermap.org".to_string(),
      timeout: Duration::from_secs(10),
    }
  }

  pub fn from_vars<F>(lookup: &F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut cfg = Self::new(lookup("OPENWEATHER_API_KEY").unwrap_or_default());
    if let Some(url) = lookup("OPENWEATHER_URL").filter(|v| !v.trim().is_empty()) {
      cfg.base_url = url;
    }
    cfg
  }
}

/// Current weather from OpenWeatherMap (`/data/2.5/weather`).
#[derive(Clone)]
pub struct OpenWeatherSource {
  config: OpenWeatherConfig,
  client: Client,
}

impl OpenWeatherSource {
  pub fn new(config: OpenWeatherConfig) -> Result<Self, ClientError> {
    let client = Client::builder().timeout(config.timeout).build()?;
    if config.api_key.trim().is_empty() {
      tracing::warn!("no OpenWeather API key configured; weather risk will stay neutral");
    }
    Ok(Self { config, client })
  }
}

#[async_trait::async_trait]
impl WeatherSource for OpenWeatherSource {
  fn name(&self) -> &'static str {
    "openweather"
  }

  async fn current(&self, point: GeoPoint) -> Result<Option<RawWeatherObservation>, ClientError> {
    if self.config.api_key.trim().is_empty() {
      return Ok(None);
    }

    let url = format!("{}/data/2.5/weather", self.config.base_url.trim_end_matches('/'));
    let res = self
      .client
      .get(url)
      .query(&[
        ("lat", point.lat.to_string()),
        ("lon", point.lon.to_string()),
        ("appid", self.config.api_key.clone()),
        ("units", "metric".to_string()),
      ])
      .send()
      .await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      return Err(ClientError::Api { status, body });
    }

    let parsed: CurrentWeather = res.json().await?;
    Ok(Some(parsed.into_observation()))
  }
}

#[derive(Debug, Default, Deserialize)]
struct CurrentWeather {
  #[serde(default)]
  weather: Vec<Condition>,
  #[serde(default)]
  wind: Option<Wind>,
}

#[derive(Debug, Deserialize)]
struct Condition {
  #[serde(default)]
  id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Wind {
  #[serde(default)]
  speed: Option<f64>,
}

impl CurrentWeather {
  fn into_observation(self) -> RawWeatherObservation {
    RawWeatherObservation {
      condition_code: self.weather.first().and_then(|c| c.id),
      wind_speed: self.wind.and_then(|w| w.speed),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn maps_condition_and_wind() {
    let raw = r#"{
      "coord": {"lon": 80.77, "lat": 7.87},
      "weather": [{"id": 502, "main": "Rain", "description": "heavy intensity rain"}],
      "wind": {"speed": 17.4, "deg": 220},
      "name": "Dambulla"
    }"#;
    let parsed: CurrentWeather = serde_json::from_str(raw).unwrap();
    let obs = parsed.into_observation();
    assert_eq!(obs.condition_code, Some(502));
    assert_eq!(obs.wind_speed, Some(17.4));
  }

  #[test]
  fn missing_sections_are_none() {
    let parsed: CurrentWeather = serde_json::from_str(r#"{"weather": []}"#).unwrap();
    assert_eq!(parsed.into_observation(), RawWeatherObservation::default());
  }

  #[tokio::test]
  async fn without_key_reports_nothing() {
    let source = OpenWeatherSource::new(OpenWeatherConfig::new("")).unwrap();
    let obs = source.current(GeoPoint::new(7.87, 80.77)).await.unwrap();
    assert!(obs.is_none());
  }
}
