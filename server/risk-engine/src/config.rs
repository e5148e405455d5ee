//! Engine configuration with sane defaults, loaded from the environment.

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::geo::GeoPoint;
use crate::inventory::InventoryThresholds;
use crate::types::Weights;

/// Smallest pause allowed before each geocoding request.
pub const MIN_GEOCODE_PAUSE: Duration = Duration::from_secs(1);

/// Tunables for one engine instance. Immutable once the engine is built.
#[derive(Debug, Clone)]
pub struct Config {
  /// Enterprise location that supplier distance is measured from.
  pub reference_point: GeoPoint,
  pub weights: Weights,
  pub inventory_thresholds: InventoryThresholds,
  /// Upper bound on every collaborator call.
  pub call_timeout: Duration,
  /// Pause before each geocoding request (upstream rate limit).
  pub geocode_pause: Duration,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      reference_point: GeoPoint::new(7.8731, 80.7718),
      weights: Weights::default(),
      inventory_thresholds: InventoryThresholds::default(),
      call_timeout: Duration::from_secs(10),
      geocode_pause: MIN_GEOCODE_PAUSE,
    }
  }
}

impl Config {
  /// Defaults overridden by process environment variables, then validated.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_vars(|key| std::env::var(key).ok())
  }

  /// Same as [`Config::from_env`] with an arbitrary variable lookup.
  pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut cfg = Self::default();

    if let Some(lat) = parse_var::<f64, _>(&lookup, "RISK_REFERENCE_LAT")? {
      cfg.reference_point.lat = lat;
    }
    if let Some(lon) = parse_var::<f64, _>(&lookup, "RISK_REFERENCE_LON")? {
      cfg.reference_point.lon = lon;
    }
    if let Some(w) = parse_var::<f64, _>(&lookup, "RISK_WEIGHT_DEPENDENCY")? {
      cfg.weights.dependency = w;
    }
    if let Some(w) = parse_var::<f64, _>(&lookup, "RISK_WEIGHT_DISTANCE")? {
      cfg.weights.distance = w;
    }
    if let Some(w) = parse_var::<f64, _>(&lookup, "RISK_WEIGHT_WEATHER")? {
      cfg.weights.weather = w;
    }
    if let Some(v) = parse_var::<u64, _>(&lookup, "INVENTORY_LOW_RISK_MIN")? {
      cfg.inventory_thresholds.low_risk_min = v;
    }
    if let Some(v) = parse_var::<u64, _>(&lookup, "INVENTORY_HIGH_RISK_MAX")? {
      cfg.inventory_thresholds.high_risk_max = v;
    }
    if let Some(secs) = parse_var::<u64, _>(&lookup, "RISK_CALL_TIMEOUT_SECS")? {
      cfg.call_timeout = Duration::from_secs(secs);
    }
    if let Some(ms) = parse_var::<u64, _>(&lookup, "GEOCODE_PAUSE_MS")? {
      cfg.geocode_pause = Duration::from_millis(ms);
    }

    cfg.validate()?;
    Ok(cfg)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    validate_weights(&self.weights)?;
    validate_reference(&self.reference_point)?;
    self.inventory_thresholds.validate()?;
    if self.call_timeout.is_zero() {
      return Err(ConfigError::invalid("call_timeout", "must be greater than zero"));
    }
    if self.geocode_pause < MIN_GEOCODE_PAUSE {
      return Err(ConfigError::invalid(
        "geocode_pause",
        &format!("must be at least {} ms", MIN_GEOCODE_PAUSE.as_millis()),
      ));
    }
    Ok(())
  }
}

/// Weights must be finite and non-negative. They need not sum to 1.
pub fn validate_weights(w: &Weights) -> Result<(), ConfigError> {
  for (field, value) in [
    ("weights.dependency", w.dependency),
    ("weights.distance", w.distance),
    ("weights.weather", w.weather),
  ] {
    if !value.is_finite() || value < 0.0 {
      return Err(ConfigError::invalid(field, "must be a finite, non-negative number"));
    }
  }
  Ok(())
}

pub fn validate_reference(p: &GeoPoint) -> Result<(), ConfigError> {
  if !p.is_valid() {
    return Err(ConfigError::invalid(
      "reference_point",
      "latitude must be within [-90, 90] and longitude within [-180, 180]",
    ));
  }
  Ok(())
}

/// Look up and parse one variable. Unset or blank means "keep the default".
pub(crate) fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
  T: FromStr,
  T::Err: std::fmt::Display,
  F: Fn(&str) -> Option<String>,
{
  match lookup(key) {
    Some(raw) if !raw.trim().is_empty() => raw
      .trim()
      .parse::<T>()
      .map(Some)
      .map_err(|e| ConfigError::invalid(key, &e.to_string())),
    _ => Ok(None),
  }
}
