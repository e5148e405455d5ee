//! Weather risk from a current-conditions observation (OpenWeatherMap condition codes).

use serde::{Deserialize, Serialize};

use crate::signal::clamp_score;

/// Weather risk when the service returned nothing for known coordinates.
pub const NO_OBSERVATION_RISK: f64 = 3.0;
/// Weather risk when coordinates were never resolved, so weather was not requested.
pub const NO_COORDINATES_RISK: f64 = 4.0;

const WIND_LIMIT_MPS: f64 = 15.0;
const WIND_FLOOR: f64 = 7.0;

/// Raw observation as reported by the weather service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWeatherObservation {
  pub condition_code: Option<i64>,
  /// Meters per second.
  pub wind_speed: Option<f64>,
}

/// Risk for a condition code alone.
pub fn condition_risk(code: Option<i64>) -> f64 {
  match code {
    None => 3.0,
    Some(200..=232) => 9.0,
    Some(c @ 300..=531) => {
      if c >= 520 {
        8.0
      } else {
        6.0
      }
    }
    Some(600..=622) => 7.0,
    Some(700..=781) => 4.0,
    Some(800) => 1.5,
    Some(801..=804) => 2.5,
    Some(_) => 3.5,
  }
}

/// Score an observation; `None` (service had nothing) is neutral.
pub fn weather_risk(observation: Option<&RawWeatherObservation>) -> f64 {
  let Some(obs) = observation else {
    return NO_OBSERVATION_RISK;
  };

  let mut risk = condition_risk(obs.condition_code);
  if obs.wind_speed.is_some_and(|w| w > WIND_LIMIT_MPS) {
    risk = risk.max(WIND_FLOOR);
  }
  clamp_score(risk)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn obs(code: Option<i64>, wind: Option<f64>) -> RawWeatherObservation {
    RawWeatherObservation {
      condition_code: code,
      wind_speed: wind,
    }
  }

  #[test]
  fn condition_table() {
    let cases = [
      (200, 9.0),
      (232, 9.0),
      (300, 6.0),
      (321, 6.0),
      (500, 6.0),
      (519, 6.0),
      (520, 8.0),
      (531, 8.0),
      (600, 7.0),
      (622, 7.0),
      (701, 4.0),
      (781, 4.0),
      (800, 1.5),
      (801, 2.5),
      (804, 2.5),
      (199, 3.5),
      (250, 3.5),
      (900, 3.5),
      (-1, 3.5),
    ];
    for (code, expected) in cases {
      assert_eq!(weather_risk(Some(&obs(Some(code), None))), expected, "code {}", code);
    }
  }

  #[test]
  fn missing_observation_is_neutral() {
    assert_eq!(weather_risk(None), NO_OBSERVATION_RISK);
  }

  #[test]
  fn null_code_is_neutral() {
    assert_eq!(weather_risk(Some(&obs(None, None))), 3.0);
  }

  #[test]
  fn strong_wind_raises_floor() {
    assert_eq!(weather_risk(Some(&obs(Some(800), Some(16.0)))), 7.0);
    assert_eq!(weather_risk(Some(&obs(Some(800), Some(15.0)))), 1.5);
    assert_eq!(weather_risk(Some(&obs(None, Some(20.0)))), 7.0);
  }

  #[test]
  fn storm_dominates_wind() {
    assert_eq!(weather_risk(Some(&obs(Some(201), Some(20.0)))), 9.0);
  }

  #[test]
  fn nan_wind_is_ignored() {
    assert_eq!(weather_risk(Some(&obs(Some(801), Some(f64::NAN)))), 2.5);
  }
}
