//! Core engine: fetches the supplier, fans out to the signal calculators,
//! aggregates, and produces the report.

use std::sync::Arc;

use crate::config::{validate_reference, validate_weights, Config};
use crate::dependency;
use crate::distance::{self, DistanceAssessment};
use crate::error::EngineError;
use crate::geo::GeoPoint;
use crate::geocode::PacedGeocoder;
use crate::score;
use crate::signal::{bounded, FallbackCause, Outcome, Signal};
use crate::traits::{Geocoder, SupplierGraph, WeatherSource};
use crate::types::*;
use crate::weather::{self, NO_COORDINATES_RISK, NO_OBSERVATION_RISK};

/// Per-signal detail behind a report, including whether each value is a fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBreakdown {
  pub dependency: Signal,
  pub distance: Signal,
  pub weather: Signal,
  pub supplier_coords: Option<GeoPoint>,
}

/// A report plus the signals it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
  pub report: SupplierRiskReport,
  pub signals: SignalBreakdown,
}

/// The supplier risk engine. Holds only immutable configuration and collaborator handles,
/// so concurrent evaluations share nothing mutable.
#[derive(Clone)]
pub struct Engine {
  config: Config,
  graph: Arc<dyn SupplierGraph>,
  geocoder: PacedGeocoder,
  weather: Arc<dyn WeatherSource>,
}

impl Engine {
  pub fn new(
    config: Config,
    graph: Arc<dyn SupplierGraph>,
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
  ) -> Result<Self, EngineError> {
    config.validate()?;
    let geocoder = PacedGeocoder::new(geocoder, config.geocode_pause, config.call_timeout);
    Ok(Self {
      config,
      graph,
      geocoder,
      weather,
    })
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Evaluate a supplier. Fails only for an unknown supplier id or an invalid override.
  pub async fn evaluate_supplier(
    &self,
    supplier_id: &str,
    reference: Option<GeoPoint>,
    weights: Option<Weights>,
  ) -> Result<SupplierRiskReport, EngineError> {
    self.assess(supplier_id, reference, weights).await.map(|a| a.report)
  }

  /// Like [`Engine::evaluate_supplier`], keeping the per-signal breakdown.
  pub async fn assess(
    &self,
    supplier_id: &str,
    reference: Option<GeoPoint>,
    weights: Option<Weights>,
  ) -> Result<Assessment, EngineError> {
    let reference = reference.unwrap_or(self.config.reference_point);
    validate_reference(&reference)?;
    let weights = weights.unwrap_or(self.config.weights);
    validate_weights(&weights)?;

    let supplier = self.fetch_supplier(supplier_id).await?;

    // Dependency is local computation; distance may geocode. Join before weather,
    // which needs the resolved coordinates.
    let (dependency, distance) = tokio::join!(
      async { Signal::measured(dependency::dependency_risk(&supplier)) },
      distance::assess(&supplier, reference, &self.geocoder),
    );
    let weather = self.weather_signal(&distance).await;

    let composite = score::composite(dependency.value(), distance.signal.value(), weather.value(), &weights);
    let recommendations = score::recommendations(
      composite,
      dependency.value(),
      distance.signal.value(),
      weather.value(),
    );

    tracing::info!(
      supplier_id = %supplier.id,
      dependency = dependency.value(),
      distance = distance.signal.value(),
      weather = weather.value(),
      composite,
      distance_fallback = distance.signal.is_fallback(),
      weather_fallback = weather.is_fallback(),
      "supplier evaluated"
    );

    Ok(Assessment {
      report: SupplierRiskReport {
        supplier_id: supplier.id.clone(),
        supplier_name: supplier.name.clone(),
        risk: CompositeRiskResult {
          dependency_risk: dependency.value(),
          distance_km: distance.distance_km,
          distance_risk: distance.signal.value(),
          weather_risk: weather.value(),
          composite_risk: composite,
          recommendations,
        },
      },
      signals: SignalBreakdown {
        dependency,
        distance: distance.signal,
        weather,
        supplier_coords: distance.coords,
      },
    })
  }

  async fn fetch_supplier(&self, supplier_id: &str) -> Result<SupplierRecord, EngineError> {
    match bounded(self.graph.name(), self.config.call_timeout, self.graph.supplier(supplier_id)).await {
      Outcome::Ready(Some(s)) => Ok(s),
      Outcome::Ready(None) => Err(EngineError::not_found(supplier_id)),
      Outcome::Degraded(d) => {
        tracing::warn!(supplier_id, degradation = ?d, "supplier lookup unavailable");
        Err(EngineError::not_found(supplier_id))
      }
    }
  }

  async fn weather_signal(&self, distance: &DistanceAssessment) -> Signal {
    let Some(coords) = distance.coords else {
      return Signal::fallback(NO_COORDINATES_RISK, FallbackCause::NoCoordinates);
    };
    match bounded(self.weather.name(), self.config.call_timeout, self.weather.current(coords)).await {
      Outcome::Ready(Some(obs)) => Signal::measured(weather::weather_risk(Some(&obs))),
      Outcome::Ready(None) | Outcome::Degraded(_) => {
        Signal::fallback(NO_OBSERVATION_RISK, FallbackCause::ServiceDown)
      }
    }
  }
}
