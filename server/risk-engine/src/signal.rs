//! Tagged results for risk signals and bounded collaborator calls.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

/// Lower bound of every risk score.
pub const MIN_SCORE: f64 = 0.0;
/// Upper bound of every risk score.
pub const MAX_SCORE: f64 = 10.0;

/// Clamp a raw score into [0, 10]. NaN collapses to 0.
pub fn clamp_score(raw: f64) -> f64 {
  if raw.is_nan() {
    MIN_SCORE
  } else {
    raw.clamp(MIN_SCORE, MAX_SCORE)
  }
}

/// Why a signal carries a neutral fallback instead of a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackCause {
  /// Supplier coordinates could not be resolved.
  Unresolved,
  /// Weather was never requested because coordinates are unknown.
  NoCoordinates,
  /// The collaborator reported no data, failed, or timed out.
  ServiceDown,
}

/// One risk signal on the 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
  Measured(f64),
  Fallback { value: f64, cause: FallbackCause },
}

impl Signal {
  pub fn measured(raw: f64) -> Self {
    Self::Measured(clamp_score(raw))
  }

  pub fn fallback(value: f64, cause: FallbackCause) -> Self {
    Self::Fallback {
      value: clamp_score(value),
      cause,
    }
  }

  pub fn value(&self) -> f64 {
    match *self {
      Self::Measured(v) => v,
      Self::Fallback { value, .. } => value,
    }
  }

  pub fn is_fallback(&self) -> bool {
    matches!(self, Self::Fallback { .. })
  }

  pub fn cause(&self) -> Option<FallbackCause> {
    match *self {
      Self::Measured(_) => None,
      Self::Fallback { cause, .. } => Some(cause),
    }
  }
}

/// How a collaborator call degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
  TimedOut { service: &'static str },
  Failed { service: &'static str, reason: String },
}

/// Result of a bounded collaborator call: a value, or a degradation to absorb.
#[derive(Debug)]
pub enum Outcome<T> {
  Ready(T),
  Degraded(Degradation),
}

impl<T> Outcome<T> {
  pub fn ready(self) -> Option<T> {
    match self {
      Self::Ready(v) => Some(v),
      Self::Degraded(_) => None,
    }
  }
}

/// Run a collaborator call under a timeout, absorbing failures into `Outcome::Degraded`.
pub async fn bounded<T, F>(service: &'static str, limit: Duration, call: F) -> Outcome<T>
where
  F: Future<Output = Result<T, ClientError>>,
{
  match tokio::time::timeout(limit, call).await {
    Ok(Ok(v)) => Outcome::Ready(v),
    Ok(Err(e)) => {
      tracing::warn!(service, error = %e, "collaborator call failed; using fallback");
      Outcome::Degraded(Degradation::Failed {
        service,
        reason: e.to_string(),
      })
    }
    Err(_) => {
      tracing::warn!(service, timeout_ms = limit.as_millis() as u64, "collaborator call timed out; using fallback");
      Outcome::Degraded(Degradation::TimedOut { service })
    }
  }
}
