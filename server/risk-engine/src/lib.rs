//! Supplier Risk Engine: deterministic, formula-based supply-chain risk scoring.
//!
//! Fetches a supplier from the graph store, scores dependency, distance and
//! weather risk on a 0-10 scale, combines them with configured weights, and
//! emits ordered recommendations. Also classifies inventory stock levels.
//!
//! External calls are bounded by timeouts and degrade to documented neutral
//! scores; only an unknown supplier id fails an evaluation.

pub mod clients;
pub mod config;
pub mod dependency;
pub mod distance;
pub mod engine;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod inventory;
pub mod normalize;
pub mod score;
pub mod signal;
pub mod traits;
pub mod types;
pub mod weather;

pub use config::Config;
pub use engine::{Assessment, Engine, SignalBreakdown};
pub use error::{ClientError, ConfigError, EngineError};
pub use geo::GeoPoint;
pub use inventory::{InventoryMonitor, InventoryRisk, InventoryRiskResult, InventoryThresholds, InventoryTier};
pub use signal::{FallbackCause, Signal};
pub use traits::{Geocoder, InventorySource, SupplierGraph, WeatherSource};
pub use types::{CompositeRiskResult, ErrorOutput, IncidentRecord, SupplierRecord, SupplierRiskReport, Weights};
pub use weather::RawWeatherObservation;
