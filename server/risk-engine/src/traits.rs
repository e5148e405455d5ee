//! Seams to the external collaborators. Adapters live in `clients`.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::geo::GeoPoint;
use crate::types::SupplierRecord;
use crate::weather::RawWeatherObservation;

/// Supplier lookup, including nested incidents. `Ok(None)` means not found.
#[async_trait]
pub trait SupplierGraph: Send + Sync {
  fn name(&self) -> &'static str;

  async fn supplier(&self, supplier_id: &str) -> Result<Option<SupplierRecord>, ClientError>;
}

/// Free text to coordinates. `Ok(None)` means unresolved.
#[async_trait]
pub trait Geocoder: Send + Sync {
  fn name(&self) -> &'static str;

  async fn geocode(&self, text: &str) -> Result<Option<GeoPoint>, ClientError>;
}

/// Current conditions at a point. `Ok(None)` means the service has nothing to offer.
#[async_trait]
pub trait WeatherSource: Send + Sync {
  fn name(&self) -> &'static str;

  async fn current(&self, point: GeoPoint) -> Result<Option<RawWeatherObservation>, ClientError>;
}

/// Stock level for an inventory item.
#[async_trait]
pub trait InventorySource: Send + Sync {
  fn name(&self) -> &'static str;

  async fn stock_level(&self, item_id: &str) -> Result<u64, ClientError>;
}
