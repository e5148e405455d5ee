//! Collaborator adapters: Neo4j (HTTP), Nominatim, OpenWeatherMap, the inventory
//! REST service, and an in-memory graph.

mod inventory_api;
mod neo4j;
mod nominatim;
mod openweather;
mod static_graph;

use std::sync::Arc;

pub use inventory_api::{InventoryApi, InventoryApiConfig};
pub use neo4j::{Neo4jConfig, Neo4jGraph};
pub use nominatim::{NominatimConfig, NominatimGeocoder};
pub use openweather::{OpenWeatherConfig, OpenWeatherSource};
pub use static_graph::StaticGraph;

use crate::error::ClientError;
use crate::traits::{Geocoder, InventorySource, SupplierGraph, WeatherSource};

/// One handle per collaborator. Dropping the set releases every connection pool.
#[derive(Clone)]
pub struct ClientSet {
  pub graph: Arc<dyn SupplierGraph>,
  pub geocoder: Arc<dyn Geocoder>,
  pub weather: Arc<dyn WeatherSource>,
  pub inventory: Arc<dyn InventorySource>,
}

impl ClientSet {
  pub fn from_env() -> Result<Self, ClientError> {
    Self::from_vars(|key| std::env::var(key).ok())
  }

  pub fn from_vars<F>(lookup: F) -> Result<Self, ClientError>
  where
    F: Fn(&str) -> Option<String>,
  {
    Ok(Self {
      graph: Arc::new(Neo4jGraph::new(Neo4jConfig::from_vars(&lookup))?),
      geocoder: Arc::new(NominatimGeocoder::new(NominatimConfig::from_vars(&lookup))?),
      weather: Arc::new(OpenWeatherSource::new(OpenWeatherConfig::from_vars(&lookup))?),
      inventory: Arc::new(InventoryApi::new(InventoryApiConfig::from_vars(&lookup))?),
    })
  }
}
