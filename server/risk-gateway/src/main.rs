//! Binary entrypoint for the risk gateway.

use std::net::SocketAddr;
use std::sync::Arc;

use supplier_risk::clients::ClientSet;
use supplier_risk::{Config, Engine, InventoryMonitor};
use tracing_subscriber::EnvFilter;

use risk_gateway::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let port: u16 = std::env::var("PORT")
    .unwrap_or_else(|_| "5005".into())
    .parse()
    .map_err(|e| format!("PORT must be a valid u16: {}", e))?;

  let config = Config::from_env()?;
  let clients = ClientSet::from_env()?;
  let inventory = InventoryMonitor::new(clients.inventory, config.inventory_thresholds, config.call_timeout)?;
  let engine = Engine::new(config, clients.graph, clients.geocoder, clients.weather)?;
  let state = Arc::new(AppState { engine, inventory });

  let app = risk_gateway::router(state);

  let addr = SocketAddr::from(([127, 0, 0, 1], port));
  tracing::info!(%addr, "risk-gateway listening");

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
