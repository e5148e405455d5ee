//! Binary entrypoint: evaluate one supplier (or one inventory item) and print the report.
//!
//! Collaborator endpoints and engine tunables come from the environment; see `Config`
//! and `ClientSet`. Logs go to stderr, the report to stdout.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use supplier_risk::clients::{ClientSet, StaticGraph};
use supplier_risk::{
  Config, Engine, GeoPoint, InventoryMonitor, InventoryRisk, InventoryRiskResult, SupplierRiskReport,
};
use tracing_subscriber::EnvFilter;

/// Supplier risk evaluator.
#[derive(Parser)]
#[command(name = "supplier-risk", version, about)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Composite risk for one supplier.
  Evaluate {
    /// Supplier id to evaluate (e.g. SUP001).
    #[arg(short = 's', long)]
    supplier_id: String,
    /// Enterprise latitude (used only together with --enterprise-lon).
    #[arg(long, allow_negative_numbers = true)]
    enterprise_lat: Option<f64>,
    /// Enterprise longitude (used only together with --enterprise-lat).
    #[arg(long, allow_negative_numbers = true)]
    enterprise_lon: Option<f64>,
    /// Read suppliers from a JSON file instead of Neo4j.
    #[arg(long)]
    suppliers_file: Option<PathBuf>,
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
  },
  /// Stock-level risk tier for one inventory item.
  Inventory {
    #[arg(short = 'i', long)]
    item_id: String,
    #[arg(long)]
    json: bool,
  },
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();
  if let Err(e) = run(cli).await {
    let _ = writeln!(io::stderr(), "supplier-risk error: {}", e);
    std::process::exit(1);
  }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
  let config = Config::from_env()?;
  let mut clients = ClientSet::from_env()?;

  match cli.command {
    Command::Evaluate {
      supplier_id,
      enterprise_lat,
      enterprise_lon,
      suppliers_file,
      json,
    } => {
      if let Some(path) = suppliers_file {
        clients.graph = Arc::new(StaticGraph::from_path(path)?);
      }
      let reference = match (enterprise_lat, enterprise_lon) {
        (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
        _ => None,
      };

      let engine = Engine::new(config, clients.graph, clients.geocoder, clients.weather)?;
      let report = engine.evaluate_supplier(&supplier_id, reference, None).await?;

      let mut out = io::BufWriter::new(io::stdout().lock());
      if json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
      } else {
        write_report(&mut out, &report)?;
      }
      out.flush()?;
    }
    Command::Inventory { item_id, json } => {
      let monitor = InventoryMonitor::new(clients.inventory, config.inventory_thresholds, config.call_timeout)?;
      let result = monitor.assess(&item_id).await;

      let mut out = io::BufWriter::new(io::stdout().lock());
      if json {
        serde_json::to_writer_pretty(&mut out, &result)?;
        writeln!(out)?;
      } else {
        write_inventory(&mut out, &result)?;
      }
      out.flush()?;
    }
  }
  Ok(())
}

fn write_report(out: &mut impl Write, r: &SupplierRiskReport) -> io::Result<()> {
  writeln!(out, "===== Supplier Risk Evaluation =====")?;
  writeln!(out, "Supplier: {} - {}", r.supplier_id, r.supplier_name)?;
  writeln!(out, "Dependency risk (0-10): {:.2}", r.risk.dependency_risk)?;
  match r.risk.distance_km {
    Some(km) => writeln!(out, "Distance (km): {:.2}", km)?,
    None => writeln!(out, "Distance (km): None")?,
  }
  writeln!(out, "Distance risk (0-10): {:.2}", r.risk.distance_risk)?;
  writeln!(out, "Weather risk (0-10): {:.2}", r.risk.weather_risk)?;
  writeln!(out, "Composite risk (0-10): {:.2}", r.risk.composite_risk)?;
  writeln!(out, "Recommendation:")?;
  for rec in &r.risk.recommendations {
    writeln!(out, " - {}", rec)?;
  }
  Ok(())
}

fn write_inventory(out: &mut impl Write, r: &InventoryRiskResult) -> io::Result<()> {
  writeln!(out, "===== Inventory Risk =====")?;
  writeln!(out, "Item: {}", r.item_id)?;
  match r.stock_level {
    Some(stock) => writeln!(out, "Stock level: {}", stock)?,
    None => writeln!(out, "Stock level: N/A")?,
  }
  match r.risk_tier {
    InventoryRisk::Tier(t) => writeln!(out, "Risk tier (1-5): {}", t.level())?,
    InventoryRisk::Unavailable => writeln!(out, "Risk tier (1-5): N/A")?,
  }
  writeln!(out, "Status: {}", r.status)?;
  Ok(())
}
