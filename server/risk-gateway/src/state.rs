use supplier_risk::{Engine, InventoryMonitor};

/// Shared handler state. Both members are cheap to clone and hold their own client pools.
pub struct AppState {
  pub engine: Engine,
  pub inventory: InventoryMonitor,
}
