use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::ClientError;
use crate::normalize;
use crate::traits::SupplierGraph;
use crate::types::SupplierRecord;

/// In-memory supplier graph, e.g. loaded from the JSON output of an ingestion run.
#[derive(Debug, Clone, Default)]
pub struct StaticGraph {
  suppliers: HashMap<String, SupplierRecord>,
}

impl StaticGraph {
  pub fn new(suppliers: impl IntoIterator<Item = SupplierRecord>) -> Self {
    Self {
      suppliers: suppliers.into_iter().map(|s| (s.id.clone(), s)).collect(),
    }
  }

  /// Parse a JSON array of supplier property maps. Entries without an id are skipped.
  pub fn from_json_str(raw: &str) -> Result<Self, ClientError> {
    let parsed: Value = serde_json::from_str(raw)?;
    let entries = parsed
      .as_array()
      .ok_or_else(|| ClientError::InvalidResponse("expected a JSON array of suppliers".into()))?;

    let mut suppliers = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
      match normalize::supplier_id(entry) {
        Some(id) => suppliers.push(normalize::supplier(&id, entry)),
        None => tracing::warn!(index = idx, "skipping supplier entry without an id"),
      }
    }
    Ok(Self::new(suppliers))
  }

  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
    let raw = std::fs::read_to_string(path)?;
    Self::from_json_str(&raw)
  }

  pub fn len(&self) -> usize {
    self.suppliers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.suppliers.is_empty()
  }
}

#[async_trait::async_trait]
impl SupplierGraph for StaticGraph {
  fn name(&self) -> &'static str {
    "static"
  }

  async fn supplier(&self, supplier_id: &str) -> Result<Option<SupplierRecord>, ClientError> {
    Ok(self.suppliers.get(supplier_id).cloned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn loads_and_looks_up() {
    let raw = r#"[
      {"id": "SUP001", "name": "LankaCoco", "reliability": 0.9},
      {"name": "no id here"},
      {"id": "SUP002", "name": "Ceylon Rice", "incidents": [{"description": "drought", "severity": 0.7}]}
    ]"#;
    let g = StaticGraph::from_json_str(raw).unwrap();
    assert_eq!(g.len(), 2);
    let s = g.supplier("SUP002").await.unwrap().unwrap();
    assert_eq!(s.incidents[0].severity, Some(0.7));
    assert!(g.supplier("SUP999").await.unwrap().is_none());
  }

  #[test]
  fn rejects_non_array() {
    assert!(StaticGraph::from_json_str(r#"{"id": "SUP001"}"#).is_err());
  }
}
