//! Catalog snapshot stored as JSON.
//!
//! The file maps table names to their column rows:
//!
//! ```json
//! {
//!   "tOrder": [
//!     { "column_name": "kOrder", "data_type": "int", "ordinal_position": 1, "is_identity": true }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::core::{CatalogSource, RawColumn};
use crate::error::{Result, ScaffoldError};

/// In-memory catalog, usually loaded from a snapshot file.
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    tables: BTreeMap<String, Vec<RawColumn>>,
}

impl JsonCatalog {
    /// Load a snapshot file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        info!("Loaded catalog snapshot {:?} ({} tables)", path, catalog.tables.len());
        Ok(catalog)
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let tables = serde_json::from_str(json)?;
        Ok(Self { tables })
    }

    /// Add or replace a table.
    pub fn with_table(mut self, table_name: impl Into<String>, columns: Vec<RawColumn>) -> Self {
        self.tables.insert(table_name.into(), columns);
        self
    }
}

#[async_trait]
impl CatalogSource for JsonCatalog {
    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<RawColumn>> {
        self.tables
            .get(table_name)
            .cloned()
            .ok_or_else(|| ScaffoldError::Catalog(format!("table {} not found in snapshot", table_name)))
    }

    fn source_type(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "tOrder": [
            { "column_name": "cName", "data_type": "nvarchar", "ordinal_position": 2, "max_length": 40 },
            { "column_name": "kOrder", "data_type": "int", "ordinal_position": 1, "is_identity": true }
        ]
    }"#;

    #[tokio::test]
    async fn test_fetch_known_table() {
        let catalog = JsonCatalog::from_json(SNAPSHOT).unwrap();
        let columns = catalog.fetch_columns("tOrder").await.unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].max_length, 40);
        assert!(!columns[0].is_nullable);
        assert!(columns[1].is_identity);
    }

    #[tokio::test]
    async fn test_unknown_table_is_catalog_error() {
        let catalog = JsonCatalog::from_json(SNAPSHOT).unwrap();
        let err = catalog.fetch_columns("tMissing").await.unwrap_err();
        assert!(matches!(err, ScaffoldError::Catalog(_)));
    }

    #[test]
    fn test_malformed_snapshot() {
        assert!(matches!(
            JsonCatalog::from_json("{ \"tOrder\": 5 }"),
            Err(ScaffoldError::Json(_))
        ));
    }
}
