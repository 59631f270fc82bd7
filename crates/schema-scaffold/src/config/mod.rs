//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
connections:
  shop:
    host: db.internal
    database: shop
    user: scaffold
    password: secret
classes:
  connection: shop
  output_dir: out/models
  namespace: Shop.Models
  tables:
    - table_name: tOrder
      class_name: Order
inserts:
  connection: shop
  output_dir: out/sql
  use_random_literals: true
  seed: 11
  tables:
    - table_name: tOrder
      full_table_name: dbo.tOrder
"#;

    #[test]
    fn test_from_yaml_applies_defaults() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        let source = config.connection("shop").unwrap();
        assert_eq!(source.port, 1433);
        assert_eq!(source.schema, "dbo");
        assert_eq!(source.encrypt, "true");

        let classes = config.classes.unwrap();
        assert!(classes.emit_imports);
        assert_eq!(classes.tables[0].class_name, "Order");

        let inserts = config.inserts.unwrap();
        assert!(!inserts.include_nullable);
        assert!(inserts.use_random_literals);
        assert_eq!(inserts.seed, Some(11));
    }

    #[test]
    fn test_from_yaml_rejects_dangling_connection() {
        let yaml = SAMPLE.replace("connection: shop\n  output_dir: out/sql", "connection: nope\n  output_dir: out/sql");
        assert!(Config::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_from_yaml_rejects_malformed() {
        assert!(matches!(
            Config::from_yaml("connections: [1, 2"),
            Err(crate::error::ScaffoldError::Yaml(_))
        ));
    }
}
