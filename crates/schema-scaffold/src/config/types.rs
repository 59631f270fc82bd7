//! Configuration type definitions.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Named source connections, referenced by jobs.
    #[serde(default)]
    pub connections: BTreeMap<String, SourceConfig>,

    /// Model class generation job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<ClassJob>,

    /// INSERT statement generation job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserts: Option<InsertJob>,
}

impl Config {
    /// Look up a named connection.
    pub fn connection(&self, name: &str) -> Option<&SourceConfig> {
        self.connections.get(name)
    }
}

/// Source database (MSSQL) configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Database host.
    pub host: String,

    /// Database port (default: 1433).
    #[serde(default = "default_mssql_port")]
    pub port: u16,

    /// Database name.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,

    /// Schema the tables live in (default: "dbo").
    #[serde(default = "default_dbo_schema")]
    pub schema: String,

    /// Encrypt connection (default: "true").
    #[serde(default = "default_true_string")]
    pub encrypt: String,

    /// Trust server certificate (default: false).
    #[serde(default)]
    pub trust_server_cert: bool,
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("schema", &self.schema)
            .field("encrypt", &self.encrypt)
            .field("trust_server_cert", &self.trust_server_cert)
            .finish()
    }
}

/// Model class generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassJob {
    /// Name of the connection in [`Config::connections`].
    pub connection: String,

    /// Directory generated class files are written to.
    pub output_dir: PathBuf,

    /// Namespace wrapping each class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Emit the import block (default: true).
    #[serde(default = "default_true")]
    pub emit_imports: bool,

    /// Tables to generate.
    #[serde(default)]
    pub tables: Vec<ClassTable>,
}

/// One table of a class job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTable {
    /// Catalog table name.
    pub table_name: String,

    /// Generated class name, also the file stem.
    pub class_name: String,
}

/// INSERT statement generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertJob {
    /// Name of the connection in [`Config::connections`].
    pub connection: String,

    /// Directory generated SQL files are written to.
    pub output_dir: PathBuf,

    /// Include nullable columns (default: false).
    #[serde(default)]
    pub include_nullable: bool,

    /// Random literals instead of named placeholders (default: false).
    #[serde(default)]
    pub use_random_literals: bool,

    /// Seed for random literals. Entropy when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Tables to generate.
    #[serde(default)]
    pub tables: Vec<InsertTable>,
}

/// One table of an insert job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertTable {
    /// Catalog table name.
    pub table_name: String,

    /// Name used after `INSERT INTO`, also the file stem (e.g., "dbo.tOrder").
    pub full_table_name: String,
}

// Default value functions for serde
fn default_mssql_port() -> u16 {
    1433
}

fn default_dbo_schema() -> String {
    "dbo".to_string()
}

fn default_true_string() -> String {
    "true".to_string()
}

fn default_true() -> bool {
    true
}
