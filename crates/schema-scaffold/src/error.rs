//! Error types for the generation library.

use thiserror::Error;

/// Main error type for scaffolding operations.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source database connection or query error
    #[error("Source database error: {0}")]
    Source(#[from] tiberius::error::Error),

    /// Catalog lookup failed (unknown table, unreadable snapshot, etc.)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A column name could not be decoded by the naming policy
    #[error("Format error in table {table}, column {column:?}: {message}")]
    Format {
        table: String,
        column: String,
        message: String,
    },

    /// A field has no random-literal synthesis rule
    #[error("Cannot generate a random value for table {table}, column {column}: type '{kind}' is not supported")]
    UnsupportedValue {
        table: String,
        column: String,
        kind: String,
    },

    /// Every column was filtered out of the INSERT statement
    #[error("Table {0} has no insertable columns")]
    NoInsertableColumns(String),

    /// Artifact could not be written
    #[error("Failed to write artifact {path}: {message}")]
    Artifact { path: String, message: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScaffoldError {
    /// Create a Format error
    pub fn format(
        table: impl Into<String>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ScaffoldError::Format {
            table: table.into(),
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create an UnsupportedValue error
    pub fn unsupported_value(
        table: impl Into<String>,
        column: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        ScaffoldError::UnsupportedValue {
            table: table.into(),
            column: column.into(),
            kind: kind.into(),
        }
    }

    /// Create an Artifact error
    pub fn artifact(path: impl Into<String>, message: impl Into<String>) -> Self {
        ScaffoldError::Artifact {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error is a deterministic data problem confined to one table.
    ///
    /// Table-scoped errors fail that table only; everything else stops the job.
    pub fn is_table_scoped(&self) -> bool {
        matches!(
            self,
            ScaffoldError::Format { .. }
                | ScaffoldError::UnsupportedValue { .. }
                | ScaffoldError::NoInsertableColumns(_)
        )
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScaffoldError::Config(_) | ScaffoldError::Yaml(_) => 2,
            ScaffoldError::Source(_) | ScaffoldError::Catalog(_) => 3,
            ScaffoldError::Format { .. }
            | ScaffoldError::UnsupportedValue { .. }
            | ScaffoldError::NoInsertableColumns(_) => 4,
            ScaffoldError::Artifact { .. } | ScaffoldError::Io(_) | ScaffoldError::Json(_) => 5,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for scaffolding operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;
