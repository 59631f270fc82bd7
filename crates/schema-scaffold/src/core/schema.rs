//! Column metadata as read from the catalog, and the field model derived from it.
//!
//! A [`RawColumn`] is one catalog row. A [`Field`] is the resolved view the
//! renderers consume. Both are created per table pass and never mutated
//! once built.

use serde::{Deserialize, Serialize};

use crate::typemap::ScalarKind;

/// One catalog row describing a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawColumn {
    /// Column name as declared (e.g., "kCustomer").
    pub column_name: String,

    /// Type tag (e.g., "int", "nvarchar", "timestamp").
    pub data_type: String,

    /// Ordinal position (1-based, unique within a table).
    pub ordinal_position: i32,

    /// Whether the column allows NULL.
    #[serde(default)]
    pub is_nullable: bool,

    /// Whether the column is an identity column.
    #[serde(default)]
    pub is_identity: bool,

    /// Maximum length in characters (0 if not applicable).
    #[serde(default)]
    pub max_length: u32,

    /// Numeric precision (0 if not applicable).
    #[serde(default)]
    pub numeric_precision: u32,

    /// Numeric scale (0 if not applicable).
    #[serde(default)]
    pub numeric_scale: u32,
}

impl RawColumn {
    /// Create a column with the given name and type and no length/precision.
    pub fn new(column_name: impl Into<String>, data_type: impl Into<String>, ordinal: i32) -> Self {
        Self {
            column_name: column_name.into(),
            data_type: data_type.into(),
            ordinal_position: ordinal,
            is_nullable: false,
            is_identity: false,
            max_length: 0,
            numeric_precision: 0,
            numeric_scale: 0,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn identity(mut self) -> Self {
        self.is_identity = true;
        self
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.numeric_precision = precision;
        self.numeric_scale = scale;
        self
    }
}

/// Structural metadata attached to a field.
///
/// These say *what* a field needs; the dialect decides how it is spelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Annotation {
    /// Maps the property to its column.
    Column { name: String },
    /// Maximum text length.
    MaxLength { length: u32 },
    /// Numeric precision and scale.
    Precision { precision: u32, scale: u32 },
    /// Row-version concurrency token.
    RowStamp,
}

/// Default-value expression a property is initialized with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initializer {
    EmptyString,
    EmptyBytes,
}

/// A column resolved for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub column_name: String,

    /// Property name chosen by the naming policy. Never empty.
    pub property_name: String,

    pub data_type: String,

    pub kind: ScalarKind,

    pub ordinal_position: i32,

    /// Always false for row-stamp fields.
    pub is_nullable: bool,

    pub is_identity: bool,

    pub max_length: u32,

    pub numeric_precision: u32,

    pub numeric_scale: u32,

    /// Ordered: column annotation first, then at most one length,
    /// precision or row-stamp annotation.
    pub annotations: Vec<Annotation>,

    pub initializer: Option<Initializer>,
}

impl Field {
    /// Row-version stamp column.
    pub fn is_row_stamp(&self) -> bool {
        self.kind.is_row_stamp()
    }
}
