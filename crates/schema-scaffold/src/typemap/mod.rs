//! Mapping from MSSQL catalog type tags to scalar kinds.
//!
//! The lookup is a static table keyed by the lower-cased `DATA_TYPE` tag.
//! How a kind is spelled in generated source lives with the renderer's
//! [`ClassDialect`](crate::core::ClassDialect), not here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic data category a column resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    /// 32-bit signed integer.
    Int32,
    /// Small integer (MSSQL `tinyint`, 0..=255).
    SmallInt,
    Boolean,
    Text,
    /// Exactly one character (`char(1)`).
    Character,
    DateTime,
    Decimal,
    SingleFloat,
    DoubleFloat,
    /// Opaque byte sequence used as a row-version stamp.
    Bytes,
    Guid,
    /// Anything the table below does not know.
    Opaque,
}

/// Raw type tag → scalar kind.
const RAW_TYPE_TABLE: &[(&str, ScalarKind)] = &[
    ("int", ScalarKind::Int32),
    ("tinyint", ScalarKind::SmallInt),
    ("bit", ScalarKind::Boolean),
    ("char", ScalarKind::Text),
    ("nchar", ScalarKind::Text),
    ("varchar", ScalarKind::Text),
    ("nvarchar", ScalarKind::Text),
    ("datetime", ScalarKind::DateTime),
    ("decimal", ScalarKind::Decimal),
    ("float", ScalarKind::DoubleFloat),
    ("real", ScalarKind::SingleFloat),
    ("timestamp", ScalarKind::Bytes),
    ("rowversion", ScalarKind::Bytes),
    ("uniqueidentifier", ScalarKind::Guid),
];

/// The fixed-length single-byte text tag; `char(1)` resolves to [`ScalarKind::Character`].
const FIXED_CHAR_TAG: &str = "char";

/// Tags that take the national-string literal prefix (`N'...'`).
const NATIONAL_TEXT_TAGS: &[&str] = &["nchar", "nvarchar"];

/// Resolve an MSSQL type tag to its scalar kind.
///
/// Unknown tags never fail; they resolve to [`ScalarKind::Opaque`].
pub fn resolve_kind(raw_type: &str, max_length: u32) -> ScalarKind {
    let tag = raw_type.trim().to_lowercase();

    if tag == FIXED_CHAR_TAG && max_length == 1 {
        return ScalarKind::Character;
    }

    RAW_TYPE_TABLE
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, kind)| *kind)
        .unwrap_or(ScalarKind::Opaque)
}

/// Whether a raw tag is a national (Unicode) text type.
pub fn is_national_text(raw_type: &str) -> bool {
    let tag = raw_type.trim().to_lowercase();
    NATIONAL_TEXT_TAGS.contains(&tag.as_str())
}

impl ScalarKind {
    /// Kinds that carry a precision/scale annotation.
    pub fn has_precision(self) -> bool {
        matches!(
            self,
            ScalarKind::Decimal | ScalarKind::SingleFloat | ScalarKind::DoubleFloat
        )
    }

    /// Kinds rendered as a numeric literal in random-literal mode.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ScalarKind::SmallInt
                | ScalarKind::Int32
                | ScalarKind::Decimal
                | ScalarKind::SingleFloat
                | ScalarKind::DoubleFloat
        )
    }

    /// Row-version stamp column.
    pub fn is_row_stamp(self) -> bool {
        self == ScalarKind::Bytes
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Int32 => "int32",
            ScalarKind::SmallInt => "small_int",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Text => "text",
            ScalarKind::Character => "character",
            ScalarKind::DateTime => "date_time",
            ScalarKind::Decimal => "decimal",
            ScalarKind::SingleFloat => "single_float",
            ScalarKind::DoubleFloat => "double_float",
            ScalarKind::Bytes => "bytes",
            ScalarKind::Guid => "guid",
            ScalarKind::Opaque => "opaque",
        };
        f.write_str(name)
    }
}
