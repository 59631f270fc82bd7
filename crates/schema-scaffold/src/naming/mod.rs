//! Prefix-encoded column naming convention.
//!
//! Column names carry a one-letter lower-case tag followed by an upper-case
//! stem, e.g. `kCustomer`, `cName`, `dCreated`. The tag is consumed here and
//! the stem becomes the property name:
//!
//! | tag | meaning                     | property          |
//! |-----|-----------------------------|-------------------|
//! | `k` | key (own or referenced)     | `Id` / `<stem>Id` |
//! | `t` | tagged foreign key (`_k`)   | `<head>Id`        |
//! | `d` | date/time                   | `<stem>Time`      |
//! | `c` `f` `n` `b` | text, float, numeric, boolean | `<stem>` |
//!
//! A `t` column without a qualifying `_k` marker is rejected, as is any
//! other tag. There is no generic fallback that silently strips an unknown
//! tag.

use thiserror::Error;

/// Naming policy failure. Fatal for the table being generated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("column name is too short to carry a type prefix")]
    TooShort,

    #[error("second character '{0}' is not an upper-case letter")]
    NotUpperCase(char),

    #[error("unknown column prefix '{0}'")]
    UnknownPrefix(char),

    #[error("'t' column needs more than 4 characters and a '_k' key marker")]
    MissingKeyMarker,
}

/// Resolve a column name to a property name.
///
/// `table_name` is the raw table name, whose own first character is a tag
/// as well (`tCustomer`); it decides whether a `k` column is the table's
/// own key.
pub fn resolve_name(column_name: &str, table_name: &str) -> Result<String, NameError> {
    let mut chars = column_name.chars();
    let tag = chars.next().ok_or(NameError::TooShort)?;
    let second = chars.clone().next().ok_or(NameError::TooShort)?;

    if !second.is_uppercase() {
        return Err(NameError::NotUpperCase(second));
    }

    let stem = chars.as_str();

    match tag {
        'k' => {
            if strip_first(table_name) == stem {
                Ok("Id".to_string())
            } else {
                Ok(format!("{}Id", stem))
            }
        }
        't' => match column_name.rfind("_k") {
            Some(idx) if column_name.chars().count() > 4 => {
                Ok(format!("{}Id", &column_name[tag.len_utf8()..idx]))
            }
            _ => Err(NameError::MissingKeyMarker),
        },
        'd' => Ok(format!("{}Time", stem)),
        'c' | 'f' | 'n' | 'b' => Ok(stem.to_string()),
        other => Err(NameError::UnknownPrefix(other)),
    }
}

fn strip_first(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.as_str()
}
