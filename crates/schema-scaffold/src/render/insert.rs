//! INSERT statement rendering.
//!
//! Column selection is fixed policy: identity and row-stamp columns are
//! never inserted, nullable columns only on request. What goes into the
//! VALUES list is decided by a [`ValueSource`].

use chrono::{Duration, NaiveDate};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::Field;
use crate::error::{Result, ScaffoldError};
use crate::typemap::{is_national_text, ScalarKind};

/// Upper bound on generated string literal length.
pub const MAX_RANDOM_TEXT_LEN: u32 = 32;

/// Length used when the column reports no maximum length.
pub const MIN_RANDOM_TEXT_LEN: u32 = 1;

/// Numeric literals are drawn from this range.
const NUMERIC_RANGE: std::ops::Range<i32> = 1..10;

/// Options for INSERT rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertOptions {
    /// Include nullable columns.
    pub include_nullable: bool,
}

/// Produces the VALUES entry for one field.
pub trait ValueSource: Send {
    fn value(&mut self, table_name: &str, field: &Field) -> Result<String>;
}

/// Named placeholders (`@column`), no literal data.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parameters;

impl ValueSource for Parameters {
    fn value(&mut self, _table_name: &str, field: &Field) -> Result<String> {
        Ok(format!("@{}", field.column_name))
    }
}

/// Type-appropriate random literals.
///
/// Owns its random number generator, so one instance serves exactly one
/// table and seeded tests are reproducible.
#[derive(Debug, Clone)]
pub struct RandomLiterals<R> {
    rng: R,
    today: NaiveDate,
}

impl<R: Rng + Send> RandomLiterals<R> {
    /// Date-time literals fall in `[date_floor, today)`, or on the day
    /// before `today` when `today` is not after the floor.
    pub fn new(rng: R, today: NaiveDate) -> Self {
        Self { rng, today }
    }

    /// Earliest date a date-time literal can take.
    pub fn date_floor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    fn text(&mut self, len: u32) -> String {
        (0..len)
            .map(|_| char::from(self.rng.sample(Alphanumeric)))
            .collect()
    }

    fn text_len(&mut self, max_length: u32) -> u32 {
        if max_length == 0 {
            return MIN_RANDOM_TEXT_LEN;
        }
        let bound = max_length.min(MAX_RANDOM_TEXT_LEN);
        self.rng.gen_range(MIN_RANDOM_TEXT_LEN..=bound)
    }

    fn date_time(&mut self) -> String {
        // A "today" at or before the floor pulls the floor back to the day before.
        let floor = Self::date_floor().min(self.today.pred_opt().unwrap_or(self.today));
        let span = (self.today - floor).num_days();
        let offset = if span > 0 {
            self.rng.gen_range(0..span)
        } else {
            0
        };
        let date = floor + Duration::days(offset);
        format!("'{}'", date.format("%Y-%m-%dT00:00:00"))
    }
}

impl<R: Rng + Send> ValueSource for RandomLiterals<R> {
    fn value(&mut self, table_name: &str, field: &Field) -> Result<String> {
        let literal = match field.kind {
            k if k.is_numeric() => self.rng.gen_range(NUMERIC_RANGE).to_string(),
            ScalarKind::Text => {
                let len = self.text_len(field.max_length);
                let prefix = if is_national_text(&field.data_type) { "N" } else { "" };
                format!("{}'{}'", prefix, self.text(len))
            }
            ScalarKind::Character => format!("'{}'", self.text(1)),
            ScalarKind::Boolean => self.rng.gen_range(0..2).to_string(),
            ScalarKind::DateTime => self.date_time(),
            ScalarKind::Guid => {
                let uuid = uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid();
                format!("'{}'", uuid)
            }
            other => {
                return Err(ScaffoldError::unsupported_value(
                    table_name,
                    &field.column_name,
                    other.to_string(),
                ))
            }
        };
        Ok(literal)
    }
}

/// A rendered-but-not-yet-joined INSERT statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    pub full_table_name: String,
    pub columns: Vec<String>,
    pub values: Vec<String>,
}

impl InsertStatement {
    /// Join into SQL text, one column and one value per line.
    pub fn to_sql(&self) -> String {
        format!(
            "INSERT INTO {} (\n{}\n) VALUES (\n{}\n)\n",
            self.full_table_name,
            self.columns.join("\n,"),
            self.values.join("\n,")
        )
    }
}

/// Fields that take part in an INSERT, in ordinal order.
pub fn insertable_fields<'a>(fields: &'a [Field], options: &InsertOptions) -> Vec<&'a Field> {
    let mut selected: Vec<&Field> = fields
        .iter()
        .filter(|f| !f.is_identity && !f.is_row_stamp())
        .filter(|f| options.include_nullable || !f.is_nullable)
        .collect();
    selected.sort_by_key(|f| f.ordinal_position);
    selected
}

/// Build the column and value lists for one table.
pub fn build_insert(
    table_name: &str,
    full_table_name: &str,
    fields: &[Field],
    options: &InsertOptions,
    values: &mut dyn ValueSource,
) -> Result<InsertStatement> {
    let selected = insertable_fields(fields, options);
    if selected.is_empty() {
        return Err(ScaffoldError::NoInsertableColumns(table_name.to_string()));
    }

    let mut statement = InsertStatement {
        full_table_name: full_table_name.to_string(),
        columns: Vec::with_capacity(selected.len()),
        values: Vec::with_capacity(selected.len()),
    };

    for field in selected {
        statement.values.push(values.value(table_name, field)?);
        statement.columns.push(field.column_name.clone());
    }

    Ok(statement)
}

/// Render one INSERT statement as SQL text.
pub fn render_insert(
    table_name: &str,
    full_table_name: &str,
    fields: &[Field],
    options: &InsertOptions,
    values: &mut dyn ValueSource,
) -> Result<String> {
    build_insert(table_name, full_table_name, fields, options, values).map(|s| s.to_sql())
}
