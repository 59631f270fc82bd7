//! Field model builder: raw catalog rows to resolved [`Field`]s.

use tracing::{debug, warn};

use crate::core::{Annotation, Field, Initializer, RawColumn};
use crate::error::{Result, ScaffoldError};
use crate::naming::resolve_name;
use crate::typemap::{resolve_kind, ScalarKind};

/// Build the field for one column.
///
/// Returns `Ok(None)` when the column has no usable name or type and should
/// be skipped. A name the naming policy rejects is a format error for the
/// whole table.
pub fn build_field(raw: &RawColumn, table_name: &str) -> Result<Option<Field>> {
    if raw.column_name.trim().is_empty() {
        debug!("{}: skipping column at position {} with empty name", table_name, raw.ordinal_position);
        return Ok(None);
    }

    let property_name = resolve_name(&raw.column_name, table_name)
        .map_err(|e| ScaffoldError::format(table_name, &raw.column_name, e.to_string()))?;

    if property_name.trim().is_empty() {
        debug!("{}: skipping column {}, resolved to an empty name", table_name, raw.column_name);
        return Ok(None);
    }

    if raw.data_type.trim().is_empty() {
        debug!("{}: skipping column {} with empty data type", table_name, raw.column_name);
        return Ok(None);
    }

    let kind = resolve_kind(&raw.data_type, raw.max_length);

    if kind == ScalarKind::Opaque {
        warn!(
            "{}: column {} has unsupported type '{}', rendering as opaque",
            table_name, raw.column_name, raw.data_type
        );
    }

    let is_nullable = raw.is_nullable && !kind.is_row_stamp();

    Ok(Some(Field {
        column_name: raw.column_name.clone(),
        property_name,
        data_type: raw.data_type.clone(),
        kind,
        ordinal_position: raw.ordinal_position,
        is_nullable,
        is_identity: raw.is_identity,
        max_length: raw.max_length,
        numeric_precision: raw.numeric_precision,
        numeric_scale: raw.numeric_scale,
        annotations: annotations_for(raw, kind),
        initializer: initializer_for(kind, is_nullable),
    }))
}

/// Build every usable field of a table, ordered by ordinal position.
pub fn build_fields(columns: &[RawColumn], table_name: &str) -> Result<Vec<Field>> {
    let mut fields = Vec::with_capacity(columns.len());

    for raw in columns {
        if let Some(field) = build_field(raw, table_name)? {
            fields.push(field);
        }
    }

    fields.sort_by_key(|f| f.ordinal_position);

    if fields
        .windows(2)
        .any(|pair| pair[0].ordinal_position == pair[1].ordinal_position)
    {
        warn!("{}: catalog returned duplicate ordinal positions", table_name);
    }

    debug!("{}: built {} of {} columns", table_name, fields.len(), columns.len());

    Ok(fields)
}

fn annotations_for(raw: &RawColumn, kind: ScalarKind) -> Vec<Annotation> {
    let mut annotations = vec![Annotation::Column {
        name: raw.column_name.clone(),
    }];

    match kind {
        ScalarKind::Text if raw.max_length > 0 => annotations.push(Annotation::MaxLength {
            length: raw.max_length,
        }),
        ScalarKind::Bytes => annotations.push(Annotation::RowStamp),
        k if k.has_precision() => annotations.push(Annotation::Precision {
            precision: raw.numeric_precision,
            scale: raw.numeric_scale,
        }),
        _ => {}
    }

    annotations
}

fn initializer_for(kind: ScalarKind, is_nullable: bool) -> Option<Initializer> {
    match kind {
        ScalarKind::Bytes => Some(Initializer::EmptyBytes),
        ScalarKind::Text if !is_nullable => Some(Initializer::EmptyString),
        _ => None,
    }
}
