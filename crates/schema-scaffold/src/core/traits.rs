//! Boundaries to the outside world.
//!
//! - [`CatalogSource`]: yields the raw column rows of one table
//! - [`ArtifactSink`]: stores one generated text artifact
//! - [`ClassDialect`]: how one target language spells a model class
//!
//! The generator only talks to these traits, so a live server, a snapshot
//! file or an in-memory fixture can stand behind them interchangeably.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::typemap::ScalarKind;

use super::schema::{Annotation, Initializer, RawColumn};

/// Read column metadata for a table.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every column of `table_name`.
    ///
    /// Rows may come back in any order; callers sort by ordinal position.
    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<RawColumn>>;

    /// Short name of the backend, used in log output.
    fn source_type(&self) -> &str;
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Box<T> {
    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<RawColumn>> {
        (**self).fetch_columns(table_name).await
    }

    fn source_type(&self) -> &str {
        (**self).source_type()
    }
}

/// Write a rendered artifact to a destination.
pub trait ArtifactSink: Send + Sync {
    /// Replace whatever exists at `path` with `text`.
    ///
    /// Readers must never observe a partially written artifact.
    fn write_artifact(&self, path: &Path, text: &str) -> Result<()>;
}

/// Source syntax of a target language for generated model classes.
///
/// Only the renderer calls into this, and it is the only place that knows
/// how a type, annotation or initializer is written. A new target language
/// is a new implementation of this trait.
pub trait ClassDialect: Send + Sync {
    /// Get the dialect identifier (e.g., "csharp").
    fn name(&self) -> &str;

    /// File extension for generated artifacts, without the dot.
    fn file_extension(&self) -> &str;

    /// Lines of the import block.
    fn imports(&self) -> &[&str];

    /// Spelling of a scalar kind.
    fn type_name(&self, kind: ScalarKind) -> &str;

    /// Spelling of a field annotation.
    fn annotation(&self, annotation: &Annotation) -> String;

    /// Annotation binding the class to its table.
    fn table_annotation(&self, table_name: &str) -> String;

    /// Spelling of a property initializer expression.
    fn initializer(&self, initializer: Initializer) -> &str;

    /// Namespace declaration line (the block is opened by the renderer).
    fn namespace_declaration(&self, namespace: &str) -> String;

    /// Class declaration line (the block is opened by the renderer).
    fn class_declaration(&self, class_name: &str) -> String;

    /// Property declaration line.
    fn property_declaration(
        &self,
        type_name: &str,
        nullable: bool,
        property_name: &str,
        initializer: Option<&str>,
    ) -> String;

    /// Block delimiters.
    fn block(&self) -> (&str, &str) {
        ("{", "}")
    }
}
