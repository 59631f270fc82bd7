//! Core types and boundaries shared by every stage of generation.
//!
//! - [`schema`]: catalog rows, fields and their annotations
//! - [`traits`]: catalog source, artifact sink and class dialect seams

pub mod schema;
pub mod traits;

pub use schema::{Annotation, Field, Initializer, RawColumn};
pub use traits::{ArtifactSink, CatalogSource, ClassDialect};
