//! # schema-scaffold
//!
//! Generate source artifacts from an MSSQL column catalog.
//!
//! This library turns the columns of a table into:
//!
//! - **Model classes** annotated with column, length, precision and
//!   row-version metadata (C# out of the box)
//! - **INSERT statements** with named placeholders or random
//!   type-appropriate literals for seeding test databases
//!
//! Column names follow a one-letter prefix convention (`kCustomer`,
//! `cName`, `dCreated`) that the [`naming`] policy decodes into property
//! names.
//!
//! ## Example
//!
//! ```rust,no_run
//! use schema_scaffold::{Config, FsSink, Generator, MssqlCatalog};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let job = config.classes.clone().expect("classes job");
//!     let source = config.connection(&job.connection).expect("connection").clone();
//!     let catalog = MssqlCatalog::connect(source).await?;
//!     let report = Generator::new(catalog, FsSink::new())
//!         .generate_classes(&job)
//!         .await?;
//!     println!("Generated {} classes", report.tables_success);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod dialect;
pub mod error;
pub mod naming;
pub mod orchestrator;
pub mod render;
pub mod sink;
pub mod source;
pub mod typemap;

// Re-exports for convenient access
pub use config::{ClassJob, ClassTable, Config, InsertJob, InsertTable, SourceConfig};
pub use crate::core::{Annotation, ArtifactSink, CatalogSource, ClassDialect, Field, Initializer, RawColumn};
pub use dialect::CSharpDialect;
pub use error::{Result, ScaffoldError};
pub use naming::{resolve_name, NameError};
pub use orchestrator::{GenerationReport, Generator, TableFailure};
pub use sink::FsSink;
pub use source::{JsonCatalog, MssqlCatalog};
pub use typemap::ScalarKind;
