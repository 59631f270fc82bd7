//! Text renderers for generated artifacts.
//!
//! - [`class`]: model class source through a [`ClassDialect`](crate::core::ClassDialect)
//! - [`insert`]: `INSERT` statements with placeholder or random-literal values

pub mod class;
pub mod insert;

pub use class::{render_class, ClassOptions};
pub use insert::{
    build_insert, insertable_fields, render_insert, InsertOptions, InsertStatement, Parameters,
    RandomLiterals, ValueSource,
};
