//! Target-language dialects for generated model classes.
//!
//! Each dialect implements [`ClassDialect`](crate::core::ClassDialect) and
//! owns the spelling of types, annotations and initializers.
//!
//! # Available Dialects
//!
//! - [`CSharpDialect`]: C# with `System.ComponentModel.DataAnnotations`

mod csharp;

pub use csharp::CSharpDialect;
