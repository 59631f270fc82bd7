//! C# dialect: data-annotation attributes and auto-properties.

use crate::core::traits::ClassDialect;
use crate::core::{Annotation, Initializer};
use crate::typemap::ScalarKind;

const CSHARP_IMPORTS: &[&str] = &[
    "using System;",
    "using System.ComponentModel.DataAnnotations;",
    "using System.ComponentModel.DataAnnotations.Schema;",
    "using Microsoft.EntityFrameworkCore;",
];

/// C# model classes for Entity Framework style mapping.
#[derive(Debug, Clone, Default)]
pub struct CSharpDialect;

impl CSharpDialect {
    /// Create a new C# dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl ClassDialect for CSharpDialect {
    fn name(&self) -> &str {
        "csharp"
    }

    fn file_extension(&self) -> &str {
        "cs"
    }

    fn imports(&self) -> &[&str] {
        CSHARP_IMPORTS
    }

    fn type_name(&self, kind: ScalarKind) -> &str {
        match kind {
            ScalarKind::Int32 => "int",
            ScalarKind::SmallInt => "byte",
            ScalarKind::Boolean => "bool",
            ScalarKind::Text => "string",
            ScalarKind::Character => "char",
            ScalarKind::DateTime => "DateTime",
            ScalarKind::Decimal => "decimal",
            ScalarKind::SingleFloat => "float",
            ScalarKind::DoubleFloat => "double",
            ScalarKind::Bytes => "byte[]",
            ScalarKind::Guid => "Guid",
            ScalarKind::Opaque => "object",
        }
    }

    fn annotation(&self, annotation: &Annotation) -> String {
        match annotation {
            Annotation::Column { name } => format!("[Column(\"{}\")]", name),
            Annotation::MaxLength { length } => format!("[MaxLength({})]", length),
            Annotation::Precision { precision, scale } => {
                format!("[Precision({}, {})]", precision, scale)
            }
            Annotation::RowStamp => "[Timestamp]".to_string(),
        }
    }

    fn table_annotation(&self, table_name: &str) -> String {
        format!("[Table(\"{}\")]", table_name)
    }

    fn initializer(&self, initializer: Initializer) -> &str {
        match initializer {
            Initializer::EmptyString => "string.Empty",
            Initializer::EmptyBytes => "Array.Empty<byte>()",
        }
    }

    fn namespace_declaration(&self, namespace: &str) -> String {
        format!("namespace {}", namespace)
    }

    fn class_declaration(&self, class_name: &str) -> String {
        format!("public class {}", class_name)
    }

    fn property_declaration(
        &self,
        type_name: &str,
        nullable: bool,
        property_name: &str,
        initializer: Option<&str>,
    ) -> String {
        let mut line = format!(
            "public {}{} {} {{ get; set; }}",
            type_name,
            if nullable { "?" } else { "" },
            property_name
        );
        if let Some(init) = initializer {
            line.push_str(&format!(" = {};", init));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_spelling() {
        let d = CSharpDialect::new();
        assert_eq!(
            d.annotation(&Annotation::Column { name: "kOrder".into() }),
            "[Column(\"kOrder\")]"
        );
        assert_eq!(d.annotation(&Annotation::MaxLength { length: 40 }), "[MaxLength(40)]");
        assert_eq!(
            d.annotation(&Annotation::Precision { precision: 18, scale: 4 }),
            "[Precision(18, 4)]"
        );
        assert_eq!(d.annotation(&Annotation::RowStamp), "[Timestamp]");
    }

    #[test]
    fn test_property_declaration() {
        let d = CSharpDialect::new();
        assert_eq!(
            d.property_declaration("int", true, "CustomerId", None),
            "public int? CustomerId { get; set; }"
        );
        assert_eq!(
            d.property_declaration("string", false, "Name", Some("string.Empty")),
            "public string Name { get; set; } = string.Empty;"
        );
    }

    #[test]
    fn test_type_names() {
        let d = CSharpDialect::new();
        assert_eq!(d.type_name(ScalarKind::SmallInt), "byte");
        assert_eq!(d.type_name(ScalarKind::Bytes), "byte[]");
        assert_eq!(d.type_name(ScalarKind::Opaque), "object");
    }
}
