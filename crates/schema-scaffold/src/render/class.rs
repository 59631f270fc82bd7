//! Model class rendering.

use serde::{Deserialize, Serialize};

use crate::core::{ClassDialect, Field};

const INDENT: &str = "    ";

/// Options for class rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassOptions {
    /// Emit the dialect's import block.
    pub emit_imports: bool,

    /// Wrap the class in this namespace when set and non-empty.
    pub namespace: Option<String>,
}

/// Render one table's fields as a model class.
///
/// Fields are emitted in ascending ordinal order whatever order they are
/// passed in. Identifiers are written verbatim.
pub fn render_class(
    dialect: &dyn ClassDialect,
    table_name: &str,
    class_name: &str,
    fields: &[Field],
    options: &ClassOptions,
) -> String {
    let mut out = ClassWriter::default();
    let (open, close) = dialect.block();

    if options.emit_imports {
        for line in dialect.imports() {
            out.line(line);
        }
        out.blank();
    }

    let namespace = options
        .namespace
        .as_deref()
        .map(str::trim)
        .filter(|ns| !ns.is_empty());

    if let Some(ns) = namespace {
        out.line(&dialect.namespace_declaration(ns));
        out.line(open);
        out.depth += 1;
    }

    out.line(&dialect.table_annotation(table_name));
    out.line(&dialect.class_declaration(class_name));
    out.line(open);
    out.depth += 1;

    let mut ordered: Vec<&Field> = fields.iter().collect();
    ordered.sort_by_key(|f| f.ordinal_position);

    for (i, field) in ordered.iter().enumerate() {
        if i > 0 {
            out.blank();
        }
        for annotation in &field.annotations {
            out.line(&dialect.annotation(annotation));
        }
        out.line(&dialect.property_declaration(
            dialect.type_name(field.kind),
            field.is_nullable,
            &field.property_name,
            field.initializer.map(|init| dialect.initializer(init)),
        ));
    }

    out.depth -= 1;
    out.line(close);

    if namespace.is_some() {
        out.depth -= 1;
        out.line(close);
    }

    out.finish()
}

#[derive(Default)]
struct ClassWriter {
    buf: String,
    depth: usize,
}

impl ClassWriter {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    fn blank(&mut self) {
        self.buf.push('\n');
    }

    fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_fields;
    use crate::core::RawColumn;
    use crate::dialect::CSharpDialect;

    fn order_columns() -> Vec<RawColumn> {
        vec![
            RawColumn::new("cName", "nvarchar", 2).with_max_length(50),
            RawColumn::new("kOrder", "int", 1).identity(),
            RawColumn::new("kCustomer", "int", 3).nullable(),
            RawColumn::new("fTotal", "decimal", 4).with_precision(18, 2),
            RawColumn::new("cRowVersion", "timestamp", 5).with_max_length(8),
        ]
    }

    fn render(options: &ClassOptions) -> String {
        let fields = build_fields(&order_columns(), "tOrder").unwrap();
        render_class(&CSharpDialect::new(), "tOrder", "Order", &fields, options)
    }

    #[test]
    fn test_full_class_with_namespace() {
        let text = render(&ClassOptions {
            emit_imports: true,
            namespace: Some("Shop.Models".into()),
        });

        let expected = "\
using System;
using System.ComponentModel.DataAnnotations;
using System.ComponentModel.DataAnnotations.Schema;
using Microsoft.EntityFrameworkCore;

namespace Shop.Models
{
    [Table(\"tOrder\")]
    public class Order
    {
        [Column(\"kOrder\")]
        public int Id { get; set; }

        [Column(\"cName\")]
        [MaxLength(50)]
        public string Name { get; set; } = string.Empty;

        [Column(\"kCustomer\")]
        public int? CustomerId { get; set; }

        [Column(\"fTotal\")]
        [Precision(18, 2)]
        public decimal Total { get; set; }

        [Column(\"cRowVersion\")]
        [Timestamp]
        public byte[] RowVersion { get; set; } = Array.Empty<byte>();
    }
}
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_no_imports_no_namespace() {
        let text = render(&ClassOptions::default());
        assert!(text.starts_with("[Table(\"tOrder\")]\npublic class Order\n{\n"));
        assert!(!text.contains("using"));
        assert!(!text.contains("namespace"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_blank_namespace_is_ignored() {
        let text = render(&ClassOptions {
            emit_imports: false,
            namespace: Some("   ".into()),
        });
        assert!(!text.contains("namespace"));
    }

    #[test]
    fn test_order_independent_of_input_order() {
        let mut reversed = build_fields(&order_columns(), "tOrder").unwrap();
        reversed.reverse();
        let a = render_class(&CSharpDialect::new(), "tOrder", "Order", &reversed, &ClassOptions::default());
        let b = render(&ClassOptions::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let options = ClassOptions {
            emit_imports: true,
            namespace: Some("Ns".into()),
        };
        assert_eq!(render(&options), render(&options));
    }

    #[test]
    fn test_opaque_type_renders_placeholder() {
        let fields = build_fields(&[RawColumn::new("cShape", "geography", 1).nullable()], "tPlace").unwrap();
        let text = render_class(&CSharpDialect::new(), "tPlace", "Place", &fields, &ClassOptions::default());
        assert!(text.contains("public object? Shape { get; set; }"));
    }
}
