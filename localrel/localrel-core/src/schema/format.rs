use std::fmt::{Error, Result, Write as _};

use super::{DataTypeDef, FieldDef};

/// Format field definitions as an indented tree:
/// primitive fields take one line, structs and arrays open a nested block.
pub fn format_field_defs(fields: impl AsRef<[FieldDef]>) -> std::result::Result<String, Error> {
    let mut out = String::new();
    for field in fields.as_ref() {
        format_labeled_type(
            &field.name,
            &field.element.data_type,
            field.element.nullable,
            0,
            &mut out,
        )?;
    }
    Ok(out)
}

fn format_labeled_type(
    label: &str,
    data_type: &DataTypeDef,
    nullable: bool,
    indent: usize,
    out: &mut String,
) -> Result {
    let pad = " ".repeat(indent);
    if data_type.is_primitive() {
        return writeln!(
            out,
            "{pad}{label}: {{ type: {}, nullable: {nullable} }}",
            data_type.type_name()
        );
    }

    writeln!(out, "{pad}{label}:")?;
    let pad = " ".repeat(indent + 4);
    writeln!(out, "{pad}type: {}", data_type.type_name())?;
    writeln!(out, "{pad}nullable: {nullable}")?;
    match data_type {
        DataTypeDef::Struct(fields) => {
            writeln!(out, "{pad}fields:")?;
            for child in fields.iter() {
                format_labeled_type(
                    &child.name,
                    &child.element.data_type,
                    child.element.nullable,
                    indent + 8,
                    out,
                )?;
            }
        }
        DataTypeDef::Array(elem) => {
            format_labeled_type("element", &elem.data_type, elem.nullable, indent + 4, out)?;
        }
        _ => unreachable!("{data_type:?} is not a compound type"),
    }
    Ok(())
}
