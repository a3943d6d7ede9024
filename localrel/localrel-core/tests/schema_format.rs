use localrel_core::{DataTypeDef, FieldDef, FieldDefs, FloatWidth, IntWidth, format_field_defs};

#[test]
fn nested_struct_keeps_type_line_and_indentation() -> Result<(), std::fmt::Error> {
    let fields = vec![FieldDef::new(
        "person",
        DataTypeDef::Struct(
            vec![
                FieldDef::new("score", DataTypeDef::Float(FloatWidth::Double), true),
                FieldDef::new(
                    "address",
                    DataTypeDef::Struct(vec![FieldDef::new("city", DataTypeDef::String, true)].into()),
                    false,
                ),
            ]
            .into(),
        ),
        true,
    )];

    let text = format_field_defs(&fields)?;
    let expected = "\
person:
    type: struct
    nullable: true
    fields:
        score: { type: double, nullable: true }
        address:
            type: struct
            nullable: false
            fields:
                city: { type: string, nullable: true }
";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn array_of_struct_is_rendered_as_block() -> Result<(), std::fmt::Error> {
    let fields = vec![FieldDef::new(
        "points",
        DataTypeDef::array(
            DataTypeDef::Struct(
                vec![
                    FieldDef::new("x", DataTypeDef::Int(IntWidth::Int), false),
                    FieldDef::new("label", DataTypeDef::String, true),
                ]
                .into(),
            ),
            true,
        ),
        false,
    )];

    let text = format_field_defs(&fields)?;
    let expected = "\
points:
    type: array
    nullable: false
    element:
        type: struct
        nullable: true
        fields:
            x: { type: int, nullable: false }
            label: { type: string, nullable: true }
";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn field_defs_display_matches_formatter() -> Result<(), std::fmt::Error> {
    let fields: FieldDefs = vec![FieldDef::new("id", DataTypeDef::Int(IntWidth::Long), false)].into();
    assert_eq!(fields.to_string(), format_field_defs(&fields)?);
    assert_eq!(fields.to_string(), "id: { type: bigint, nullable: false }\n");
    Ok(())
}

#[test]
fn simple_string_renders_nested_types() {
    let data_type = DataTypeDef::Struct(
        vec![
            FieldDef::new("a", DataTypeDef::Int(IntWidth::Long), true),
            FieldDef::new("b", DataTypeDef::array(DataTypeDef::String, true), true),
            FieldDef::new("ts", DataTypeDef::Timestamp(None), true),
        ]
        .into(),
    );
    assert_eq!(
        data_type.simple_string(),
        "struct<a:bigint,b:array<string>,ts:timestamp_ntz>"
    );
}

#[test]
fn try_new_rejects_duplicate_names() {
    let result = FieldDefs::try_new(vec![
        FieldDef::new("a", DataTypeDef::Bool, true),
        FieldDef::new("a", DataTypeDef::String, true),
    ]);
    assert!(result.is_err());
}
