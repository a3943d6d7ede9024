//! DDL schema parser built from nom combinators.
//!
//! # Supported Forms
//!
//! - Field lists: `a INT, b STRING NOT NULL`, with optional `:` after names
//! - Struct types: `struct<a:int,b:array<string>>`
//! - A single type: `bigint`
//! - Backtick-quoted identifiers: `` `my col` double ``
//!
//! Keywords are case-insensitive. `varchar(n)` and `char(n)` read as `string`.

use std::sync::Arc;

use localrel_core::{DataTypeDef, FieldDef, FieldDefs, FloatWidth, IntWidth};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{alpha1, alphanumeric1, char, multispace0, multispace1},
    combinator::{all_consuming, map, opt, recognize, value},
    error::{Error, ErrorKind},
    multi::{many0, separated_list0, separated_list1},
    sequence::{delimited, pair, terminated, tuple},
};

use crate::DdlError;

/// Parse a DDL schema string.
///
/// Field lists and `struct<...>` produce [`DataTypeDef::Struct`]; a lone type
/// produces that type. `timestamp` resolves to `session_tz`.
pub fn parse_ddl(input: &str, session_tz: &str) -> Result<DataTypeDef, DdlError> {
    let tz: Arc<str> = Arc::from(session_tz);
    let text = input.trim();
    if text.is_empty() {
        return Err(DdlError::Empty);
    }

    let fields = all_consuming(delimited(multispace0, |i| field_list(i, &tz), multispace0))(text);
    let parsed = match fields {
        Ok((_, fields)) => DataTypeDef::Struct(fields),
        Err(field_err) => {
            match all_consuming(delimited(multispace0, |i| data_type(i, &tz), multispace0))(text) {
                Ok((_, dt)) => dt,
                Err(_) => {
                    return Err(DdlError::Syntax {
                        input: text.to_string(),
                        detail: field_err.to_string(),
                    });
                }
            }
        }
    };

    check_unique_names(&parsed)?;
    Ok(parsed)
}

fn check_unique_names(data_type: &DataTypeDef) -> Result<(), DdlError> {
    match data_type {
        DataTypeDef::Struct(fields) => {
            FieldDefs::try_new(fields.to_vec()).map_err(|e| DdlError::Invalid(e.to_string()))?;
            fields.iter().try_for_each(|f| check_unique_names(f.data_type()))
        }
        DataTypeDef::Array(elem) => check_unique_names(&elem.data_type),
        _ => Ok(()),
    }
}

fn field_list<'a>(input: &'a str, tz: &Arc<str>) -> IResult<&'a str, FieldDefs> {
    map(
        separated_list1(
            tuple((multispace0, char(','), multispace0)),
            |i| field(i, tz),
        ),
        FieldDefs::new,
    )(input)
}

fn struct_members<'a>(input: &'a str, tz: &Arc<str>) -> IResult<&'a str, FieldDefs> {
    map(
        separated_list0(
            tuple((multispace0, char(','), multispace0)),
            |i| field(i, tz),
        ),
        FieldDefs::new,
    )(input)
}

/// `name [:] type [NOT NULL]`
fn field<'a>(input: &'a str, tz: &Arc<str>) -> IResult<&'a str, FieldDef> {
    let (input, name) = identifier(input)?;
    let (input, _) = alt((
        value((), tuple((multispace0, char(':'), multispace0))),
        value((), multispace1),
    ))(input)?;
    let (input, dt) = data_type(input, tz)?;
    let (input, not_null) = opt(tuple((
        multispace1,
        tag_no_case("not"),
        multispace1,
        tag_no_case("null"),
        keyword_boundary,
    )))(input)?;
    Ok((input, FieldDef::new(name, dt, not_null.is_none())))
}

/// Identifier, optionally backtick-quoted.
fn identifier(input: &str) -> IResult<&str, String> {
    alt((
        map(
            delimited(char('`'), take_while1(|c: char| c != '`'), char('`')),
            String::from,
        ),
        map(
            recognize(pair(
                alt((alpha1, tag("_"))),
                many0(alt((alphanumeric1, tag("_")))),
            )),
            String::from,
        ),
    ))(input)
}

fn data_type<'a>(input: &'a str, tz: &Arc<str>) -> IResult<&'a str, DataTypeDef> {
    alt((
        |i| array_type(i, tz),
        |i| struct_type(i, tz),
        |i| primitive_type(i, tz),
    ))(input)
}

fn array_type<'a>(input: &'a str, tz: &Arc<str>) -> IResult<&'a str, DataTypeDef> {
    map(
        delimited(
            tuple((tag_no_case("array"), multispace0, char('<'), multispace0)),
            |i| data_type(i, tz),
            tuple((multispace0, char('>'))),
        ),
        |elem| DataTypeDef::array(elem, true),
    )(input)
}

fn struct_type<'a>(input: &'a str, tz: &Arc<str>) -> IResult<&'a str, DataTypeDef> {
    map(
        delimited(
            tuple((tag_no_case("struct"), multispace0, char('<'), multispace0)),
            |i| struct_members(i, tz),
            tuple((multispace0, char('>'))),
        ),
        DataTypeDef::Struct,
    )(input)
}

/// Primitive type names (order matters: longer matches first).
fn primitive_type<'a>(input: &'a str, tz: &Arc<str>) -> IResult<&'a str, DataTypeDef> {
    terminated(
        alt((
            value(DataTypeDef::Timestamp(None), tag_no_case("timestamp_ntz")),
            value(
                DataTypeDef::Timestamp(Some(tz.clone())),
                alt((tag_no_case("timestamp_ltz"), tag_no_case("timestamp"))),
            ),
            value(DataTypeDef::Bool, alt((tag_no_case("boolean"), tag_no_case("bool")))),
            value(
                DataTypeDef::Int(IntWidth::Byte),
                alt((tag_no_case("tinyint"), tag_no_case("byte"))),
            ),
            value(
                DataTypeDef::Int(IntWidth::Short),
                alt((tag_no_case("smallint"), tag_no_case("short"))),
            ),
            value(
                DataTypeDef::Int(IntWidth::Long),
                alt((tag_no_case("bigint"), tag_no_case("long"))),
            ),
            value(
                DataTypeDef::Int(IntWidth::Int),
                alt((tag_no_case("integer"), tag_no_case("int"))),
            ),
            value(
                DataTypeDef::Float(FloatWidth::Single),
                alt((tag_no_case("float"), tag_no_case("real"))),
            ),
            value(DataTypeDef::Float(FloatWidth::Double), tag_no_case("double")),
            value(DataTypeDef::String, sized_string),
            value(DataTypeDef::String, tag_no_case("string")),
            value(DataTypeDef::Bytes, tag_no_case("binary")),
            value(DataTypeDef::Null, alt((tag_no_case("void"), tag_no_case("null")))),
        )),
        keyword_boundary,
    )(input)
}

/// `varchar(n)` / `char(n)`
fn sized_string(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        alt((tag_no_case("varchar"), tag_no_case("char"))),
        multispace0,
        char('('),
        multispace0,
        take_while1(|c: char| c.is_ascii_digit()),
        multispace0,
        char(')'),
    )))(input)
}

fn keyword_boundary(input: &str) -> IResult<&str, ()> {
    if input.chars().next().is_some_and(is_ident_continue) {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }
    Ok((input, ()))
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
