//! Record tokenizer
//!
//! IDF records are whitespace-separated fields; a field wrapped in double
//! quotes may contain spaces.

use nom::{
    branch::alt,
    bytes::complete::{take_till1, take_while},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map},
    multi::many0,
    sequence::{delimited, preceded, terminated},
    IResult,
};

/// One field of a record line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Field text without surrounding quotes
    pub text: &'a str,
    pub quoted: bool,
}

fn quoted_field(input: &str) -> IResult<&str, Token<'_>> {
    map(
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        |text| Token { text, quoted: true },
    )(input)
}

fn bare_field(input: &str) -> IResult<&str, Token<'_>> {
    map(
        take_till1(|c: char| c.is_whitespace() || c == '"'),
        |text| Token {
            text,
            quoted: false,
        },
    )(input)
}

fn record(input: &str) -> IResult<&str, Vec<Token<'_>>> {
    all_consuming(terminated(
        many0(preceded(multispace0, alt((quoted_field, bare_field)))),
        multispace0,
    ))(input)
}

/// Split a record line into fields; `None` when a quote is left open
pub fn tokenize(line: &str) -> Option<Vec<Token<'_>>> {
    record(line).ok().map(|(_, tokens)| tokens)
}

/// Quote a field when it would not survive tokenizing bare
pub fn quote_if_needed(field: &str) -> String {
    if field.is_empty() || field.contains(char::is_whitespace) {
        format!("\"{}\"", field)
    } else {
        field.to_string()
    }
}
