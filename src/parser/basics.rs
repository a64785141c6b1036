// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_while, take_while1};
use nom::character::complete::{char, digit1};
use nom::combinator::map_res;
use nom::{sequence::delimited, IResult};

pub(crate) fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

// Titles like "Schindler's List" need the double quoted form
pub(crate) fn parse_string(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
    ))(input)
}

pub(crate) fn parse_number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

pub(crate) fn parse_separator(input: &str) -> IResult<&str, &str> {
    delimited(
        take_while(|c: char| c == ' '),
        tag(","),
        take_while(|c: char| c == ' '),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_idents() {
        let parsed = parse_ident("top_rated(");
        let expected = ("(", "top_rated");

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_ident("same-genre");
        let expected = ("-genre", "same");

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn test_parse_string() {
        let parsed = parse_string("'Baahubali: The Beginning'");
        let expected = ("", "Baahubali: The Beginning");

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_string("\"Schindler's List\", 3");
        let expected = (", 3", "Schindler's List");

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_string("''");
        assert_eq!(parsed, Ok(("", "")));

        assert!(parse_string("'unterminated").is_err());
    }

    #[test]
    fn test_parse_numbers() {
        let parsed = parse_number("12345");
        let expected = ("", 12345);

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_number("12c3");
        let expected = ("c3", 12);
        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn test_parse_separator() {
        assert_eq!(parse_separator(" ,  5"), Ok(("5", ",")));
        assert!(parse_separator("5").is_err());
    }
}
