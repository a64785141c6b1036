// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

//! Coercion of raw CSV cells into movie fields.
//!
//! Merged movie datasets are rarely clean: numbers may be missing, and list
//! columns show up as Python literals, TMDB dict lists or plain separated
//! text. Everything here is total, a bad cell becomes an empty value.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_while1},
    character::complete::{char, multispace0},
    combinator::map,
    multi::separated_list,
    sequence::{delimited, pair, separated_pair},
    IResult,
};

const MISSING: &[&str] = &["nan", "NaN", "None", "null", "N/A"];

/// Trimmed text, with the usual "missing" markers turned into an empty string
pub fn parse_text(raw: &str) -> String {
    let raw = raw.trim();
    if MISSING.contains(&raw) {
        String::new()
    } else {
        raw.to_owned()
    }
}

pub fn parse_f64(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

pub fn parse_count(raw: &str) -> u64 {
    let value = parse_f64(raw);
    if value > 0.0 {
        value as u64
    } else {
        0
    }
}

/// Parse a list column: `['A', 'B']`, `[{'id': 1, 'name': 'A'}]` or `A, B` / `A|B`
pub fn parse_list(raw: &str) -> Vec<String> {
    let raw = parse_text(raw);
    if raw.is_empty() {
        return Vec::new();
    }

    if raw.starts_with('[') {
        if let Ok((rest, elements)) = literal_list(&raw) {
            if rest.trim().is_empty() {
                return elements
                    .into_iter()
                    .flatten()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
        }
    }

    raw.split(|c: char| c == ',' || c == '|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
    ))(input)
}

fn separator(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(input)
}

fn scalar(input: &str) -> IResult<&str, Option<&str>> {
    alt((
        map(quoted, Some),
        map(tag("None"), |_| None::<&str>),
        map(
            take_while1(|c: char| c.is_ascii_digit() || c == '.' || c == '-'),
            |_| None::<&str>,
        ),
    ))(input)
}

fn entry(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    separated_pair(quoted, delimited(multispace0, char(':'), multispace0), scalar)(input)
}

// Only the 'name' key of a TMDB dict is interesting
fn dict(input: &str) -> IResult<&str, Option<&str>> {
    map(
        delimited(
            pair(char('{'), multispace0),
            separated_list(separator, entry),
            pair(multispace0, char('}')),
        ),
        |entries: Vec<(&str, Option<&str>)>| {
            entries
                .into_iter()
                .find(|(key, _)| *key == "name")
                .and_then(|(_, value)| value)
        },
    )(input)
}

fn element(input: &str) -> IResult<&str, Option<&str>> {
    alt((dict, map(quoted, Some)))(input)
}

fn literal_list(input: &str) -> IResult<&str, Vec<Option<&str>>> {
    delimited(
        pair(char('['), multispace0),
        separated_list(separator, element),
        pair(multispace0, char(']')),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::*;

    #[test]
    fn missing_text_is_empty() {
        assert_eq!(parse_text("  Avatar "), "Avatar");
        assert_eq!(parse_text("NaN"), "");
        assert_eq!(parse_text(""), "");
    }

    #[test]
    fn numbers_fall_back_to_zero() {
        assert_approx_eq!(parse_f64(" 7.2"), 7.2);
        assert_approx_eq!(parse_f64("n/a"), 0.0);
        assert_approx_eq!(parse_f64("nan"), 0.0);
        assert_eq!(parse_count("11800.0"), 11800);
        assert_eq!(parse_count("-3"), 0);
        assert_eq!(parse_count(""), 0);
    }

    #[test]
    fn python_string_list() {
        assert_eq!(parse_list("['Action', 'Adventure']"), vec!["Action", "Adventure"]);
        assert_eq!(
            parse_list(r#"["Children's", 'Family']"#),
            vec!["Children's", "Family"]
        );
        assert!(parse_list("[]").is_empty());
    }

    #[test]
    fn tmdb_dict_list() {
        let raw = "[{'id': 28, 'name': 'Action'}, {'id': 12, 'name': 'Adventure'}]";
        assert_eq!(parse_list(raw), vec!["Action", "Adventure"]);

        let raw = r#"[{"id": 878, "name": "Science Fiction", "parent": None}]"#;
        assert_eq!(parse_list(raw), vec!["Science Fiction"]);
    }

    #[test]
    fn plain_separated_list() {
        assert_eq!(parse_list("Action, Drama"), vec!["Action", "Drama"]);
        assert_eq!(parse_list("Comedy|Romance|"), vec!["Comedy", "Romance"]);
        assert_eq!(parse_list("Drama"), vec!["Drama"]);
        assert!(parse_list("nan").is_empty());
    }

    #[test]
    fn broken_literal_falls_back_to_split() {
        assert_eq!(parse_list("[Action, Drama"), vec!["[Action", "Drama"]);
    }
}
