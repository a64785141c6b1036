mod basics;

use basics::{parse_ident, parse_number, parse_separator, parse_string};
use nom::{
    branch::alt,
    character::complete::{char, space0},
    combinator::map,
    error::ErrorKind,
    multi::separated_list,
    sequence::{delimited, pair},
    Err, IResult,
};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Statement {
    Recommend(String),
    /// Without a count the configured top n applies
    Similar(String, Option<usize>),
    Suggest(String),
    Info(String),
    SameGenre(String),
    SameCrew(String),
    TopRated(Option<String>),
    Popular(Option<usize>),
    Describe(String),
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Arg<'a> {
    Str(&'a str),
    Num(usize),
}

fn parse_arg(input: &str) -> IResult<&str, Arg> {
    alt((map(parse_string, Arg::Str), map(parse_number, Arg::Num)))(input)
}

fn parse_args(input: &str) -> IResult<&str, Vec<Arg>> {
    delimited(
        pair(char('('), space0),
        separated_list(parse_separator, parse_arg),
        pair(space0, char(')')),
    )(input)
}

fn parse_statement(input: &str) -> IResult<&str, Statement> {
    let (rest, name) = parse_ident(input)?;
    let (rest, args) = parse_args(rest)?;

    let statement = match (name, args.as_slice()) {
        ("recommend", [Arg::Str(title)]) => Statement::Recommend((*title).into()),
        ("similar", [Arg::Str(title)]) => Statement::Similar((*title).into(), None),
        ("similar", [Arg::Str(title), Arg::Num(k)]) => Statement::Similar((*title).into(), Some(*k)),
        ("suggest", [Arg::Str(query)]) => Statement::Suggest((*query).into()),
        ("info", [Arg::Str(title)]) => Statement::Info((*title).into()),
        ("same_genre", [Arg::Str(title)]) => Statement::SameGenre((*title).into()),
        ("same_crew", [Arg::Str(title)]) => Statement::SameCrew((*title).into()),
        ("top_rated", []) => Statement::TopRated(None),
        ("top_rated", [Arg::Str(genre)]) => Statement::TopRated(Some((*genre).into())),
        ("popular", []) => Statement::Popular(None),
        ("popular", [Arg::Num(n)]) => Statement::Popular(Some(*n)),
        ("describe", [Arg::Str(text)]) => Statement::Describe((*text).into()),
        _ => return Err(Err::Error((input, ErrorKind::Verify))),
    };

    Ok((rest, statement))
}

pub fn parse_line(input: &str) -> Option<Statement> {
    let input = input.trim();
    let (rest, statement) = parse_statement(input).ok()?;

    if rest.trim().is_empty() {
        Some(statement)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommend_statement() {
        let parsed = parse_statement("recommend('Baahubali: The Beginning')");
        let expected = (
            "",
            Statement::Recommend("Baahubali: The Beginning".into()),
        );

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn similar_statement() {
        let parsed = parse_statement("similar(\"Schindler's List\", 10)");
        let expected = ("", Statement::Similar("Schindler's List".into(), Some(10)));

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_statement("similar( 'Alien' )");
        let expected = ("", Statement::Similar("Alien".into(), None));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn top_rated_statement() {
        assert_eq!(
            parse_statement("top_rated()"),
            Ok(("", Statement::TopRated(None)))
        );
        assert_eq!(
            parse_statement("top_rated('Action')"),
            Ok(("", Statement::TopRated(Some("Action".into()))))
        );
    }

    #[test]
    fn popular_statement() {
        assert_eq!(parse_statement("popular()"), Ok(("", Statement::Popular(None))));
        assert_eq!(parse_statement("popular(12)"), Ok(("", Statement::Popular(Some(12)))));
    }

    #[test]
    fn filter_statements() {
        assert_eq!(
            parse_line("same_genre('Alien')"),
            Some(Statement::SameGenre("Alien".into()))
        );
        assert_eq!(
            parse_line("  same_crew('Alien')  "),
            Some(Statement::SameCrew("Alien".into()))
        );
        assert_eq!(
            parse_line("describe('marines fight aliens')"),
            Some(Statement::Describe("marines fight aliens".into()))
        );
        assert_eq!(parse_line("suggest('ava')"), Some(Statement::Suggest("ava".into())));
        assert_eq!(parse_line("info('Avatar')"), Some(Statement::Info("Avatar".into())));
    }

    #[test]
    fn parse_invalid_line() {
        assert!(parse_line("recommend(Avatar)").is_none());
        assert!(parse_line("recommend('Avatar', 'Alien')").is_none());
        assert!(parse_line("popular('five')").is_none());
        assert!(parse_line("unknown('x')").is_none());
        assert!(parse_line("info('Avatar');").is_none());
    }
}
