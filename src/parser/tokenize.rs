use nom::{
    bytes::complete::{take_while, take_while1},
    multi::many0,
    sequence::preceded,
    IResult,
    Parser,
};

/// Characters that separate arguments on a command line.
pub const DELIMITERS: [char; 6] = ['\t', '\n', '\x0b', '\x0c', '\r', ' '];

fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

fn parse_delimiters(input: &str) -> IResult<&str, &str> {
    take_while(is_delimiter)(input)
}

fn parse_token(input: &str) -> IResult<&str, String> {
    let (input, word) = take_while1(|c: char| !is_delimiter(c))(input)?;
    Ok((input, word.to_string()))
}

/// Split a raw command line into whitespace-delimited tokens.
///
/// Runs of delimiters collapse, so the result never holds an empty token.
/// An empty or all-delimiter line yields an empty vector.
pub fn tokenize(line: &str) -> Vec<String> {
    match many0(preceded(parse_delimiters, parse_token)).parse(line) {
        Ok((_, tokens)) => tokens,
        Err(_) => Vec::new(),
    }
}
