//! A `nom`-based scanner that turns an expression into a lazy token stream.
//!
//! Whitespace (space, tab, newline, carriage return) separates tokens and is
//! never emitted. Every successful pass ends with a single [`TokenKind::Eof`]
//! token whose span sits at the end of the input.

use crate::error::ParseError;
use crate::token::{Token, TokenKind};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{anychar, char, digit0, digit1, multispace0, satisfy},
    combinator::{map, opt, recognize, value},
    sequence::{delimited, pair},
};

/// Scans the whole expression, stopping at the first lexical error.
pub fn scan(text: &str) -> Result<Vec<Token<'_>>, ParseError> {
    Scanner::new(text).collect()
}

/// Lazy token iterator over a single expression.
///
/// Yields `Ok` tokens up to and including the end marker, or a single `Err`,
/// and then `None` forever. Create a new scanner for another pass.
pub struct Scanner<'a> {
    source: &'a str,
    rest: &'a str,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            rest: source,
            done: false,
        }
    }

    fn offset(&self) -> usize {
        self.source.len() - self.rest.len()
    }

    fn skip_whitespace(&mut self) {
        if let Ok((rest, _)) = multispace0::<&str, nom::error::Error<&str>>(self.rest) {
            self.rest = rest;
        }
    }

    fn lex_error(&self) -> ParseError {
        let offset = self.offset();
        match self.rest.chars().next() {
            Some('\'') | Some('"') => ParseError::UnterminatedLiteral { offset },
            Some(found) => ParseError::UnexpectedChar { offset, found },
            // Unreachable in practice: the caller checks for end of input first.
            None => ParseError::syntax(offset, "a token", "end of input"),
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.skip_whitespace();
        let start = self.offset();

        if self.rest.is_empty() {
            self.done = true;
            return Some(Ok(Token::new(TokenKind::Eof, "", start)));
        }

        match token(self.rest) {
            Ok((rest, kind)) => {
                let text = &self.rest[..self.rest.len() - rest.len()];
                self.rest = rest;
                Some(Ok(Token::new(kind, text, start)))
            }
            Err(_) => {
                self.done = true;
                Some(Err(self.lex_error()))
            }
        }
    }
}

// --- Token Parsers ---

fn token(input: &str) -> IResult<&str, TokenKind> {
    // Numbers go first so that `-1` and `.5` win over the `-` and `.` punctuation.
    alt((number, literal, name, punctuation)).parse(input)
}

fn number(input: &str) -> IResult<&str, TokenKind> {
    value(
        TokenKind::Number,
        recognize(pair(
            opt(char('-')),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
    )
    .parse(input)
}

fn literal(input: &str) -> IResult<&str, TokenKind> {
    value(
        TokenKind::Literal,
        alt((
            delimited(char('\''), take_while(|c| c != '\''), char('\'')),
            delimited(char('"'), take_while(|c| c != '"'), char('"')),
        )),
    )
    .parse(input)
}

fn name(input: &str) -> IResult<&str, TokenKind> {
    map(
        recognize(pair(satisfy(is_name_start_char), take_while(is_name_char))),
        |text: &str| TokenKind::keyword(text).unwrap_or(TokenKind::Identifier),
    )
    .parse(input)
}

fn punctuation(input: &str) -> IResult<&str, TokenKind> {
    alt((
        value(TokenKind::DotDot, tag("..")),
        value(TokenKind::ColonColon, tag("::")),
        value(TokenKind::LessEqual, tag("<=")),
        value(TokenKind::GreaterEqual, tag(">=")),
        value(TokenKind::NotEqual, tag("!=")),
        single_char,
    ))
    .parse(input)
}

fn single_char(input: &str) -> IResult<&str, TokenKind> {
    let (rest, c) = anychar(input)?;
    let kind = match c {
        '$' => TokenKind::Dollar,
        '/' => TokenKind::Slash,
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        '[' => TokenKind::LeftBracket,
        ']' => TokenKind::RightBracket,
        '-' => TokenKind::Minus,
        '+' => TokenKind::Plus,
        '.' => TokenKind::Dot,
        '*' => TokenKind::Star,
        '@' => TokenKind::At,
        ',' => TokenKind::Comma,
        '|' => TokenKind::Pipe,
        '<' => TokenKind::Less,
        '>' => TokenKind::Greater,
        ':' => TokenKind::Colon,
        '=' => TokenKind::Equal,
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Char,
            )));
        }
    };
    Ok((rest, kind))
}

// --- NCName Character Classes (XML 1.0, fifth edition) ---

/// `NameStartChar` without the colon.
pub fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// `NameChar` without the colon.
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}
