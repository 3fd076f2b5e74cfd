//! Token kinds and spans produced by the [`Scanner`](crate::scanner::Scanner).

use std::fmt;
use std::ops::Range;

/// A half-open byte range `[start, end)` into the source expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// The terminal classes of the expression language.
///
/// Quote characters never form tokens of their own: a quote always opens a
/// [`TokenKind::Literal`], and one without a closing partner is reported as
/// [`ParseError::UnterminatedLiteral`](crate::ParseError::UnterminatedLiteral).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    Dollar,
    Slash,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Minus,
    Plus,
    Dot,
    Star,
    DotDot,
    At,
    Comma,
    Pipe,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Colon,
    ColonColon,
    Equal,
    NotEqual,
    // Keywords
    And,
    Or,
    Div,
    Mod,
    Null,
    False,
    True,
    Nil,
    /// The reserved `System` constant.
    System,
    // Open classes
    Number,
    /// A quoted string; the token text includes the quotes.
    Literal,
    Identifier,
    /// End of input. Always the last token of a scan.
    Eof,
}

impl TokenKind {
    /// Looks up a name in the keyword table.
    ///
    /// Only exact spellings match; anything else stays an [`TokenKind::Identifier`].
    pub fn keyword(name: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == name)
            .map(|(_, kind)| *kind)
    }

    /// True for `<`, `>`, `<=`, `>=`, `=` and `!=`.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            TokenKind::Less
                | TokenKind::Greater
                | TokenKind::LessEqual
                | TokenKind::GreaterEqual
                | TokenKind::Equal
                | TokenKind::NotEqual
        )
    }

    /// True for tokens that can open a selector.
    pub fn starts_selector(self) -> bool {
        matches!(
            self,
            TokenKind::Slash
                | TokenKind::Dot
                | TokenKind::DotDot
                | TokenKind::Star
                | TokenKind::At
                | TokenKind::Identifier
                | TokenKind::Dollar
        )
    }

    /// A short description used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Dollar => "'$'",
            TokenKind::Slash => "'/'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::Minus => "'-'",
            TokenKind::Plus => "'+'",
            TokenKind::Dot => "'.'",
            TokenKind::Star => "'*'",
            TokenKind::DotDot => "'..'",
            TokenKind::At => "'@'",
            TokenKind::Comma => "','",
            TokenKind::Pipe => "'|'",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::LessEqual => "'<='",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::Colon => "':'",
            TokenKind::ColonColon => "'::'",
            TokenKind::Equal => "'='",
            TokenKind::NotEqual => "'!='",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Div => "'div'",
            TokenKind::Mod => "'mod'",
            TokenKind::Null => "'null'",
            TokenKind::False => "'false'",
            TokenKind::True => "'true'",
            TokenKind::Nil => "'nil'",
            TokenKind::System => "'System'",
            TokenKind::Number => "number",
            TokenKind::Literal => "string literal",
            TokenKind::Identifier => "name",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("div", TokenKind::Div),
    ("mod", TokenKind::Mod),
    ("null", TokenKind::Null),
    ("false", TokenKind::False),
    ("true", TokenKind::True),
    ("nil", TokenKind::Nil),
    ("System", TokenKind::System),
];

/// A classified slice of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, start: usize) -> Self {
        Self {
            kind,
            text,
            span: Span::new(start, start + text.len()),
        }
    }

    /// Describes the token as it appears in the source, for error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Number | TokenKind::Identifier => {
                format!("{} '{}'", self.kind.describe(), self.text)
            }
            TokenKind::Literal => format!("string literal {}", self.text),
            _ => self.kind.describe().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_is_case_sensitive() {
        assert_eq!(TokenKind::keyword("and"), Some(TokenKind::And));
        assert_eq!(TokenKind::keyword("System"), Some(TokenKind::System));
        assert_eq!(TokenKind::keyword("AND"), None);
        assert_eq!(TokenKind::keyword("system"), None);
        assert_eq!(TokenKind::keyword("Systems"), None);
    }

    #[test]
    fn test_operator_classes() {
        assert!(TokenKind::LessEqual.is_relational());
        assert!(!TokenKind::Plus.is_relational());
        assert!(TokenKind::At.starts_selector());
        assert!(TokenKind::Dollar.starts_selector());
        assert!(!TokenKind::Number.starts_selector());
        assert!(!TokenKind::LeftParen.starts_selector());
    }

    #[test]
    fn test_token_describe() {
        let tok = Token::new(TokenKind::Identifier, "item", 4);
        assert_eq!(tok.span, Span::new(4, 8));
        assert_eq!(tok.span.len(), 4);
        assert!(!tok.span.is_empty());
        assert_eq!(Range::from(tok.span), 4..8);
        assert!(Token::new(TokenKind::Eof, "", 8).span.is_empty());
        assert_eq!(tok.describe(), "name 'item'");
        assert_eq!(Token::new(TokenKind::Eof, "", 8).describe(), "end of input");
        assert_eq!(Token::new(TokenKind::Pipe, "|", 0).describe(), "'|'");
    }
}
