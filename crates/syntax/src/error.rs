use thiserror::Error;

/// The broad class of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lex,
    Syntax,
    DepthExceeded,
}

/// The first error encountered while scanning or parsing an expression.
///
/// Every variant carries the byte offset into the source at which the problem
/// was detected. Parsing stops at the first error; no partial tree is kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { offset: usize, found: char },

    #[error("unterminated string literal starting at offset {offset}")]
    UnterminatedLiteral { offset: usize },

    #[error("expected {expected}, found {found} at offset {offset}")]
    Syntax {
        offset: usize,
        expected: String,
        found: String,
    },

    #[error("expression nesting exceeds the limit of {limit} at offset {offset}")]
    DepthExceeded { offset: usize, limit: usize },
}

impl ParseError {
    pub fn syntax(offset: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Syntax {
            offset,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::UnexpectedChar { .. } | ParseError::UnterminatedLiteral { .. } => {
                ErrorKind::Lex
            }
            ParseError::Syntax { .. } => ErrorKind::Syntax,
            ParseError::DepthExceeded { .. } => ErrorKind::DepthExceeded,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedChar { offset, .. }
            | ParseError::UnterminatedLiteral { offset }
            | ParseError::Syntax { offset, .. }
            | ParseError::DepthExceeded { offset, .. } => *offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_offset() {
        let err = ParseError::UnexpectedChar {
            offset: 3,
            found: '#',
        };
        assert_eq!(err.kind(), ErrorKind::Lex);
        assert_eq!(err.offset(), 3);

        let err = ParseError::syntax(7, "')'", "end of input");
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.offset(), 7);
        assert_eq!(
            err.to_string(),
            "expected ')', found end of input at offset 7"
        );

        let err = ParseError::DepthExceeded {
            offset: 12,
            limit: 4,
        };
        assert_eq!(err.kind(), ErrorKind::DepthExceeded);
        assert_eq!(err.offset(), 12);
    }
}
