use thiserror::Error;

use crate::span::{Location, Span};
use crate::value::ValueType;

/// A syntax error: the input is not a JSON document. Parsing stops at the first one and produces
/// no partial value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {}", .span.lo)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Where in the input the problem was found.
    pub span: Span,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    /// Line and column of the start of [`ParseError::span`] within `src`, which must be the text
    /// that was parsed.
    pub fn location(&self, src: &str) -> Location {
        Location::of(src, self.span.lo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    #[error("invalid literal, expected `{expected}`")]
    InvalidLiteral { expected: &'static str },
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),
    #[error("invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    #[error("control character {0:?} must be escaped inside a string")]
    ControlCharacterInString(char),
    #[error("leading zeros are not allowed in numbers")]
    LeadingZero,
    #[error("invalid number")]
    InvalidNumber,
    #[error("number out of range")]
    NumberOutOfRange,
    #[error("expected `,` or `{0}`")]
    ExpectedCommaOrEnd(char),
    #[error("trailing comma before `{0}`")]
    TrailingComma(char),
    #[error("expected a string key")]
    ExpectedKey,
    #[error("expected `:` after object key")]
    ExpectedColon,
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("trailing characters after the document")]
    TrailingCharacters,
}

/// A failed query against a [`Value`][crate::Value].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("type mismatch: expected {expected} but found {found}")]
    TypeMismatch { expected: ValueType, found: ValueType },
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("key {0:?} not found")]
    KeyNotFound(String),
}
