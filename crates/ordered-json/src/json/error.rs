use std::fmt;

use thiserror::Error;

/// Container kind reported by [`ParseError::Unclosed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Object,
    Array,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Container::Object => "object",
            Container::Array => "array",
        })
    }
}

/// Structural JSON error. Offsets are byte positions in the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected JSON object to open with '{{' at offset {offset}")]
    ExpectedObject { offset: usize },
    #[error("object key must be a string at offset {offset}")]
    NonStringKey { offset: usize },
    #[error("expected ':' after object key at offset {offset}")]
    ExpectedColon { offset: usize },
    #[error("{container} opened at offset {start} is not closed (offset {offset})")]
    Unclosed {
        container: Container,
        start: usize,
        offset: usize,
    },
    #[error("unexpected byte 0x{byte:02x} at offset {offset}")]
    UnexpectedByte { byte: u8, offset: usize },
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },
    #[error("invalid literal at offset {offset}")]
    InvalidLiteral { offset: usize },
    #[error("invalid number at offset {offset}")]
    InvalidNumber { offset: usize },
    #[error("invalid string at offset {offset}")]
    InvalidString { offset: usize },
    #[error("unexpected content after the top-level object at offset {offset}")]
    TrailingContent { offset: usize },
    #[error("duplicate key {key:?} at offset {offset}")]
    DuplicateKey { key: String, offset: usize },
    #[error("nesting exceeds maximum depth of {limit} at offset {offset}")]
    DepthLimitExceeded { limit: usize, offset: usize },
}

impl ParseError {
    /// Byte offset at which the problem was detected.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::ExpectedObject { offset }
            | ParseError::NonStringKey { offset }
            | ParseError::ExpectedColon { offset }
            | ParseError::Unclosed { offset, .. }
            | ParseError::UnexpectedByte { offset, .. }
            | ParseError::UnexpectedEnd { offset }
            | ParseError::InvalidLiteral { offset }
            | ParseError::InvalidNumber { offset }
            | ParseError::InvalidString { offset }
            | ParseError::TrailingContent { offset }
            | ParseError::DuplicateKey { offset, .. }
            | ParseError::DepthLimitExceeded { offset, .. } => *offset,
        }
    }
}

/// A value that cannot be written as JSON.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("cyclic structure: a map contains itself")]
    Cycle,
    #[error("nesting exceeds maximum depth of {limit}")]
    DepthLimitExceeded { limit: usize },
    #[error("encoded output is not valid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
