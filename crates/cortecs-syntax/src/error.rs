//! Error types for the lexer and parser.

use crate::span::Span;
use thiserror::Error;

/// Errors produced while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerError {
    /// A character that starts no token.
    #[error("{span}: unknown character {ch:?}")]
    UnknownChar {
        /// The offending character
        ch: char,
        /// Absolute position
        span: Span,
    },

    /// A string literal running to the end of input.
    #[error("{start}: unterminated string literal")]
    UnterminatedString {
        /// Position of the opening quote
        start: Span,
    },

    /// A malformed character literal.
    #[error("{start}: invalid character literal")]
    InvalidChar {
        /// Position of the opening quote
        start: Span,
    },

    /// A number followed by an unknown suffix.
    #[error("{span}: invalid numeric literal '{literal}'")]
    InvalidNumeric {
        /// The literal text including the suffix
        literal: String,
        /// Absolute position
        span: Span,
    },

    /// An integer literal too large for the type its suffix selects.
    #[error("{span}: integer literal '{literal}' does not fit in {ty}")]
    IntegerOverflow {
        /// The literal text including the suffix
        literal: String,
        /// Name of the selected type
        ty: &'static str,
        /// Absolute position
        span: Span,
    },
}

impl LexerError {
    /// Absolute position of the error.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnknownChar { span, .. }
            | Self::InvalidNumeric { span, .. }
            | Self::IntegerOverflow { span, .. } => *span,
            Self::UnterminatedString { start } | Self::InvalidChar { start } => *start,
        }
    }
}

/// Errors produced while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// A token that the grammar cannot accept or skip.
    #[error("{span}: expected {expected}, found {found}")]
    UnexpectedToken {
        /// Description of what would have been accepted
        expected: String,
        /// The token actually found
        found: String,
        /// Absolute position
        span: Span,
    },

    /// Input ended in the middle of a construct.
    #[error("{span}: unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// Description of what would have been accepted
        expected: String,
        /// Absolute position
        span: Span,
    },
}

impl ParserError {
    /// Absolute position of the error.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. } | Self::UnexpectedEof { span, .. } => *span,
        }
    }
}

/// Either kind of front-end failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// Tokenizing failed
    #[error(transparent)]
    Lexer(#[from] LexerError),

    /// Parsing failed
    #[error(transparent)]
    Parser(#[from] ParserError),
}

/// Result of lexing.
pub type LexerResult<T> = Result<T, LexerError>;

/// Result of parsing a token stream.
pub type ParserResult<T> = Result<T, ParserError>;

/// Result of going from text to syntax.
pub type SyntaxResult<T> = Result<T, SyntaxError>;
