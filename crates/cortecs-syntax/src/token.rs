//! Token definitions.
//!
//! A [`Token`] pairs a [`TokenKind`] with its absolute start position and its
//! extent. Literal tokens keep their suffix already classified so that later
//! phases never have to re-read source text.

use crate::span::{Span, Spanned};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width/signedness marker trailing an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntSuffix {
    /// `b`: signed 8-bit
    I8,
    /// `s`: signed 16-bit
    I16,
    /// `l`: signed 64-bit
    I64,
    /// `ub`: unsigned 8-bit
    U8,
    /// `us`: unsigned 16-bit
    U16,
    /// `u`: unsigned 32-bit
    U32,
    /// `ul`: unsigned 64-bit
    U64,
}

impl IntSuffix {
    /// Classifies suffix text, returning `None` for anything unknown.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Some(match text {
            "b" => Self::I8,
            "s" => Self::I16,
            "l" => Self::I64,
            "ub" => Self::U8,
            "us" => Self::U16,
            "u" => Self::U32,
            "ul" => Self::U64,
            _ => return None,
        })
    }

    /// Largest literal magnitude the suffixed type can hold.
    #[must_use]
    pub const fn max_value(suffix: Option<Self>) -> u64 {
        match suffix {
            None => i32::MAX as u64,
            Some(Self::I8) => i8::MAX as u64,
            Some(Self::I16) => i16::MAX as u64,
            Some(Self::I64) => i64::MAX as u64,
            Some(Self::U8) => u8::MAX as u64,
            Some(Self::U16) => u16::MAX as u64,
            Some(Self::U32) => u32::MAX as u64,
            Some(Self::U64) => u64::MAX,
        }
    }

    /// Name of the primitive type the suffix selects.
    #[must_use]
    pub const fn type_name(suffix: Option<Self>) -> &'static str {
        match suffix {
            None => "I32",
            Some(Self::I8) => "I8",
            Some(Self::I16) => "I16",
            Some(Self::I64) => "I64",
            Some(Self::U8) => "U8",
            Some(Self::U16) => "U16",
            Some(Self::U32) => "U32",
            Some(Self::U64) => "U64",
        }
    }

    /// Returns the suffix as written in source.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::I8 => "b",
            Self::I16 => "s",
            Self::I64 => "l",
            Self::U8 => "ub",
            Self::U16 => "us",
            Self::U32 => "u",
            Self::U64 => "ul",
        }
    }
}

/// Width marker trailing a float literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloatSuffix {
    /// `f`: 32-bit
    F32,
    /// `d`: 64-bit
    F64,
}

impl FloatSuffix {
    /// Classifies suffix text, returning `None` for anything unknown.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "f" => Some(Self::F32),
            "d" => Some(Self::F64),
            _ => None,
        }
    }

    /// Returns the suffix as written in source.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::F32 => "f",
            Self::F64 => "d",
        }
    }
}

/// The lexical class of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords
    /// `function`
    Function,
    /// `let`
    Let,
    /// `return`
    Return,
    /// `if`
    If,

    // Literals and names
    /// Identifier
    Ident(String),
    /// Integer literal: digits and optional suffix
    Int(String, Option<IntSuffix>),
    /// Float literal: digits and optional suffix
    Float(String, Option<FloatSuffix>),
    /// String literal with escapes resolved
    Str(String),
    /// Character literal
    Char(char),
    /// `true` / `false`
    Bool(bool),

    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `!`
    Bang,
    /// `=`
    Eq,

    // Punctuation
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semi,
    /// `.`
    Dot,
    /// `->`
    Arrow,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Returns `true` for reserved words.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self, Self::Function | Self::Let | Self::Return | Self::If)
    }

    /// Returns `true` for literal tokens.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::Int(..) | Self::Float(..) | Self::Str(_) | Self::Char(_) | Self::Bool(_)
        )
    }

    /// Binding power of a binary operator, higher binds tighter.
    #[must_use]
    pub const fn precedence(&self) -> Option<u8> {
        match self {
            Self::PipePipe => Some(1),
            Self::AmpAmp => Some(2),
            Self::EqEq | Self::BangEq => Some(3),
            Self::Lt | Self::Gt | Self::LtEq | Self::GtEq => Some(4),
            Self::Plus | Self::Minus => Some(5),
            Self::Star | Self::Slash | Self::Percent => Some(6),
            _ => None,
        }
    }

    /// The operator symbol, for operator tokens.
    #[must_use]
    pub const fn operator_symbol(&self) -> Option<&'static str> {
        Some(match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::EqEq => "==",
            Self::BangEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::Bang => "!",
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(op) = self.operator_symbol() {
            return write!(f, "'{op}'");
        }
        match self {
            Self::Function => write!(f, "'function'"),
            Self::Let => write!(f, "'let'"),
            Self::Return => write!(f, "'return'"),
            Self::If => write!(f, "'if'"),
            Self::Ident(name) => write!(f, "identifier '{name}'"),
            Self::Int(digits, suffix) => {
                write!(f, "integer '{digits}{}'", suffix.map_or("", |s| s.as_str()))
            }
            Self::Float(digits, suffix) => {
                write!(f, "float '{digits}{}'", suffix.map_or("", |s| s.as_str()))
            }
            Self::Str(_) => write!(f, "string literal"),
            Self::Char(ch) => write!(f, "character {ch:?}"),
            Self::Bool(b) => write!(f, "'{b}'"),
            Self::Eq => write!(f, "'='"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::LBrace => write!(f, "'{{'"),
            Self::RBrace => write!(f, "'}}'"),
            Self::Comma => write!(f, "','"),
            Self::Colon => write!(f, "':'"),
            Self::Semi => write!(f, "';'"),
            Self::Dot => write!(f, "'.'"),
            Self::Arrow => write!(f, "'->'"),
            Self::Eof => write!(f, "end of input"),
            _ => Ok(()),
        }
    }
}

/// A token with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token kind
    pub kind: TokenKind,

    /// Absolute start position in the document
    pub start: Span,

    /// Extent of the token text
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, start: Span, span: Span) -> Self {
        Self { kind, start, span }
    }

    /// Absolute position just past the token.
    #[must_use]
    pub fn end(&self) -> Span {
        self.start + self.span
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }

    /// Tokens are positioned relative to the document start.
    fn offset(&self) -> Span {
        self.start
    }
}
