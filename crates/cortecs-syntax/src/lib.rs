//! `cortecs` syntax: spans, tokens, lexer, parser and AST.
//!
//! This crate turns source text into the span-tagged tree consumed by the
//! type checker. Every node carries its extent and its start relative to its
//! parent, so positions can be translated outward one level at a time.
//!
//! # Modules
//!
//! - [`span`] - line/column positions and extents
//! - [`token`] - token kinds and literal suffixes
//! - [`lexer`] - tokenization
//! - [`parser`] - recursive descent parsing
//! - [`ast`] - syntax tree nodes
//! - [`error`] - lexer and parser errors
//!
//! # Examples
//!
//! ```
//! use cortecs_syntax::ast::StmtKind;
//! use cortecs_syntax::parse_statements;
//!
//! let block = parse_statements("let a = 1\nlet b = a").unwrap();
//! assert!(matches!(block.kind.stmts[1].kind, StmtKind::Let { .. }));
//! ```

#![warn(missing_docs)]

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

pub use error::{LexerError, LexerResult, ParserError, ParserResult, SyntaxError, SyntaxResult};
pub use lexer::Lexer;
pub use parser::{Parser, parse_expression, parse_program, parse_statements};
pub use span::{Span, Spanned};
pub use token::{FloatSuffix, IntSuffix, Token, TokenKind};
