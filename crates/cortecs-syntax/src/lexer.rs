//! Lexical analysis.
//!
//! The lexer walks the source once, tracking the zero-based line and column
//! of every token start. Newlines are whitespace; statement boundaries are
//! recovered by the parser from token positions.
//!
//! # Examples
//!
//! ```
//! use cortecs_syntax::lexer::Lexer;
//! use cortecs_syntax::token::TokenKind;
//!
//! let tokens = Lexer::new("let x = 0ub").lex().unwrap();
//!
//! assert_eq!(tokens.len(), 5); // let, x, =, 0ub, EOF
//! assert_eq!(tokens[4].kind, TokenKind::Eof);
//! ```

use crate::error::{LexerError, LexerResult};
use crate::span::Span;
use crate::token::{FloatSuffix, IntSuffix, Token, TokenKind};
use std::iter::Peekable;
use std::str::Chars;

/// Lexical analyzer over a source string.
pub struct Lexer<'input> {
    input: &'input str,
    chars: Peekable<Chars<'input>>,

    /// Current byte offset
    position: usize,

    /// Current zero-based line
    line: u32,

    /// Current zero-based column
    column: u32,

    tokens: Vec<Token>,
    errors: Vec<LexerError>,
}

impl<'input> Lexer<'input> {
    /// Creates a lexer positioned at the start of `input`.
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
            line: 0,
            column: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenizes the whole input, appending an `Eof` token.
    ///
    /// The lexer keeps going after an error so that later errors are also
    /// found, but only the first one is returned.
    ///
    /// # Errors
    ///
    /// Returns the first [`LexerError`] met in the input.
    pub fn lex(mut self) -> LexerResult<Vec<Token>> {
        loop {
            self.skip_trivia();
            if self.peek().is_none() {
                break;
            }

            match self.next_token() {
                Ok(token) => self.tokens.push(token),
                Err(err) => {
                    self.errors.push(err);
                    self.recover();
                }
            }
        }

        let eof = self.here();
        self.tokens.push(Token::new(TokenKind::Eof, eof, Span::ZERO));

        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.tokens),
        }
    }

    fn here(&self) -> Span {
        Span::new(self.line, self.column)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek2(&self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Skips whitespace and `//` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek2() == Some('/') => {
                    while let Some(ch) = self.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> LexerResult<Token> {
        let start = self.here();
        let Some(ch) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, start, Span::ZERO));
        };

        let kind = match ch {
            'a'..='z' | 'A'..='Z' | '_' => self.read_identifier(),
            '0'..='9' => self.read_number(start)?,
            '"' => self.read_string(start)?,
            '\'' => self.read_char(start)?,
            _ => {
                self.bump();
                match ch {
                    '+' => TokenKind::Plus,
                    '*' => TokenKind::Star,
                    '/' => TokenKind::Slash,
                    '%' => TokenKind::Percent,
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    ',' => TokenKind::Comma,
                    ':' => TokenKind::Colon,
                    ';' => TokenKind::Semi,
                    '.' => TokenKind::Dot,
                    '-' if self.eat('>') => TokenKind::Arrow,
                    '-' => TokenKind::Minus,
                    '=' if self.eat('=') => TokenKind::EqEq,
                    '=' => TokenKind::Eq,
                    '!' if self.eat('=') => TokenKind::BangEq,
                    '!' => TokenKind::Bang,
                    '<' if self.eat('=') => TokenKind::LtEq,
                    '<' => TokenKind::Lt,
                    '>' if self.eat('=') => TokenKind::GtEq,
                    '>' => TokenKind::Gt,
                    '&' if self.eat('&') => TokenKind::AmpAmp,
                    '|' if self.eat('|') => TokenKind::PipePipe,
                    _ => return Err(LexerError::UnknownChar { ch, span: start }),
                }
            }
        };

        Ok(Token::new(kind, start, self.here() - start))
    }

    fn read_identifier(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                self.bump();
            } else {
                break;
            }
        }

        match &self.input[start..self.position] {
            "function" => TokenKind::Function,
            "let" => TokenKind::Let,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "true" => TokenKind::Bool(true),
            "false" => TokenKind::Bool(false),
            text => TokenKind::Ident(text.to_string()),
        }
    }

    /// Reads digits, an optional fraction, and an optional suffix.
    ///
    /// A `.` only continues the number when a digit follows, so `x.0.y` style
    /// field access after an integer is left to the parser.
    fn read_number(&mut self, start_pos: Span) -> LexerResult<TokenKind> {
        let start = self.position;
        let mut is_float = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '_' {
                self.bump();
            } else if ch == '.' && !is_float && self.peek2().is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.bump();
            } else {
                break;
            }
        }

        let digits_end = self.position;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() {
                self.bump();
            } else {
                break;
            }
        }

        let digits = self.input[start..digits_end].replace('_', "");
        let suffix = &self.input[digits_end..self.position];
        let invalid = || LexerError::InvalidNumeric {
            literal: self.input[start..self.position].to_string(),
            span: start_pos,
        };

        let integer = |digits: String, suffix: Option<IntSuffix>| {
            let fits = digits
                .parse::<u64>()
                .is_ok_and(|value| value <= IntSuffix::max_value(suffix));
            if fits {
                Ok(TokenKind::Int(digits, suffix))
            } else {
                Err(LexerError::IntegerOverflow {
                    literal: self.input[start..self.position].to_string(),
                    ty: IntSuffix::type_name(suffix),
                    span: start_pos,
                })
            }
        };

        if suffix.is_empty() {
            return if is_float {
                Ok(TokenKind::Float(digits, None))
            } else {
                integer(digits, None)
            };
        }

        if is_float {
            FloatSuffix::parse(suffix)
                .map(|s| TokenKind::Float(digits, Some(s)))
                .ok_or_else(invalid)
        } else if let Some(s) = IntSuffix::parse(suffix) {
            integer(digits, Some(s))
        } else {
            // `1f` and `1d` are floats written without a fraction.
            FloatSuffix::parse(suffix)
                .map(|s| TokenKind::Float(digits, Some(s)))
                .ok_or_else(invalid)
        }
    }

    fn read_escape(&mut self) -> Option<char> {
        Some(match self.bump()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            other => other,
        })
    }

    fn read_string(&mut self, start: Span) -> LexerResult<TokenKind> {
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(TokenKind::Str(value)),
                Some('\\') => match self.read_escape() {
                    Some(ch) => value.push(ch),
                    None => break,
                },
                Some(ch) => value.push(ch),
                None => break,
            }
        }
        Err(LexerError::UnterminatedString { start })
    }

    fn read_char(&mut self, start: Span) -> LexerResult<TokenKind> {
        self.bump();
        let value = match self.bump() {
            Some('\\') => self.read_escape(),
            Some('\'') | Some('\n') | None => None,
            other => other,
        };
        match value {
            Some(ch) if self.eat('\'') => Ok(TokenKind::Char(ch)),
            _ => Err(LexerError::InvalidChar { start }),
        }
    }

    /// Skips to a plausible token start after an error.
    fn recover(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch.is_alphanumeric() || "(){}\"".contains(ch) {
                break;
            }
            self.bump();
        }
    }
}

/// Tokenizes `input`.
///
/// # Errors
///
/// Returns the first [`LexerError`] in the input.
pub fn lex(input: &str) -> LexerResult<Vec<Token>> {
    Lexer::new(input).lex()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lexer_empty() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_lexer_keywords() {
        assert_eq!(
            kinds("function let return if"),
            vec![
                TokenKind::Function,
                TokenKind::Let,
                TokenKind::Return,
                TokenKind::If,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lexer_identifier() {
        assert_eq!(
            kinds("isOdd _tmp"),
            vec![
                TokenKind::Ident("isOdd".into()),
                TokenKind::Ident("_tmp".into()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lexer_integer_suffixes() {
        let cases = [
            ("0", None),
            ("0b", Some(IntSuffix::I8)),
            ("0s", Some(IntSuffix::I16)),
            ("0l", Some(IntSuffix::I64)),
            ("0u", Some(IntSuffix::U32)),
            ("0ub", Some(IntSuffix::U8)),
            ("0us", Some(IntSuffix::U16)),
            ("0ul", Some(IntSuffix::U64)),
        ];
        for (source, suffix) in cases {
            assert_eq!(kinds(source)[0], TokenKind::Int("0".into(), suffix), "{source}");
        }
    }

    #[test]
    fn test_lexer_float_suffixes() {
        assert_eq!(kinds("0.0")[0], TokenKind::Float("0.0".into(), None));
        assert_eq!(
            kinds("0.0d")[0],
            TokenKind::Float("0.0".into(), Some(FloatSuffix::F64))
        );
        assert_eq!(
            kinds("2f")[0],
            TokenKind::Float("2".into(), Some(FloatSuffix::F32))
        );
    }

    #[test]
    fn test_lexer_number_underscores() {
        assert_eq!(kinds("1_000")[0], TokenKind::Int("1000".into(), None));
    }

    #[test]
    fn test_lexer_invalid_suffix() {
        let err = lex("let x = 12q").unwrap_err();
        assert_eq!(
            err,
            LexerError::InvalidNumeric {
                literal: "12q".into(),
                span: Span::new(0, 8),
            }
        );
    }

    #[test]
    fn test_lexer_integer_overflow() {
        let err = lex("let x = 99999999999999999999").unwrap_err();
        assert_eq!(
            err,
            LexerError::IntegerOverflow {
                literal: "99999999999999999999".into(),
                ty: "I32",
                span: Span::new(0, 8),
            }
        );

        let err = lex("256ub").unwrap_err();
        assert!(matches!(err, LexerError::IntegerOverflow { ty: "U8", .. }), "{err:?}");
        assert_eq!(err.to_string(), "1:1: integer literal '256ub' does not fit in U8");
    }

    #[test]
    fn test_lexer_integer_width_limits() {
        assert_eq!(kinds("255ub")[0], TokenKind::Int("255".into(), Some(IntSuffix::U8)));
        assert_eq!(kinds("2147483647")[0], TokenKind::Int("2147483647".into(), None));
        assert!(lex("2147483648").is_err());
        assert!(lex("128b").is_err());
        assert_eq!(
            kinds("18446744073709551615ul")[0],
            TokenKind::Int("18446744073709551615".into(), Some(IntSuffix::U64))
        );
        assert!(lex("9223372036854775808l").is_err());
    }

    #[test]
    fn test_lexer_integer_then_dot() {
        assert_eq!(
            kinds("1.a"),
            vec![
                TokenKind::Int("1".into(), None),
                TokenKind::Dot,
                TokenKind::Ident("a".into()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lexer_string_and_char() {
        assert_eq!(kinds(r#""a\nb""#)[0], TokenKind::Str("a\nb".into()));
        assert_eq!(kinds("'a'")[0], TokenKind::Char('a'));
        assert_eq!(kinds(r"'\t'")[0], TokenKind::Char('\t'));
    }

    #[test]
    fn test_lexer_unterminated_string() {
        let err = lex("\"abc").unwrap_err();
        assert_eq!(err, LexerError::UnterminatedString { start: Span::ZERO });
    }

    #[test]
    fn test_lexer_invalid_char() {
        assert!(matches!(lex("''"), Err(LexerError::InvalidChar { .. })));
        assert!(matches!(lex("'ab'"), Err(LexerError::InvalidChar { .. })));
    }

    #[test]
    fn test_lexer_operators() {
        assert_eq!(
            kinds("+ - * / % == != < > <= >= && || ! = ->"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::Bang,
                TokenKind::Eq,
                TokenKind::Arrow,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lexer_line_comment() {
        assert_eq!(
            kinds("a // trailing\nb"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Ident("b".into()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lexer_positions() {
        let tokens = lex("let x\n  = 10ul").unwrap();
        assert_eq!(tokens[0].start, Span::new(0, 0));
        assert_eq!(tokens[0].span, Span::columns(3));
        assert_eq!(tokens[1].start, Span::new(0, 4));
        assert_eq!(tokens[2].start, Span::new(1, 2));
        assert_eq!(tokens[3].start, Span::new(1, 4));
        assert_eq!(tokens[3].span, Span::columns(4));
        assert_eq!(tokens[4].start, Span::new(1, 8));
    }

    #[test]
    fn test_lexer_unknown_char_recovers() {
        let err = lex("a @ b #").unwrap_err();
        assert_eq!(
            err,
            LexerError::UnknownChar {
                ch: '@',
                span: Span::new(0, 2),
            }
        );
    }
}
