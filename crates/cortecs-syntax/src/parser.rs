//! Recursive descent parser.
//!
//! Expressions use precedence climbing over [`TokenKind::precedence`].
//! Statements need no terminator: a statement ends where the next token can
//! no longer continue it, and `;` is accepted and ignored. A `(` continues an
//! expression as a call only when it sits on the same line as the previous
//! token, and `return` only takes a value from its own line.
//!
//! Each `parse_*` method returns a node whose `offset` is still an absolute
//! position; the caller rebases it once the parent's start is known.
//!
//! # Examples
//!
//! ```
//! use cortecs_syntax::parser::parse_program;
//!
//! let program = parse_program("function id(x) { return x }").unwrap();
//! assert_eq!(program.functions.len(), 1);
//! assert_eq!(program.functions[0].kind.name.kind, "id");
//! ```

use crate::ast::{
    BinaryOp, Block, Expr, ExprKind, FieldInit, Function, Ident, Literal, Node, Param, Program,
    Stmt, StmtKind, TypeExpr, TypeKind, UnaryOp,
};
use crate::error::{ParserError, ParserResult, SyntaxResult};
use crate::lexer::lex;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Minimum precedence for parsing.
const MIN_PRECEDENCE: u8 = 1;

/// Parser over a lexed token stream.
pub struct Parser {
    /// Token stream, always terminated by `Eof`
    tokens: Vec<Token>,
    /// Index of the current token
    pos: usize,
    /// Absolute end of the last consumed token
    prev_end: Span,
}

impl Parser {
    /// Creates a parser. An `Eof` token is appended if missing.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let end = tokens.last().map_or(Span::ZERO, Token::end);
            tokens.push(Token::new(TokenKind::Eof, end, Span::ZERO));
        }
        Self {
            tokens,
            pos: 0,
            prev_end: Span::ZERO,
        }
    }

    fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.current().kind == *kind
    }

    fn is_at_eof(&self) -> bool {
        self.check(&TokenKind::Eof)
    }

    fn bump(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
            self.prev_end = token.end();
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> ParserResult<Token> {
        if self.check(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn unexpected(&self, expected: &str) -> ParserError {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            ParserError::UnexpectedEof {
                expected: expected.to_string(),
                span: token.start,
            }
        } else {
            ParserError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.kind.to_string(),
                span: token.start,
            }
        }
    }

    /// Closes a node that started at `start` and ends at the last token.
    fn finish<T>(&self, start: Span, kind: T) -> Node<T> {
        Node::new(start, self.prev_end - start, kind)
    }

    fn on_same_line(&self) -> bool {
        self.current().start.line == self.prev_end.line
    }

    fn can_start_expr(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Ident(_)
                | TokenKind::Int(..)
                | TokenKind::Float(..)
                | TokenKind::Str(_)
                | TokenKind::Char(_)
                | TokenKind::Bool(_)
                | TokenKind::LParen
                | TokenKind::LBrace
                | TokenKind::Minus
                | TokenKind::Bang
        )
    }

    fn expect_identifier(&mut self) -> ParserResult<Ident> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Ident(name) => {
                self.bump();
                Ok(Node::new(token.start, token.span, name))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn skip_semicolons(&mut self) {
        while self.eat(&TokenKind::Semi) {}
    }

    /// Parses top-level declarations until end of input.
    ///
    /// # Errors
    ///
    /// Fails on the first token that cannot start or continue a declaration.
    pub fn parse_program(&mut self) -> ParserResult<Program> {
        let mut functions = Vec::new();
        self.skip_semicolons();
        while !self.is_at_eof() {
            functions.push(self.parse_function()?);
            self.skip_semicolons();
        }
        Ok(Program { functions })
    }

    /// Parses `function name(params) [-> T] { body }`.
    ///
    /// # Errors
    ///
    /// Fails when the declaration header is malformed.
    pub fn parse_function(&mut self) -> ParserResult<Node<Function>> {
        let start = self.current().start;
        self.expect(&TokenKind::Function)?;
        let name = self.expect_identifier()?.rebase(start);

        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            params.push(self.parse_param()?.rebase(start));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;

        let ret = if self.eat(&TokenKind::Arrow) {
            Some(self.parse_type()?.rebase(start))
        } else {
            None
        };

        let body = self.parse_block()?.rebase(start);
        Ok(self.finish(
            start,
            Function {
                name,
                params,
                ret,
                body,
            },
        ))
    }

    fn parse_param(&mut self) -> ParserResult<Node<Param>> {
        let start = self.current().start;
        let name = self.expect_identifier()?.rebase(start);
        let annotation = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type()?.rebase(start))
        } else {
            None
        };
        Ok(self.finish(start, Param { name, annotation }))
    }

    /// Parses `{ stmt* }`.
    ///
    /// # Errors
    ///
    /// Fails on a missing closing brace or a token that starts no statement.
    pub fn parse_block(&mut self) -> ParserResult<Node<Block>> {
        let start = self.current().start;
        self.expect(&TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        loop {
            self.skip_semicolons();
            if self.check(&TokenKind::RBrace) || self.is_at_eof() {
                break;
            }
            stmts.push(self.parse_stmt()?.rebase(start));
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(self.finish(start, Block { stmts }))
    }

    /// Parses a single statement.
    ///
    /// # Errors
    ///
    /// Fails on a token that starts no statement.
    pub fn parse_stmt(&mut self) -> ParserResult<Stmt> {
        match self.current().kind {
            TokenKind::Let => self.parse_let_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            _ if self.can_start_expr() => {
                let expr = self.parse_expr(MIN_PRECEDENCE)?;
                let start = expr.offset;
                Ok(self.finish(start, StmtKind::Expr(expr.rebase(start))))
            }
            _ => Err(self.unexpected("statement")),
        }
    }

    fn parse_let_stmt(&mut self) -> ParserResult<Stmt> {
        let start = self.bump().start;
        let name = self.expect_identifier()?.rebase(start);
        let annotation = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type()?.rebase(start))
        } else {
            None
        };
        let value = if self.eat(&TokenKind::Eq) && self.can_start_expr() {
            Some(self.parse_expr(MIN_PRECEDENCE)?.rebase(start))
        } else {
            None
        };
        Ok(self.finish(
            start,
            StmtKind::Let {
                name,
                annotation,
                value,
            },
        ))
    }

    fn parse_return_stmt(&mut self) -> ParserResult<Stmt> {
        let start = self.bump().start;
        let value = if self.on_same_line() && self.can_start_expr() {
            Some(self.parse_expr(MIN_PRECEDENCE)?.rebase(start))
        } else {
            None
        };
        Ok(self.finish(start, StmtKind::Return(value)))
    }

    fn parse_if_stmt(&mut self) -> ParserResult<Stmt> {
        let start = self.bump().start;
        self.expect(&TokenKind::LParen)?;
        let condition = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr(MIN_PRECEDENCE)?.rebase(start))
        };
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_block()?.rebase(start);
        Ok(self.finish(start, StmtKind::If { condition, body }))
    }

    /// Parses an expression whose binary operators bind at least as tightly
    /// as `min_precedence`.
    ///
    /// # Errors
    ///
    /// Fails on a token that starts no expression.
    pub fn parse_expr(&mut self, min_precedence: u8) -> ParserResult<Expr> {
        let mut lhs = self.parse_unary_expr()?;

        while let Some(precedence) = self.current().kind.precedence() {
            if precedence < min_precedence {
                break;
            }
            let op_token = self.bump();
            let Some(op) = token_kind_to_binary_op(&op_token.kind) else {
                break;
            };
            let op = Node::new(op_token.start, op_token.span, op);
            let rhs = if self.can_start_expr() {
                Some(self.parse_expr(precedence + 1)?)
            } else {
                None
            };

            let start = lhs.offset;
            lhs = self.finish(
                start,
                ExprKind::Binary {
                    op: op.rebase(start),
                    lhs: Box::new(lhs.rebase(start)),
                    rhs: rhs.map(|rhs| Box::new(rhs.rebase(start))),
                },
            );
        }

        Ok(lhs)
    }

    fn parse_unary_expr(&mut self) -> ParserResult<Expr> {
        let op = match self.current().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_postfix_expr(),
        };
        let token = self.bump();
        let start = token.start;
        let operand = if self.can_start_expr() {
            Some(Box::new(self.parse_unary_expr()?.rebase(start)))
        } else {
            None
        };
        Ok(self.finish(
            start,
            ExprKind::Unary {
                op: Node::new(Span::ZERO, token.span, op),
                operand,
            },
        ))
    }

    fn parse_postfix_expr(&mut self) -> ParserResult<Expr> {
        let mut expr = self.parse_primary_expr()?;
        loop {
            let start = expr.offset;
            if self.check(&TokenKind::LParen) && self.on_same_line() {
                self.bump();
                let mut args = Vec::new();
                while !self.check(&TokenKind::RParen) {
                    args.push(self.parse_expr(MIN_PRECEDENCE)?.rebase(start));
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(&TokenKind::RParen)?;
                expr = self.finish(
                    start,
                    ExprKind::Call {
                        callee: Box::new(expr.rebase(start)),
                        args,
                    },
                );
            } else if self.eat(&TokenKind::Dot) {
                let label = self.expect_identifier()?.rebase(start);
                expr = self.finish(
                    start,
                    ExprKind::Access {
                        target: Box::new(expr.rebase(start)),
                        label,
                    },
                );
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary_expr(&mut self) -> ParserResult<Expr> {
        let token = self.current().clone();
        let literal = match token.kind {
            TokenKind::Ident(name) => {
                self.bump();
                return Ok(Node::new(token.start, token.span, ExprKind::Name(name)));
            }
            TokenKind::LParen => return self.parse_group_expr(),
            TokenKind::LBrace => return self.parse_record_expr(),
            TokenKind::Int(digits, suffix) => Literal::Int(digits, suffix),
            TokenKind::Float(digits, suffix) => Literal::Float(digits, suffix),
            TokenKind::Str(value) => Literal::Str(value),
            TokenKind::Char(ch) => Literal::Char(ch),
            TokenKind::Bool(b) => Literal::Bool(b),
            _ => return Err(self.unexpected("expression")),
        };
        self.bump();
        Ok(Node::new(token.start, token.span, ExprKind::Literal(literal)))
    }

    fn parse_group_expr(&mut self) -> ParserResult<Expr> {
        let start = self.bump().start;
        let inner = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_expr(MIN_PRECEDENCE)?.rebase(start)))
        };
        self.expect(&TokenKind::RParen)?;
        Ok(self.finish(start, ExprKind::Group(inner)))
    }

    fn parse_record_expr(&mut self) -> ParserResult<Expr> {
        let start = self.bump().start;
        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let field_start = self.current().start;
            let label = self.expect_identifier()?.rebase(field_start);
            let value = if self.eat(&TokenKind::Colon) && self.can_start_expr() {
                Some(self.parse_expr(MIN_PRECEDENCE)?.rebase(field_start))
            } else {
                None
            };
            fields.push(self.finish(field_start, FieldInit { label, value }).rebase(start));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(self.finish(start, ExprKind::Record(fields)))
    }

    /// Parses a type annotation.
    ///
    /// # Errors
    ///
    /// Fails on a token that starts no type.
    pub fn parse_type(&mut self) -> ParserResult<TypeExpr> {
        let start = self.current().start;
        let params = if self.eat(&TokenKind::LParen) {
            let mut params = Vec::new();
            while !self.check(&TokenKind::RParen) {
                params.push(self.parse_type()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RParen)?;
            if !self.check(&TokenKind::Arrow) {
                return match params.pop() {
                    Some(only) if params.is_empty() => Ok(only),
                    _ => Err(self.unexpected("'->'")),
                };
            }
            params
        } else {
            vec![self.parse_type_atom()?]
        };

        if !self.eat(&TokenKind::Arrow) {
            // A lone atom without an arrow is the type itself.
            return params
                .into_iter()
                .next()
                .ok_or_else(|| self.unexpected("type"));
        }

        let ret = self.parse_type()?.rebase(start);
        let params = params.into_iter().map(|p| p.rebase(start)).collect();
        Ok(self.finish(
            start,
            TypeKind::Arrow {
                params,
                ret: Box::new(ret),
            },
        ))
    }

    fn parse_type_atom(&mut self) -> ParserResult<TypeExpr> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Ident(name) => {
                self.bump();
                Ok(Node::new(token.start, token.span, TypeKind::Named(name)))
            }
            TokenKind::LBrace => {
                let start = self.bump().start;
                let mut fields = Vec::new();
                while !self.check(&TokenKind::RBrace) {
                    let label = self.expect_identifier()?.rebase(start);
                    self.expect(&TokenKind::Colon)?;
                    let ty = self.parse_type()?.rebase(start);
                    fields.push((label, ty));
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(&TokenKind::RBrace)?;
                Ok(self.finish(start, TypeKind::Record(fields)))
            }
            _ => Err(self.unexpected("type")),
        }
    }

    fn expect_eof(&self) -> ParserResult<()> {
        if self.is_at_eof() {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }
}

fn token_kind_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Rem,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::BangEq => BinaryOp::Ne,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::LtEq => BinaryOp::Le,
        TokenKind::GtEq => BinaryOp::Ge,
        TokenKind::AmpAmp => BinaryOp::And,
        TokenKind::PipePipe => BinaryOp::Or,
        _ => return None,
    })
}

/// Parses a document of function declarations.
///
/// # Errors
///
/// Returns the first lexer or parser error.
pub fn parse_program(source: &str) -> SyntaxResult<Program> {
    let mut parser = Parser::new(lex(source)?);
    Ok(parser.parse_program()?)
}

/// Parses a bare statement sequence as one block starting at the document
/// origin.
///
/// # Errors
///
/// Returns the first lexer or parser error.
pub fn parse_statements(source: &str) -> SyntaxResult<Node<Block>> {
    let mut parser = Parser::new(lex(source)?);
    let mut stmts = Vec::new();
    loop {
        parser.skip_semicolons();
        if parser.is_at_eof() {
            break;
        }
        stmts.push(parser.parse_stmt()?);
    }
    let end = parser.current().start;
    Ok(Node::new(Span::ZERO, end, Block { stmts }))
}

/// Parses a single expression spanning the whole input.
///
/// # Errors
///
/// Returns the first lexer or parser error, including trailing input.
pub fn parse_expression(source: &str) -> SyntaxResult<Expr> {
    let mut parser = Parser::new(lex(source)?);
    let expr = parser.parse_expr(MIN_PRECEDENCE)?;
    parser.expect_eof()?;
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::IntSuffix;

    #[test]
    fn test_parse_name() {
        let expr = parse_expression("x").unwrap();
        assert_eq!(expr.kind, ExprKind::Name("x".into()));
        assert_eq!(expr.span, Span::columns(1));
    }

    #[test]
    fn test_parse_literal_suffix() {
        let expr = parse_expression("0ub").unwrap();
        assert_eq!(
            expr.kind,
            ExprKind::Literal(Literal::Int("0".into(), Some(IntSuffix::U8)))
        );
    }

    #[test]
    fn test_parse_binary_precedence() {
        let expr = parse_expression("a + b * c").unwrap();
        let ExprKind::Binary { op, lhs, rhs } = expr.kind else {
            panic!("expected binary");
        };
        assert_eq!(op.kind, BinaryOp::Add);
        assert_eq!(op.offset, Span::columns(2));
        assert_eq!(lhs.kind, ExprKind::Name("a".into()));
        let rhs = rhs.unwrap();
        assert_eq!(rhs.offset, Span::columns(4));
        assert!(matches!(
            rhs.kind,
            ExprKind::Binary {
                op: Node {
                    kind: BinaryOp::Mul,
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn test_parse_left_associative() {
        let expr = parse_expression("a - b - c").unwrap();
        let ExprKind::Binary { lhs, .. } = expr.kind else {
            panic!("expected binary");
        };
        assert!(matches!(lhs.kind, ExprKind::Binary { .. }));
    }

    #[test]
    fn test_parse_missing_rhs() {
        let expr = parse_expression("a +").unwrap();
        assert!(matches!(expr.kind, ExprKind::Binary { rhs: None, .. }));
    }

    #[test]
    fn test_parse_group_offset() {
        let expr = parse_expression("(  x)").unwrap();
        let ExprKind::Group(Some(inner)) = expr.kind else {
            panic!("expected group");
        };
        assert_eq!(inner.offset, Span::columns(3));
        assert_eq!(expr.span, Span::columns(5));
    }

    #[test]
    fn test_parse_call_and_access() {
        let expr = parse_expression("f(a, 1).name").unwrap();
        let ExprKind::Access { target, label } = expr.kind else {
            panic!("expected access");
        };
        assert_eq!(label.kind, "name");
        assert_eq!(label.offset, Span::columns(8));
        let ExprKind::Call { callee, args } = target.kind else {
            panic!("expected call");
        };
        assert_eq!(callee.kind, ExprKind::Name("f".into()));
        assert_eq!(args.len(), 2);
        assert_eq!(args[1].offset, Span::columns(5));
    }

    #[test]
    fn test_parse_record_literal() {
        let expr = parse_expression("{name: 1, age: 2ub}").unwrap();
        let ExprKind::Record(fields) = expr.kind else {
            panic!("expected record");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].kind.label.kind, "age");
        assert_eq!(fields[1].offset, Span::columns(10));
    }

    #[test]
    fn test_parse_unary() {
        let expr = parse_expression("-x").unwrap();
        let ExprKind::Unary { op, operand } = expr.kind else {
            panic!("expected unary");
        };
        assert_eq!(op.kind, UnaryOp::Neg);
        assert_eq!(operand.unwrap().offset, Span::columns(1));
    }

    #[test]
    fn test_parse_trailing_input_fails() {
        assert!(parse_expression("a b").is_err());
    }

    #[test]
    fn test_parse_statements_offsets() {
        let block = parse_statements("let x = a\nlet y = a").unwrap();
        assert_eq!(block.kind.stmts.len(), 2);
        assert_eq!(block.kind.stmts[1].offset, Span::new(1, 0));
        let StmtKind::Let { value, .. } = &block.kind.stmts[1].kind else {
            panic!("expected let");
        };
        assert_eq!(value.as_ref().unwrap().offset, Span::columns(8));
    }

    #[test]
    fn test_parse_let_without_value() {
        let block = parse_statements("let x =\nlet y = 1").unwrap();
        assert!(matches!(
            block.kind.stmts[0].kind,
            StmtKind::Let { value: None, .. }
        ));
    }

    #[test]
    fn test_parse_if_without_condition() {
        let block = parse_statements("if () { return 1 }").unwrap();
        let StmtKind::If { condition, body } = &block.kind.stmts[0].kind else {
            panic!("expected if");
        };
        assert!(condition.is_none());
        assert_eq!(body.kind.stmts.len(), 1);
    }

    #[test]
    fn test_parse_return_value_on_same_line_only() {
        let block = parse_statements("return\nx").unwrap();
        assert_eq!(block.kind.stmts.len(), 2);
        assert!(matches!(block.kind.stmts[0].kind, StmtKind::Return(None)));
    }

    #[test]
    fn test_call_needs_same_line() {
        let block = parse_statements("f\n(x)").unwrap();
        assert_eq!(block.kind.stmts.len(), 2);
    }

    #[test]
    fn test_parse_function() {
        let program =
            parse_program("function add(a: I32, b) -> I32 {\n  return a + b\n}").unwrap();
        let function = &program.functions[0].kind;
        assert_eq!(function.name.kind, "add");
        assert_eq!(function.params.len(), 2);
        assert!(function.params[0].kind.annotation.is_some());
        assert!(function.params[1].kind.annotation.is_none());
        assert!(function.ret.is_some());
        assert_eq!(function.body.kind.stmts[0].offset, Span::new(1, 2));
    }

    #[test]
    fn test_parse_function_offsets_are_relative() {
        let program = parse_program("function a() {}\n\nfunction b() {}").unwrap();
        assert_eq!(program.functions[1].offset, Span::new(2, 0));
        assert_eq!(program.functions[1].kind.name.offset, Span::columns(9));
    }

    #[test]
    fn test_parse_types() {
        let block = parse_statements("let f: (I32, t) -> {a: U8} = g").unwrap();
        let StmtKind::Let { annotation, .. } = &block.kind.stmts[0].kind else {
            panic!("expected let");
        };
        let TypeKind::Arrow { params, ret } = &annotation.as_ref().unwrap().kind else {
            panic!("expected arrow");
        };
        assert_eq!(params.len(), 2);
        assert_eq!(params[1].kind, TypeKind::Named("t".into()));
        assert!(matches!(ret.kind, TypeKind::Record(_)));
    }

    #[test]
    fn test_parse_arrow_right_associative() {
        let block = parse_statements("let f: I32 -> I32 -> Bool = g").unwrap();
        let StmtKind::Let { annotation, .. } = &block.kind.stmts[0].kind else {
            panic!("expected let");
        };
        let TypeKind::Arrow { params, ret } = &annotation.as_ref().unwrap().kind else {
            panic!("expected arrow");
        };
        assert_eq!(params.len(), 1);
        assert!(matches!(ret.kind, TypeKind::Arrow { .. }));
    }

    #[test]
    fn test_parse_unexpected_token() {
        let err = parse_program("function (").unwrap_err();
        assert!(err.to_string().contains("expected identifier"));
    }
}
