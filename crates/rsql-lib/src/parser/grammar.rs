//! Pratt grammar: binding powers, rule tables and the parse functions.
//!
//! `;` (AND) binds looser than `,` (OR), which binds looser than the
//! comparisons. So `a==1;b==2,c==3` is `a==1 AND (b==2 OR c==3)`.

use rowan::{TextRange, TextSize};

use super::ast::{
    Array, BoolLit, Expr, ExprStmt, FloatLit, Ident, Infix, InfixOp, IntegerLit, NullLit, Prefix,
    PrefixOp, Program, Stmt, StrLit, unescape,
};
use super::core::{Parser, describe};
use super::token::{Token, TokenKind};
use crate::diagnostics::DiagnosticKind;

/// Binding power, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    And,
    Or,
    Compare,
    Prefix,
}

/// Binding power of `kind` in infix position. Tokens without an infix rule
/// get `Lowest`, which ends the current expression.
pub fn precedence(kind: TokenKind) -> Precedence {
    use TokenKind::*;
    match kind {
        Semicolon => Precedence::And,
        Comma => Precedence::Or,
        Eq | NotEq | Lt | LtOrEq | Gt | GtOrEq | Like | Extension => Precedence::Compare,
        _ => Precedence::Lowest,
    }
}

type PrefixFn<'src> = fn(&mut Parser<'src>) -> Option<Expr>;
type InfixFn<'src> = fn(&mut Parser<'src>, Expr) -> Option<Expr>;

fn prefix_rule<'src>(kind: TokenKind) -> Option<PrefixFn<'src>> {
    use TokenKind::*;
    let rule: PrefixFn<'src> = match kind {
        Ident => Parser::parse_ident,
        Integer => Parser::parse_integer,
        Float => Parser::parse_float,
        True | False => Parser::parse_bool,
        Null => Parser::parse_null,
        Str => Parser::parse_string,
        LParen => Parser::parse_group,
        LBracket => Parser::parse_array,
        _ => return None,
    };
    Some(rule)
}

fn infix_rule<'src>(kind: TokenKind) -> Option<InfixFn<'src>> {
    if kind.is_comparison() || kind.is_logical() {
        Some(Parser::parse_infix)
    } else {
        None
    }
}

fn infix_op(token: &Token) -> Option<InfixOp> {
    use TokenKind::*;
    let op = match token.kind {
        Semicolon => InfixOp::And,
        Comma => InfixOp::Or,
        Eq => InfixOp::Eq,
        NotEq => InfixOp::NotEq,
        Lt => InfixOp::Lt,
        LtOrEq => InfixOp::LtOrEq,
        Gt => InfixOp::Gt,
        GtOrEq => InfixOp::GtOrEq,
        Like => InfixOp::Like,
        Extension => {
            let name = token.literal.trim_matches('=');
            InfixOp::Extension(name.to_string())
        }
        _ => return None,
    };
    Some(op)
}

/// Splits `-x` into the sign and an unsigned token covering `x`.
fn strip_sign(token: &Token) -> Option<Token> {
    let rest = token.literal.strip_prefix('-')?;
    let span = TextRange::new(token.span.start() + TextSize::from(1), token.span.end());
    Some(Token::new(token.kind, rest, span))
}

impl<'src> Parser<'src> {
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.should_stop() {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt);
            }
            self.advance();
        }

        if let Some(Stmt::Expr(second)) = program.statements.get(1) {
            let range = second.expr.span();
            self.diagnostics
                .report(DiagnosticKind::ImplicitConjunction, range)
                .message("separate them with `;`")
                .emit();
        }

        program
    }

    fn parse_statement(&mut self) -> Option<Stmt> {
        let token = self.cur.clone();
        let expr = self.parse_expression(Precedence::Lowest)?;
        Some(Stmt::Expr(ExprStmt { token, expr }))
    }

    pub(super) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        if !self.enter_recursion() {
            return None;
        }
        let expr = self.parse_expression_inner(precedence);
        self.exit_recursion();
        expr
    }

    fn parse_expression_inner(&mut self, precedence: Precedence) -> Option<Expr> {
        let Some(prefix) = prefix_rule(self.cur.kind) else {
            self.error_no_prefix();
            return None;
        };
        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Eof) && precedence < self.peek_precedence() {
            let Some(infix) = infix_rule(self.peek.kind) else {
                return Some(left);
            };
            self.advance();
            left = infix(self, left)?;
        }

        Some(left)
    }

    fn peek_precedence(&self) -> Precedence {
        precedence(self.peek.kind)
    }

    fn error_no_prefix(&mut self) {
        let token = self.cur.clone();
        match token.kind {
            TokenKind::Illegal if token.literal.len() > 1 && token.literal.starts_with('=') => {
                let replacement = format!("={}", token.literal);
                self.error_with_fix(
                    DiagnosticKind::IllegalToken,
                    token.span,
                    &token.literal,
                    "use `==` for equality",
                    replacement,
                );
            }
            TokenKind::Illegal => {
                self.error_msg(DiagnosticKind::IllegalToken, token.span, &token.literal);
            }
            TokenKind::Equal => {
                self.error_with_fix(
                    DiagnosticKind::ExpectedExpression,
                    token.span,
                    describe(&token),
                    "use `==` for equality",
                    "==",
                );
            }
            _ => {
                self.error_msg(
                    DiagnosticKind::ExpectedExpression,
                    token.span,
                    describe(&token),
                );
            }
        }
    }

    fn parse_ident(&mut self) -> Option<Expr> {
        if let Some(unsigned) = strip_sign(&self.cur) {
            let right = Expr::Ident(Ident {
                name: unsigned.literal.clone(),
                token: unsigned,
            });
            return Some(self.negate(right));
        }
        Some(Expr::Ident(Ident {
            token: self.cur.clone(),
            name: self.cur.literal.clone(),
        }))
    }

    fn parse_integer(&mut self) -> Option<Expr> {
        let signed = strip_sign(&self.cur);
        let token = signed.clone().unwrap_or_else(|| self.cur.clone());
        let Ok(value) = token.literal.parse::<i64>() else {
            self.error_msg(
                DiagnosticKind::InvalidInteger,
                self.cur.span,
                self.cur.literal.clone(),
            );
            return None;
        };
        let lit = Expr::Integer(IntegerLit { token, value });
        Some(if signed.is_some() { self.negate(lit) } else { lit })
    }

    fn parse_float(&mut self) -> Option<Expr> {
        let signed = strip_sign(&self.cur);
        let token = signed.clone().unwrap_or_else(|| self.cur.clone());
        let Ok(value) = token.literal.parse::<f64>() else {
            self.error_msg(
                DiagnosticKind::InvalidFloat,
                self.cur.span,
                self.cur.literal.clone(),
            );
            return None;
        };
        let lit = Expr::Float(FloatLit { token, value });
        Some(if signed.is_some() { self.negate(lit) } else { lit })
    }

    fn negate(&self, right: Expr) -> Expr {
        Expr::Prefix(Prefix {
            token: self.cur.clone(),
            op: PrefixOp::Neg,
            right: Box::new(right),
        })
    }

    fn parse_bool(&mut self) -> Option<Expr> {
        Some(Expr::Bool(BoolLit {
            token: self.cur.clone(),
            value: self.cur_is(TokenKind::True),
        }))
    }

    fn parse_null(&mut self) -> Option<Expr> {
        Some(Expr::Null(NullLit {
            token: self.cur.clone(),
        }))
    }

    fn parse_string(&mut self) -> Option<Expr> {
        Some(Expr::Str(StrLit {
            value: unescape(&self.cur.literal),
            token: self.cur.clone(),
        }))
    }

    fn parse_group(&mut self) -> Option<Expr> {
        let open = self.cur.span;
        self.advance();

        let expr = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            self.error_unclosed_delimiter(DiagnosticKind::UnclosedGroup, "group opened here", open);
            return None;
        }

        Some(expr)
    }

    /// `[` elements `]`. Elements are parsed at prefix power, so no operator
    /// binds inside one and `,` always separates.
    fn parse_array(&mut self) -> Option<Expr> {
        let token = self.cur.clone();
        let mut elements = Vec::new();

        if self.expect_peek(TokenKind::RBracket) {
            return Some(Expr::Array(Array { token, elements }));
        }

        self.advance();
        elements.push(self.parse_expression(Precedence::Prefix)?);

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            elements.push(self.parse_expression(Precedence::Prefix)?);
        }

        if !self.expect_peek(TokenKind::RBracket) {
            self.error_unclosed_delimiter(
                DiagnosticKind::UnclosedArray,
                "array opened here",
                token.span,
            );
            return None;
        }

        Some(Expr::Array(Array { token, elements }))
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        let token = self.cur.clone();
        let op = infix_op(&token)?;
        let precedence = precedence(token.kind);

        self.advance();
        let right = self.parse_expression(precedence)?;

        Some(Expr::Infix(Infix {
            token,
            op,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }
}
