//! Parser state and low-level token operations.

use std::mem;

use rowan::{TextRange, TextSize};

use super::ast::Program;
use super::lexer::{Lexer, MAX_SOURCE_LEN};
use super::token::{Token, TokenKind};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::{Error, PassResult};

/// Nesting depth allowed by default before parsing is aborted.
pub const DEFAULT_RECURSION_FUEL: u32 = 256;

/// Pratt parser over a two-token window (`cur`, `peek`) pulled from a [`Lexer`].
///
/// One parser handles one query string. Syntax errors accumulate in
/// [`diagnostics`](Self::diagnostics); running out of recursion fuel is
/// fatal and surfaces through [`parse`](Self::parse).
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    pub(super) cur: Token,
    pub(super) peek: Token,
    pub(super) diagnostics: Diagnostics,
    depth: u32,
    last_diagnostic_pos: Option<TextSize>,
    recursion_fuel_limit: Option<u32>,
    fatal_error: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            cur,
            peek,
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            recursion_fuel_limit: Some(DEFAULT_RECURSION_FUEL),
            fatal_error: None,
        }
    }

    /// `None` disables the limit.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel_limit = limit;
        self
    }

    pub fn source(&self) -> &'src str {
        self.lexer.source()
    }

    /// Parses the whole input, then hands back the program together with
    /// its diagnostics. `Err` only on fatal errors, including a source too
    /// long for `u32` spans.
    pub fn parse(mut self) -> PassResult<Program> {
        let len = self.source().len();
        if len > MAX_SOURCE_LEN {
            return Err(Error::InputTooLarge {
                len,
                limit: MAX_SOURCE_LEN,
            });
        }
        let program = self.parse_program();
        self.finish(program)
    }

    fn finish(self, program: Program) -> PassResult<Program> {
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        Ok((program, self.diagnostics))
    }

    /// Error messages from the parse, in the order they were found.
    ///
    /// A fatal error, if any, comes last.
    pub fn errors(&self) -> Vec<String> {
        let mut errors = self.diagnostics.error_messages();
        if let Some(err) = &self.fatal_error {
            errors.push(err.to_string());
        }
        errors
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub(super) fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.cur = mem::replace(&mut self.peek, next);
    }

    pub(super) fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.is(kind)
    }

    pub(super) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    pub(super) fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    pub(super) fn should_stop(&self) -> bool {
        self.cur_is(TokenKind::Eof) || self.has_fatal_error()
    }

    /// Advances if `peek` has the given kind. The caller reports on mismatch,
    /// since only it knows which delimiter was left open.
    pub(super) fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.advance();
            return true;
        }
        false
    }

    pub(super) fn enter_recursion(&mut self) -> bool {
        if let Some(limit) = self.recursion_fuel_limit
            && self.depth >= limit
        {
            if self.fatal_error.is_none() {
                self.fatal_error = Some(Error::RecursionLimitExceeded);
            }
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    pub(super) fn error_msg(
        &mut self,
        kind: DiagnosticKind,
        range: TextRange,
        message: impl Into<String>,
    ) {
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics.report(kind, range).message(message).emit();
    }

    pub(super) fn error_with_fix(
        &mut self,
        kind: DiagnosticKind,
        range: TextRange,
        message: impl Into<String>,
        fix_description: impl Into<String>,
        fix_replacement: impl Into<String>,
    ) {
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics
            .report(kind, range)
            .message(message)
            .fix(fix_description, fix_replacement)
            .emit();
    }

    /// Reports a missing closing delimiter at `peek`, pointing back at the opener.
    pub(super) fn error_unclosed_delimiter(
        &mut self,
        kind: DiagnosticKind,
        related_msg: impl Into<String>,
        open_range: TextRange,
    ) {
        let range = self.peek.span;
        if !self.should_report(range.start()) {
            return;
        }
        let found = describe(&self.peek);
        self.diagnostics
            .report(kind, range)
            .message(found)
            .related_to(related_msg, open_range)
            .emit();
    }
}

/// How a token is named in "found ..." messages.
pub(super) fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::Str => "a string literal".to_string(),
        _ => format!("`{}`", token.literal),
    }
}
