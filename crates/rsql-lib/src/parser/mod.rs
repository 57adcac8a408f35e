//! Lexer, AST and Pratt parser for the filter language.
//!
//! # Architecture
//!
//! - `token`: the closed set of token kinds
//! - `lexer`: Logos recognizer plus a pull tokenizer that classifies its output
//! - `core`: parser state, the `cur`/`peek` window and error reporting
//! - `grammar`: binding powers, prefix/infix rule tables, parse functions
//! - `ast`: immutable typed tree with a canonical string form
//!
//! # Recovery Strategy
//!
//! The parser never gives up on a syntax error. The failed expression is
//! dropped, a diagnostic is recorded, and parsing resumes at the next token
//! as a new statement. One malformed query can therefore report several
//! problems.
//!
//! Running out of recursion fuel is the exception: it returns an actual
//! error immediately.

pub mod ast;
pub mod lexer;
pub mod token;

mod core;
mod grammar;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod recovery_tests;

pub use ast::{
    Array, BoolLit, Expr, ExprStmt, FloatLit, Ident, Infix, InfixOp, IntegerLit, NullLit, Prefix,
    PrefixOp, Program, Stmt, StrLit,
};
pub use core::{DEFAULT_RECURSION_FUEL, Parser};
pub use grammar::{Precedence, precedence};
pub use lexer::{Lexer, MAX_SOURCE_LEN, lex};
pub use token::{Token, TokenKind};

use crate::PassResult;

/// Main entry point. Returns Err on fuel exhaustion or a source longer
/// than [`MAX_SOURCE_LEN`].
pub fn parse(source: &str) -> PassResult<Program> {
    Parser::new(source).parse()
}
