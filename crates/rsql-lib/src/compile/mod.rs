//! AST → [`Predicate`](rsql_core::Predicate) lowering.
//!
//! Unlike parsing, compilation fails fast: the first unknown column or
//! ill-typed value aborts with a [`CompileError`].

mod compiler;
mod error;

#[cfg(test)]
mod compile_tests;

pub use compiler::{Compiler, Lowering, compile};
pub use error::CompileError;
