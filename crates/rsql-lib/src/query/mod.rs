//! Query facade: size check → parse → compile.
//!
//! A [`Query`] owns the parsed program and its syntax diagnostics. Use
//! [`is_valid`](Query::is_valid) before compiling, or let
//! [`compile`](Query::compile) refuse invalid queries for you.


use rsql_core::{ColumnResolver, Predicate};

use crate::compile::Compiler;
use crate::diagnostics::Diagnostics;
use crate::parser::{DEFAULT_RECURSION_FUEL, Parser, Program};
use crate::{Error, Result};

/// Longest query accepted by default, in bytes.
pub const DEFAULT_MAX_INPUT_LEN: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    pub max_input_len: Option<usize>,
    pub recursion_fuel: Option<u32>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_input_len: Some(DEFAULT_MAX_INPUT_LEN),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
        }
    }
}

pub struct QueryBuilder<'q> {
    pub src: &'q str,
    config: QueryConfig,
}

impl<'q> QueryBuilder<'q> {
    pub fn new(src: &'q str) -> Self {
        Self {
            src,
            config: QueryConfig::default(),
        }
    }

    /// Reject inputs longer than `limit` bytes before lexing. None = no limit.
    pub fn max_input_len(mut self, limit: Option<usize>) -> Self {
        self.config.max_input_len = limit;
        self
    }

    /// Set nesting depth limit. None = infinite.
    ///
    /// Fuel restores when a group closes, so only depth counts, not length.
    pub fn recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.config.recursion_fuel = limit;
        self
    }

    /// Parses the source. Syntax errors do not fail this call; they are
    /// collected in [`Query::diagnostics`].
    pub fn parse(self) -> Result<Query<'q>> {
        let src = self.src;
        if let Some(limit) = self.config.max_input_len
            && src.len() > limit
        {
            return Err(Error::InputTooLarge {
                len: src.len(),
                limit,
            });
        }

        let (program, diagnostics) = Parser::new(src)
            .with_recursion_fuel(self.config.recursion_fuel)
            .parse()?;

        log::debug!(
            "parsed {} statement(s) with {} diagnostic(s)",
            program.statements.len(),
            diagnostics.len()
        );

        Ok(Query {
            src,
            program,
            diagnostics,
        })
    }
}

/// A parsed filter query.
#[derive(Debug, Clone)]
pub struct Query<'q> {
    src: &'q str,
    program: Program,
    diagnostics: Diagnostics,
}

impl<'q> Query<'q> {
    /// Parses with default limits.
    pub fn parse(src: &'q str) -> Result<Self> {
        QueryBuilder::new(src).parse()
    }

    pub fn source(&self) -> &'q str {
        self.src
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Error-severity messages. Warnings are left out.
    pub fn errors(&self) -> Vec<String> {
        self.diagnostics.error_messages()
    }

    /// Query is valid if there are no error diagnostics. Warnings are allowed.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn dump_ast(&self) -> String {
        self.program.dump()
    }

    /// Canonical string form of the program.
    pub fn canonical(&self) -> String {
        self.program.to_string()
    }

    pub fn render_diagnostics(&self, colored: bool) -> String {
        self.diagnostics.render_colored(self.src, colored)
    }

    pub fn compile<R>(&self, resolver: &R) -> Result<Option<Predicate>>
    where
        R: ColumnResolver + ?Sized,
    {
        self.compile_with(&Compiler::new(), resolver)
    }

    /// Compiles with custom options. Refuses queries with syntax errors.
    pub fn compile_with<R>(&self, compiler: &Compiler, resolver: &R) -> Result<Option<Predicate>>
    where
        R: ColumnResolver + ?Sized,
    {
        if !self.is_valid() {
            return Err(Error::QueryParseError(self.diagnostics.clone()));
        }
        Ok(compiler.compile(&self.program, resolver)?)
    }
}

impl<'q> TryFrom<&'q str> for Query<'q> {
    type Error = Error;

    fn try_from(src: &'q str) -> Result<Self> {
        Self::parse(src)
    }
}
