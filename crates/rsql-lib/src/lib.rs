//! RSQL/FIQL filter queries: lexer, Pratt parser, and compiler to
//! backend-neutral predicates.
//!
//! # Example
//!
//! ```
//! use rsql_core::ColumnMap;
//! use rsql_lib::Query;
//!
//! let query = Query::try_from("genre==scifi;year=ge=2000").expect("input within limits");
//! assert!(query.is_valid(), "{}", query.render_diagnostics(false));
//!
//! let columns = ColumnMap::new().with("genre", "genre").with("year", "release_year");
//! let predicate = query.compile(&columns).unwrap().unwrap();
//! assert_eq!(
//!     predicate.to_string(),
//!     r#"And(Eq(genre, "scifi"), GtOrEq(release_year, 2000))"#
//! );
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compile;
pub mod diagnostics;
pub mod parser;
pub mod query;

/// Result type for passes that produce both output and diagnostics.
///
/// The pass returns its typed output alongside any diagnostics it collected.
/// Fatal errors (like fuel exhaustion) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use compile::{CompileError, Compiler};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use query::{Query, QueryBuilder};

/// Errors that stop a query from producing a predicate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("query is {len} bytes, limit is {limit}")]
    InputTooLarge { len: usize, limit: usize },

    #[error("query parsing failed with {} errors", .0.error_count())]
    QueryParseError(Diagnostics),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, Error>;
