#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Backend-neutral output model for compiled RSQL filters.
//!
//! Two halves:
//! - **Predicate layer**: [`Predicate`] and [`Value`], the tree a storage backend walks
//!   to emit a parameterized filter expression
//! - **Schema layer**: [`ColumnResolver`], the capability that maps query-level field
//!   names to physical columns, plus [`ColumnMap`] as an in-memory implementation
//!
//! Nothing here parses or executes queries. Backends depend on this crate alone.

mod predicate;
mod resolver;
mod value;

#[cfg(test)]
mod resolver_tests;

pub use predicate::Predicate;
pub use resolver::{ColumnMap, ColumnResolver, ResolveError};
pub use value::Value;
