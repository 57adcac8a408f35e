pub mod ast;
pub mod check;
pub mod columns;
pub mod compile;
pub mod query_loader;
pub mod tokens;
