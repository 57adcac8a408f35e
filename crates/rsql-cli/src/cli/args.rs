//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! visible or hidden (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Query file, or `-` for stdin (positional).
pub fn query_path_arg() -> Arg {
    Arg::new("query_path")
        .value_name("QUERY")
        .value_parser(value_parser!(PathBuf))
        .help("Query file, or `-` to read stdin")
}

/// Inline query text (-q/--query).
pub fn query_text_arg() -> Arg {
    Arg::new("query_text")
        .short('q')
        .long("query")
        .value_name("TEXT")
        .conflicts_with("query_path")
        .help("Inline query text")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Nesting limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .default_value("256")
        .value_parser(value_parser!(u32))
        .help("Maximum nesting depth of groups and operators")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Canonical string form instead of the tree (--string).
pub fn string_arg() -> Arg {
    Arg::new("string")
        .long("string")
        .action(ArgAction::SetTrue)
        .help("Print the canonical string form instead of the tree")
}

/// JSON column mapping (--columns).
pub fn columns_file_arg() -> Arg {
    Arg::new("columns_file")
        .long("columns")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON object mapping field names to columns")
}

/// Single column mapping, repeatable (-c/--column).
pub fn column_arg() -> Arg {
    Arg::new("column")
        .short('c')
        .long("column")
        .value_name("FIELD=COLUMN")
        .action(ArgAction::Append)
        .help("Map a field to a column (repeatable)")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the predicate as JSON")
}

/// Keep `*` in LIKE patterns (--no-glob).
pub fn no_glob_arg() -> Arg {
    Arg::new("no_glob")
        .long("no-glob")
        .action(ArgAction::SetTrue)
        .help("Keep `*` in LIKE patterns instead of translating it to `%`")
}
