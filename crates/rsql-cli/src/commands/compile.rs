//! Compile a query to a predicate and print it.

use std::path::PathBuf;

use rsql_lib::Compiler;

use super::columns::Columns;
use super::query_loader::{load_or_exit, parse_or_exit};

pub struct CompileArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub columns_file: Option<PathBuf>,
    pub columns: Vec<String>,
    pub json: bool,
    pub glob_wildcards: bool,
    pub strict: bool,
    pub fuel: u32,
    pub color: bool,
}

pub fn run(args: CompileArgs) {
    let columns = match Columns::load(args.columns_file.as_deref(), &args.columns) {
        Ok(columns) => columns,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let source = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());
    let query = parse_or_exit(&source, args.fuel);

    let diagnostics = query.diagnostics();
    if !diagnostics.is_empty() {
        eprint!("{}", source.render_diagnostics(diagnostics, args.color));
    }
    if !query.is_valid() || (args.strict && diagnostics.has_warnings()) {
        std::process::exit(1);
    }

    let compiler = Compiler::new().glob_wildcards(args.glob_wildcards);
    let predicate = match query.compile_with(&compiler, &columns) {
        Ok(predicate) => predicate,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&predicate) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: failed to serialize predicate: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // An empty query filters nothing, so there is nothing to print.
    if let Some(predicate) = predicate {
        println!("{}", predicate);
    }
}
