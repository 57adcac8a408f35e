//! Show the AST of a query.

use std::path::PathBuf;

use super::query_loader::{load_or_exit, parse_or_exit};

pub struct AstArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub string: bool,
    pub fuel: u32,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let source = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());
    let query = parse_or_exit(&source, args.fuel);

    // Show diagnostics if any; the tree below is what survived recovery
    if !query.diagnostics().is_empty() {
        eprint!(
            "{}",
            source.render_diagnostics(query.diagnostics(), args.color)
        );
    }

    if args.string {
        println!("{}", query.canonical());
    } else {
        print!("{}", query.dump_ast());
    }

    if !query.is_valid() {
        std::process::exit(1);
    }
}
