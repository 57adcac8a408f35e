use std::path::PathBuf;

use super::query_loader::{load_or_exit, parse_or_exit};

pub struct CheckArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub strict: bool,
    pub fuel: u32,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());
    let query = parse_or_exit(&source, args.fuel);

    let diagnostics = query.diagnostics();
    let is_valid = if args.strict {
        !diagnostics.has_errors() && !diagnostics.has_warnings()
    } else {
        query.is_valid()
    };

    if !is_valid {
        eprint!("{}", source.render_diagnostics(diagnostics, args.color));
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
