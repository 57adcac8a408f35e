//! Show the token stream of a query.

use std::path::PathBuf;

use rsql_lib::parser::{DEFAULT_RECURSION_FUEL, TokenKind, lex};

use super::query_loader::{load_or_exit, parse_or_exit};

pub struct TokensArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub color: bool,
}

pub fn run(args: TokensArgs) {
    let source = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());

    let mut illegal = false;
    for token in lex(&source.text) {
        if token.is(TokenKind::Eof) {
            break;
        }
        illegal |= token.is(TokenKind::Illegal);
        println!(
            "{} {:?} {}..{}",
            token.kind,
            token.literal,
            u32::from(token.span.start()),
            u32::from(token.span.end())
        );
    }

    // Tokens are shown as-is; the parser's diagnostics explain ILLEGAL ones.
    if illegal {
        let query = parse_or_exit(&source, DEFAULT_RECURSION_FUEL);
        eprint!("{}", source.render_diagnostics(query.diagnostics(), args.color));
        std::process::exit(1);
    }
}
