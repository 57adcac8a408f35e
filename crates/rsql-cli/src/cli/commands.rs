//! Command builders for the CLI.
//!
//! Every subcommand accepts every flag, so switching `check` to `compile`
//! in a shell history line just works. Flags a command ignores are hidden
//! from its `--help`.

use clap::Command;

use super::args::*;

/// Add hidden compile args (for commands that don't compile).
fn with_hidden_compile_args(cmd: Command) -> Command {
    cmd.arg(columns_file_arg().hide(true))
        .arg(column_arg().hide(true))
        .arg(json_arg().hide(true))
        .arg(no_glob_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("rsql")
        .about("Inspect, check and compile RSQL/FIQL filter queries")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(tokens_command())
        .subcommand(ast_command())
        .subcommand(check_command())
        .subcommand(compile_command())
}

/// Show the token stream of a query.
pub fn tokens_command() -> Command {
    let cmd = Command::new("tokens")
        .about("Show the token stream of a query")
        .override_usage(
            "\
  rsql tokens <QUERY>
  rsql tokens -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  rsql tokens -q 'name==foo;age=gt=30'
  echo 'a==1' | rsql tokens -"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(color_arg())
        .arg(fuel_arg().hide(true))
        .arg(strict_arg().hide(true))
        .arg(string_arg().hide(true));

    with_hidden_compile_args(cmd)
}

/// Show the AST of a query.
pub fn ast_command() -> Command {
    let cmd = Command::new("ast")
        .about("Show the AST of a query")
        .override_usage(
            "\
  rsql ast <QUERY> [--string]
  rsql ast -q <TEXT> [--string]",
        )
        .after_help(
            r#"EXAMPLES:
  rsql ast -q 'a==1,b==2;c==3'            # tree
  rsql ast -q 'a == 1 ; b == 2' --string  # canonical form"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(string_arg())
        .arg(fuel_arg())
        .arg(color_arg())
        .arg(strict_arg().hide(true));

    with_hidden_compile_args(cmd)
}

/// Validate a query.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a query")
        .override_usage(
            "\
  rsql check <QUERY> [--strict]
  rsql check -q <TEXT> [--strict]",
        )
        .after_help(
            r#"EXAMPLES:
  rsql check filter.rsql
  rsql check -q 'a==1 b==2' --strict  # fails on the implicit AND warning"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(strict_arg())
        .arg(fuel_arg())
        .arg(color_arg())
        .arg(string_arg().hide(true));

    with_hidden_compile_args(cmd)
}

/// Compile a query to a predicate.
pub fn compile_command() -> Command {
    Command::new("compile")
        .about("Compile a query to a backend-neutral predicate")
        .override_usage(
            "\
  rsql compile <QUERY> [--columns <FILE>] [-c <FIELD=COLUMN>]... [--json]
  rsql compile -q <TEXT> [--columns <FILE>] [-c <FIELD=COLUMN>]... [--json]",
        )
        .after_help(
            r#"EXAMPLES:
  rsql compile -q 'Year=ge=2000'                        # fields are columns
  rsql compile -q 'Year=ge=2000' -c Year=release_year   # explicit mapping
  rsql compile filter.rsql --columns columns.json --json

Without --columns or -c, every field resolves to a column of the same name."#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(columns_file_arg())
        .arg(column_arg())
        .arg(json_arg())
        .arg(no_glob_arg())
        .arg(strict_arg())
        .arg(fuel_arg())
        .arg(color_arg())
        .arg(string_arg().hide(true))
}
