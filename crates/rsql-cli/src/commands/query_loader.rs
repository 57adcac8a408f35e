use std::fs;
use std::io::{self, Read};
use std::path::Path;

use rsql_lib::{Diagnostics, Query, QueryBuilder};

/// Query text plus the name diagnostics should point at.
pub struct QuerySource {
    pub text: String,
    pub name: Option<String>,
}

impl QuerySource {
    pub fn render_diagnostics(&self, diagnostics: &Diagnostics, colored: bool) -> String {
        let printer = diagnostics.printer(&self.text).colored(colored);
        match &self.name {
            Some(name) => printer.path(name).render(),
            None => printer.render(),
        }
    }
}

pub fn load_query_source(
    query_path: Option<&Path>,
    query_text: Option<&str>,
) -> Result<QuerySource, String> {
    if let Some(text) = query_text {
        return Ok(QuerySource {
            text: text.to_string(),
            name: None,
        });
    }

    if let Some(path) = query_path {
        if path.as_os_str() == "-" {
            return load_stdin();
        }
        return load_file(path);
    }

    Err("query is required: use positional argument, `-` for stdin, or -q/--query".to_string())
}

fn load_stdin() -> Result<QuerySource, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(QuerySource {
        text: trim_line_end(buf),
        name: Some("<stdin>".to_string()),
    })
}

fn load_file(path: &Path) -> Result<QuerySource, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    Ok(QuerySource {
        text: trim_line_end(content),
        name: Some(path.to_string_lossy().into_owned()),
    })
}

/// Editors and `echo` leave a trailing newline that is not part of the query.
fn trim_line_end(mut text: String) -> String {
    let len = text.trim_end_matches(['\n', '\r']).len();
    text.truncate(len);
    text
}

pub fn load_or_exit(query_path: Option<&Path>, query_text: Option<&str>) -> QuerySource {
    match load_query_source(query_path, query_text) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    }
}

/// Exits on fatal parse errors only. Syntax errors are left to the caller.
pub fn parse_or_exit(source: &QuerySource, fuel: u32) -> Query<'_> {
    match QueryBuilder::new(&source.text)
        .recursion_fuel(Some(fuel))
        .parse()
    {
        Ok(query) => query,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
