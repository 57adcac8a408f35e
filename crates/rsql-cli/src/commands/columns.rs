//! Column resolution for `compile`: a JSON file, `-c` flags, or identity.

use std::fs;
use std::path::{Path, PathBuf};

use rsql_core::{ColumnMap, ColumnResolver, ResolveError};

#[derive(Debug, thiserror::Error)]
pub enum ColumnsError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid column mapping in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid column mapping `{0}`: expected FIELD=COLUMN")]
    Mapping(String),
}

/// Where `compile` looks up columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Columns {
    /// No mapping given: every field is its own column.
    Identity,
    Map(ColumnMap),
}

impl Columns {
    /// File entries first, then `-c` flags, which override them.
    pub fn load(file: Option<&Path>, mappings: &[String]) -> Result<Self, ColumnsError> {
        if file.is_none() && mappings.is_empty() {
            return Ok(Columns::Identity);
        }

        let mut map = match file {
            Some(path) => read_column_file(path)?,
            None => ColumnMap::new(),
        };
        for mapping in mappings {
            let (field, column) = parse_mapping(mapping)?;
            map.insert(field, column);
        }

        log::debug!("loaded {} column mapping(s)", map.len());
        Ok(Columns::Map(map))
    }
}

impl ColumnResolver for Columns {
    fn resolve(&self, field: &str) -> Result<String, ResolveError> {
        match self {
            Columns::Identity => Ok(field.to_string()),
            Columns::Map(map) => map.resolve(field),
        }
    }
}

fn read_column_file(path: &Path) -> Result<ColumnMap, ColumnsError> {
    let content = fs::read_to_string(path).map_err(|source| ColumnsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ColumnsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Splits `field=column` at the first `=`. Both sides must be non-empty.
pub fn parse_mapping(mapping: &str) -> Result<(&str, &str), ColumnsError> {
    match mapping.split_once('=') {
        Some((field, column)) if !field.is_empty() && !column.is_empty() => Ok((field, column)),
        _ => Err(ColumnsError::Mapping(mapping.to_string())),
    }
}
