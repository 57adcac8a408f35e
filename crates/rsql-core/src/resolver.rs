//! Field-name to column resolution.

use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("column not found: {0}")]
    NotFound(String),
}

/// Maps a query-level field name to a physical column identifier.
///
/// Implementations must be safe to call repeatedly; the compiler calls
/// `resolve` once per comparison and never caches results.
pub trait ColumnResolver {
    fn resolve(&self, field: &str) -> Result<String, ResolveError>;
}

impl<F> ColumnResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, field: &str) -> Result<String, ResolveError> {
        self(field).ok_or_else(|| ResolveError::NotFound(field.to_string()))
    }
}

/// Ordered field → column table.
///
/// Deserializes from a flat JSON object: `{"Year": "year", "family": "family_name"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ColumnMap {
    columns: IndexMap<String, String>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every column is reachable under its own name.
    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = columns
            .into_iter()
            .map(|c| {
                let c = c.into();
                (c.clone(), c)
            })
            .collect();
        Self { columns }
    }

    pub fn insert(&mut self, field: impl Into<String>, column: impl Into<String>) {
        self.columns.insert(field.into(), column.into());
    }

    pub fn with(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.insert(field, column);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Physical column names in insertion order, duplicates included.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(f, c)| (f.as_str(), c.as_str()))
    }
}

impl ColumnResolver for ColumnMap {
    fn resolve(&self, field: &str) -> Result<String, ResolveError> {
        self.columns
            .get(field)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(field.to_string()))
    }
}

impl<K, V> FromIterator<(K, V)> for ColumnMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
