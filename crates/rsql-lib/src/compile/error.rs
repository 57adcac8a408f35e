use rsql_core::ResolveError;

/// First problem found while lowering a parsed query. Compilation stops here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    #[error("invalid value for `{operator}`: {reason}")]
    TypeMismatch { operator: String, reason: String },

    /// Extension operator with no registered lowering. Holds `=name=`.
    #[error("unsupported operator `{0}`")]
    UnsupportedOperator(String),

    /// Top-level expression that is not a comparison or a logical node.
    #[error("`{0}` is not a filter expression")]
    NotAFilter(String),
}

impl CompileError {
    pub(crate) fn mismatch(operator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TypeMismatch {
            operator: operator.into(),
            reason: reason.into(),
        }
    }

    /// The query names a field the schema does not know.
    pub fn is_field_error(&self) -> bool {
        matches!(self, Self::UnknownColumn(_))
    }

    /// The query is well-formed but a value or operator does not fit.
    pub fn is_value_error(&self) -> bool {
        !self.is_field_error()
    }
}

impl From<ResolveError> for CompileError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound(field) => Self::UnknownColumn(field),
        }
    }
}
