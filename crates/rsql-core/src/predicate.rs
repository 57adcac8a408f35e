use std::fmt;

use serde::Serialize;

use crate::Value;

/// Backend-neutral filter tree produced by compiling a query.
///
/// Columns are physical column names: they have already passed through a
/// [`ColumnResolver`](crate::ColumnResolver). Logical nodes are n-ary; a compiler
/// is expected to splice same-kind children rather than nest them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Eq(String, Value),
    NotEq(String, Value),
    Gt(String, Value),
    GtOrEq(String, Value),
    Lt(String, Value),
    LtOrEq(String, Value),
    /// Pattern match. The pattern uses the backend wildcard (`%`) unless the
    /// compiler was told to leave glob `*` untouched.
    Like(String, String),
}

impl Predicate {
    /// Conjunction that splices nested `And` children into one level.
    pub fn and(parts: impl IntoIterator<Item = Predicate>) -> Self {
        let mut children = Vec::new();
        for part in parts {
            match part {
                Predicate::And(inner) => children.extend(inner),
                other => children.push(other),
            }
        }
        Predicate::And(children)
    }

    /// Disjunction that splices nested `Or` children into one level.
    pub fn or(parts: impl IntoIterator<Item = Predicate>) -> Self {
        let mut children = Vec::new();
        for part in parts {
            match part {
                Predicate::Or(inner) => children.extend(inner),
                other => children.push(other),
            }
        }
        Predicate::Or(children)
    }

    /// Column the comparison applies to; `None` for logical nodes.
    pub fn column(&self) -> Option<&str> {
        match self {
            Predicate::And(_) | Predicate::Or(_) => None,
            Predicate::Eq(c, _)
            | Predicate::NotEq(c, _)
            | Predicate::Gt(c, _)
            | Predicate::GtOrEq(c, _)
            | Predicate::Lt(c, _)
            | Predicate::LtOrEq(c, _)
            | Predicate::Like(c, _) => Some(c),
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Predicate::And(_) | Predicate::Or(_))
    }

    /// Every column referenced by this tree, in visiting order, including
    /// columns inside value-position sub-predicates.
    pub fn columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Predicate::And(children) | Predicate::Or(children) => {
                for child in children {
                    child.collect_columns(out);
                }
            }
            Predicate::Like(column, _) => out.push(column),
            Predicate::Eq(column, value)
            | Predicate::NotEq(column, value)
            | Predicate::Gt(column, value)
            | Predicate::GtOrEq(column, value)
            | Predicate::Lt(column, value)
            | Predicate::LtOrEq(column, value) => {
                out.push(column);
                if let Value::Predicate(inner) = value {
                    inner.collect_columns(out);
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Predicate::And(_) => "And",
            Predicate::Or(_) => "Or",
            Predicate::Eq(..) => "Eq",
            Predicate::NotEq(..) => "NotEq",
            Predicate::Gt(..) => "Gt",
            Predicate::GtOrEq(..) => "GtOrEq",
            Predicate::Lt(..) => "Lt",
            Predicate::LtOrEq(..) => "LtOrEq",
            Predicate::Like(..) => "Like",
        }
    }
}

/// Functional form: `Or(Eq(foo, 1), And(Eq(bar, 2), Like(name, "a%")))`.
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        match self {
            Predicate::And(children) | Predicate::Or(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{child}")?;
                }
            }
            Predicate::Like(column, pattern) => write!(f, "{column}, {pattern:?}")?,
            Predicate::Eq(column, value)
            | Predicate::NotEq(column, value)
            | Predicate::Gt(column, value)
            | Predicate::GtOrEq(column, value)
            | Predicate::Lt(column, value)
            | Predicate::LtOrEq(column, value) => write!(f, "{column}, {value}")?,
        }
        f.write_str(")")
    }
}
