//! Lowering from the AST to backend-neutral predicates.
//!
//! Comparisons resolve their field through a [`ColumnResolver`] and decode
//! the right-hand side into a [`Value`]. `;` and `,` become `And`/`Or`,
//! with same-kind operands spliced into the parent.

use std::collections::HashMap;
use std::fmt;

use rsql_core::{ColumnResolver, Predicate, Value};

use super::error::CompileError;
use crate::parser::ast::{Expr, Infix, InfixOp, PrefixOp, Program};

/// Lowering for one extension operator. Receives the resolved column and the
/// decoded right-hand value.
pub type Lowering = Box<dyn Fn(&str, Value) -> Result<Predicate, CompileError> + Send + Sync>;

/// Configurable AST → [`Predicate`] lowering.
///
/// ```
/// use rsql_core::{ColumnMap, Predicate};
/// use rsql_lib::compile::Compiler;
/// use rsql_lib::parser::parse;
///
/// let (program, _) = parse("tag=in=[a,b]").unwrap();
/// let columns = ColumnMap::from_columns(["tag"]);
/// let compiler = Compiler::new().extension("in", |column, value| {
///     Ok(Predicate::Eq(column.to_string(), value))
/// });
/// let predicate = compiler.compile(&program, &columns).unwrap().unwrap();
/// assert_eq!(predicate.to_string(), r#"Eq(tag, ["a", "b"])"#);
/// ```
pub struct Compiler {
    extensions: HashMap<String, Lowering>,
    glob_wildcards: bool,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.extensions.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Compiler")
            .field("extensions", &names)
            .field("glob_wildcards", &self.glob_wildcards)
            .finish()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            extensions: HashMap::new(),
            glob_wildcards: true,
        }
    }

    /// Registers a lowering for `=name=`. A later registration for the same
    /// name replaces the earlier one.
    pub fn extension<F>(mut self, name: impl Into<String>, lowering: F) -> Self
    where
        F: Fn(&str, Value) -> Result<Predicate, CompileError> + Send + Sync + 'static,
    {
        self.extensions.insert(name.into(), Box::new(lowering));
        self
    }

    /// Translate glob `*` to `%` in LIKE patterns. On by default.
    pub fn glob_wildcards(mut self, enabled: bool) -> Self {
        self.glob_wildcards = enabled;
        self
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// `Ok(None)` for an empty program. Several statements are joined with AND.
    pub fn compile<R>(
        &self,
        program: &Program,
        resolver: &R,
    ) -> Result<Option<Predicate>, CompileError>
    where
        R: ColumnResolver + ?Sized,
    {
        log::debug!("compiling filter: {program}");

        let lowering = Lower {
            compiler: self,
            resolver,
        };

        let mut predicates = Vec::with_capacity(program.statements.len());
        for expr in program.expressions() {
            match lowering.filter(expr) {
                Ok(predicate) => predicates.push(predicate),
                Err(err) => {
                    log::debug!("compile failed: {err}");
                    return Err(err);
                }
            }
        }

        let predicate = match predicates.len() {
            0 => None,
            1 => predicates.pop(),
            _ => Some(Predicate::and(predicates)),
        };
        Ok(predicate)
    }
}

/// Compiles with default options.
pub fn compile<R>(program: &Program, resolver: &R) -> Result<Option<Predicate>, CompileError>
where
    R: ColumnResolver + ?Sized,
{
    Compiler::new().compile(program, resolver)
}

struct Lower<'a, R: ?Sized> {
    compiler: &'a Compiler,
    resolver: &'a R,
}

impl<R> Lower<'_, R>
where
    R: ColumnResolver + ?Sized,
{
    fn filter(&self, expr: &Expr) -> Result<Predicate, CompileError> {
        match expr {
            Expr::Infix(infix) => self.infix(infix),
            other => Err(CompileError::NotAFilter(other.to_string())),
        }
    }

    /// Lowers a run of the same logical operator in one pass over its left
    /// spine, operands in source order.
    fn chain(&self, infix: &Infix) -> Result<Predicate, CompileError> {
        let mut operands = vec![infix.right.as_ref()];
        let mut leftmost = infix.left.as_ref();
        while let Expr::Infix(inner) = leftmost
            && inner.op == infix.op
        {
            operands.push(inner.right.as_ref());
            leftmost = inner.left.as_ref();
        }
        operands.push(leftmost);

        let mut predicates = Vec::with_capacity(operands.len());
        for operand in operands.into_iter().rev() {
            predicates.push(self.filter(operand)?);
        }
        Ok(match infix.op {
            InfixOp::Or => Predicate::or(predicates),
            _ => Predicate::and(predicates),
        })
    }

    fn infix(&self, infix: &Infix) -> Result<Predicate, CompileError> {
        let predicate = match &infix.op {
            InfixOp::And | InfixOp::Or => self.chain(infix)?,
            InfixOp::Eq => self.compare(infix, Predicate::Eq)?,
            InfixOp::NotEq => self.compare(infix, Predicate::NotEq)?,
            InfixOp::Lt => self.compare(infix, Predicate::Lt)?,
            InfixOp::LtOrEq => self.compare(infix, Predicate::LtOrEq)?,
            InfixOp::Gt => self.compare(infix, Predicate::Gt)?,
            InfixOp::GtOrEq => self.compare(infix, Predicate::GtOrEq)?,
            InfixOp::Like => {
                let (column, value) = self.operands(infix)?;
                self.like(column, value, infix.operator())?
            }
            InfixOp::Extension(name) => {
                let (column, value) = self.operands(infix)?;
                match self.compiler.extensions.get(name) {
                    Some(lowering) => lowering(&column, value)?,
                    None => {
                        return Err(CompileError::UnsupportedOperator(
                            infix.operator().to_string(),
                        ));
                    }
                }
            }
        };
        Ok(predicate)
    }

    fn compare(
        &self,
        infix: &Infix,
        build: fn(String, Value) -> Predicate,
    ) -> Result<Predicate, CompileError> {
        let (column, value) = self.operands(infix)?;
        Ok(build(column, value))
    }

    /// Resolved column of the left side and decoded value of the right side.
    fn operands(&self, infix: &Infix) -> Result<(String, Value), CompileError> {
        let operator = infix.operator();
        let Some(field) = infix.left.as_ident() else {
            return Err(CompileError::mismatch(
                operator,
                format!("left side must be a field name, found `{}`", infix.left),
            ));
        };

        let column = self.resolver.resolve(&field.name)?;
        let value = self.value(&infix.right, operator)?;

        log::trace!("lowered `{}{operator}{}` on column `{column}`", field.name, infix.right);
        Ok((column, value))
    }

    fn like(&self, column: String, value: Value, operator: &str) -> Result<Predicate, CompileError> {
        let pattern = match value {
            Value::String(pattern) => pattern,
            other => {
                return Err(CompileError::mismatch(
                    operator,
                    format!("LIKE requires a string value, found {}", other.type_name()),
                ));
            }
        };
        let pattern = if self.compiler.glob_wildcards {
            pattern.replace('*', "%")
        } else {
            pattern
        };
        Ok(Predicate::Like(column, pattern))
    }

    /// Decodes a right-hand side. `operator` is only used for error context.
    fn value(&self, expr: &Expr, operator: &str) -> Result<Value, CompileError> {
        match expr {
            Expr::Array(array) => {
                let mut items = Vec::with_capacity(array.elements.len());
                for element in &array.elements {
                    let item = self.scalar(element, operator)?;
                    items.push(item);
                }
                Ok(Value::List(items))
            }
            Expr::Infix(infix) => {
                let inner = self.infix(infix)?;
                Ok(Value::Predicate(Box::new(inner)))
            }
            other => self.scalar(other, operator),
        }
    }

    fn scalar(&self, expr: &Expr, operator: &str) -> Result<Value, CompileError> {
        let value = match expr {
            Expr::Ident(ident) => Value::String(ident.name.clone()),
            Expr::Integer(lit) => Value::Integer(lit.value),
            Expr::Float(lit) => Value::Float(lit.value),
            Expr::Bool(lit) => Value::Bool(lit.value),
            Expr::Null(_) => Value::Null,
            Expr::Str(lit) => Value::String(lit.value.clone()),
            Expr::Prefix(prefix) => match (prefix.op, prefix.right.as_ref()) {
                (PrefixOp::Neg, Expr::Integer(lit)) => Value::Integer(-lit.value),
                (PrefixOp::Neg, Expr::Float(lit)) => Value::Float(-lit.value),
                (PrefixOp::Neg, Expr::Ident(ident)) => Value::String(format!("-{}", ident.name)),
                (PrefixOp::Neg, other) => {
                    return Err(CompileError::mismatch(
                        operator,
                        format!("cannot negate `{other}`"),
                    ));
                }
            },
            Expr::Array(_) | Expr::Infix(_) => {
                return Err(CompileError::mismatch(
                    operator,
                    format!("array elements must be scalars, found `{expr}`"),
                ));
            }
        };
        Ok(value)
    }
}
