//! Typed AST produced by the parser.
//!
//! Every node keeps the token it came from, so diagnostics can point at
//! source and literals render back exactly as written. Nodes are immutable
//! once the parser hands the [`Program`] out.
//!
//! `Display` gives the canonical string form: each infix node adds one
//! parenthesis layer, so `foo==1;bar==2` renders as `((foo==1);(bar==2))`.
//! Parsing that rendering again yields the same tree.

use std::fmt::{self, Write};

use rowan::TextRange;

use super::token::{Token, TokenKind};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(ExprStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    /// First token of the statement.
    pub token: Token,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Integer(IntegerLit),
    Float(FloatLit),
    Bool(BoolLit),
    Null(NullLit),
    Str(StrLit),
    Array(Array),
    Prefix(Prefix),
    Infix(Infix),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub token: Token,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLit {
    pub token: Token,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLit {
    pub token: Token,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolLit {
    pub token: Token,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullLit {
    pub token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrLit {
    pub token: Token,
    /// Unescaped content. `token.literal` keeps the raw text.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    /// The opening `[`.
    pub token: Token,
    pub elements: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Neg,
}

impl PrefixOp {
    pub fn as_str(self) -> &'static str {
        match self {
            PrefixOp::Neg => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    /// The signed token, e.g. `-1.5` or `-abc`.
    pub token: Token,
    pub op: PrefixOp,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfixOp {
    /// `;`
    And,
    /// `,`
    Or,
    Eq,
    NotEq,
    Lt,
    LtOrEq,
    Gt,
    GtOrEq,
    Like,
    /// `=name=` with a name outside the built-in set. Holds `name`.
    Extension(String),
}

impl InfixOp {
    pub fn is_logical(&self) -> bool {
        matches!(self, InfixOp::And | InfixOp::Or)
    }

    /// Canonical symbolic spelling. Extensions keep their `=name=` form.
    pub fn symbol(&self) -> String {
        match self {
            InfixOp::And => ";".into(),
            InfixOp::Or => ",".into(),
            InfixOp::Eq => "==".into(),
            InfixOp::NotEq => "!=".into(),
            InfixOp::Lt => "<".into(),
            InfixOp::LtOrEq => "<=".into(),
            InfixOp::Gt => ">".into(),
            InfixOp::GtOrEq => ">=".into(),
            InfixOp::Like => "~".into(),
            InfixOp::Extension(name) => format!("={name}="),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    /// The operator token; its literal is what gets rendered.
    pub token: Token,
    pub op: InfixOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl Infix {
    pub fn operator(&self) -> &str {
        &self.token.literal
    }

    /// Nodes of the left spine, this one first, and the expression below the
    /// last of them.
    ///
    /// Operators are left-associative, so `a;b;c;...` nests along the left
    /// side as deep as the chain is long. Walkers use this instead of
    /// recursing into `left`.
    pub fn left_spine(&self) -> (Vec<&Infix>, &Expr) {
        let mut spine = vec![self];
        let mut leftmost = self.left.as_ref();
        while let Expr::Infix(inner) = leftmost {
            spine.push(inner);
            leftmost = inner.left.as_ref();
        }
        (spine, leftmost)
    }
}

/// Chains are dropped with an explicit stack. The derived drop would recurse
/// once per chained operator.
impl Drop for Infix {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach(&mut self.left, &mut pending);
        detach(&mut self.right, &mut pending);
        while let Some(mut expr) = pending.pop() {
            if let Expr::Infix(infix) = &mut expr {
                detach(&mut infix.left, &mut pending);
                detach(&mut infix.right, &mut pending);
            }
        }
    }
}

fn detach(slot: &mut Expr, pending: &mut Vec<Expr>) {
    if let Expr::Infix(_) = slot {
        let hole = Expr::Null(NullLit {
            token: Token::new(TokenKind::Null, "", TextRange::default()),
        });
        pending.push(std::mem::replace(slot, hole));
    }
}

impl Expr {
    pub fn token(&self) -> &Token {
        match self {
            Expr::Ident(n) => &n.token,
            Expr::Integer(n) => &n.token,
            Expr::Float(n) => &n.token,
            Expr::Bool(n) => &n.token,
            Expr::Null(n) => &n.token,
            Expr::Str(n) => &n.token,
            Expr::Array(n) => &n.token,
            Expr::Prefix(n) => &n.token,
            Expr::Infix(n) => &n.token,
        }
    }

    /// Source range covered by the whole expression.
    pub fn span(&self) -> TextRange {
        match self {
            Expr::Prefix(n) => n.token.span.cover(n.right.span()),
            Expr::Infix(n) => {
                let (_, leftmost) = n.left_spine();
                leftmost.span().cover(n.right.span())
            }
            Expr::Array(n) => n
                .elements
                .iter()
                .fold(n.token.span, |acc, e| acc.cover(e.span())),
            other => other.token().span,
        }
    }

    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Expr::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Expr::Ident(_) => "Ident",
            Expr::Integer(_) => "Integer",
            Expr::Float(_) => "Float",
            Expr::Bool(_) => "Bool",
            Expr::Null(_) => "Null",
            Expr::Str(_) => "String",
            Expr::Array(_) => "Array",
            Expr::Prefix(_) => "Prefix",
            Expr::Infix(_) => "Infix",
        }
    }
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn expressions(&self) -> impl Iterator<Item = &Expr> {
        self.statements.iter().map(|stmt| match stmt {
            Stmt::Expr(s) => &s.expr,
        })
    }

    /// Indented structural dump. Spans are omitted, so two programs with the
    /// same shape dump identically regardless of spacing in the source.
    pub fn dump(&self) -> String {
        let mut out = String::from("Program\n");
        for expr in self.expressions() {
            dump_expr(&mut out, expr, 1);
        }
        out
    }
}

fn dump_expr(out: &mut String, root: &Expr, depth: usize) {
    let mut stack = vec![(root, depth)];
    while let Some((expr, depth)) = stack.pop() {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}{}", expr.kind_name());
        match expr {
            Expr::Ident(n) => {
                let _ = writeln!(out, " {}", n.name);
            }
            Expr::Integer(n) => {
                let _ = writeln!(out, " {}", n.value);
            }
            Expr::Float(n) => {
                let _ = writeln!(out, " {:?}", n.value);
            }
            Expr::Bool(n) => {
                let _ = writeln!(out, " {}", n.value);
            }
            Expr::Null(_) => out.push('\n'),
            Expr::Str(n) => {
                let _ = writeln!(out, " {:?}", n.value);
            }
            Expr::Array(n) => {
                out.push('\n');
                stack.extend(n.elements.iter().rev().map(|e| (e, depth + 1)));
            }
            Expr::Prefix(n) => {
                let _ = writeln!(out, " {}", n.op.as_str());
                stack.push((&n.right, depth + 1));
            }
            Expr::Infix(n) => {
                let _ = writeln!(out, " {}", n.op.symbol());
                stack.push((&n.right, depth + 1));
                stack.push((&n.left, depth + 1));
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expr(s) => write!(f, "{}", s.expr),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(n) => f.write_str(&n.token.literal),
            Expr::Integer(n) => f.write_str(&n.token.literal),
            Expr::Float(n) => f.write_str(&n.token.literal),
            Expr::Bool(n) => f.write_str(&n.token.literal),
            Expr::Null(n) => f.write_str(&n.token.literal),
            Expr::Str(n) => write_quoted(f, &n.value),
            Expr::Array(n) => {
                f.write_char('[')?;
                for (i, element) in n.elements.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_char(']')
            }
            Expr::Prefix(n) => write!(f, "{}{}", n.op.as_str(), n.right),
            Expr::Infix(n) => {
                let (spine, leftmost) = n.left_spine();
                for _ in &spine {
                    f.write_char('(')?;
                }
                write!(f, "{leftmost}")?;
                for infix in spine.iter().rev() {
                    write!(f, "{}{})", infix.token.literal, infix.right)?;
                }
                Ok(())
            }
        }
    }
}

/// Double-quoted with `"` and `\` escaped, which the lexer reads back verbatim.
fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        if c == '"' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}

/// Undoes `\'`, `\"` and `\\`. Other backslashes are kept as written.
pub(crate) fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && matches!(next, '\'' | '"' | '\\')
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}
