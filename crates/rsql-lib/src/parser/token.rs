//! Token kinds for the filter language.
//!
//! The set is closed: recognition happens on a private Logos enum in the
//! lexer, which classifies its output into these kinds.

use std::fmt;

use rowan::TextRange;

/// All token kinds the lexer hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    /// Bare word, including signed words like `-abc`.
    Ident,
    Integer,
    Float,
    /// Quoted string. The token's literal is the text between the quotes.
    Str,

    True,
    False,
    Null,

    LParen,
    RParen,
    LBracket,
    RBracket,

    /// `,`, logical OR.
    Comma,
    /// `;`, logical AND.
    Semicolon,

    Equal,
    Eq,
    NotEq,
    Lt,
    LtOrEq,
    Gt,
    GtOrEq,
    Like,
    Bang,
    Escape,

    /// Alpha operator the compiler has no built-in lowering for, e.g. `=in=`.
    Extension,
}

use TokenKind::*;

impl TokenKind {
    /// Comparison operators, symbolic or alpha spelling.
    #[inline]
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Eq | NotEq | Lt | LtOrEq | Gt | GtOrEq | Like | Extension
        )
    }

    #[inline]
    pub fn is_logical(self) -> bool {
        matches!(self, Semicolon | Comma)
    }

    /// Human-readable name used in diagnostics and token dumps.
    pub fn name(self) -> &'static str {
        match self {
            Illegal => "ILLEGAL",
            Eof => "EOF",
            Ident => "IDENT",
            Integer => "INTEGER",
            Float => "FLOAT",
            Str => "STRING",
            True => "TRUE",
            False => "FALSE",
            Null => "NULL",
            LParen => "LPAREN",
            RParen => "RPAREN",
            LBracket => "LBRACKET",
            RBracket => "RBRACKET",
            Comma => "COMMA",
            Semicolon => "SEMICOLON",
            Equal => "EQUAL",
            Eq => "EQ",
            NotEq => "NEQ",
            Lt => "LT",
            LtOrEq => "LE",
            Gt => "GT",
            GtOrEq => "GE",
            Like => "LIKE",
            Bang => "BANG",
            Escape => "ESCAPE",
            Extension => "EXTENSION",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyword table, consulted after a bare word is scanned.
pub(crate) fn keyword(word: &str) -> Option<TokenKind> {
    match word {
        "true" => Some(True),
        "false" => Some(False),
        "null" => Some(Null),
        _ => None,
    }
}

/// Comparison kinds for the interior of a FIQL alpha operator.
pub(crate) fn alpha_operator(name: &str) -> TokenKind {
    match name {
        "eq" => Eq,
        "neq" => NotEq,
        "gt" => Gt,
        "ge" => GtOrEq,
        "lt" => Lt,
        "le" => LtOrEq,
        _ => Extension,
    }
}

/// Finds the closing quote in `body` (the text after the opening quote).
///
/// A backslash escapes the character after it. Returns the byte offset of
/// the closing quote, or `None` if the string runs to end of input.
pub(crate) fn closing_quote(body: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Some(i);
        }
    }
    None
}

/// A lexed token. `literal` is the token's text as the parser sees it;
/// for strings that is the content between the quotes, escapes untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: TextRange) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
