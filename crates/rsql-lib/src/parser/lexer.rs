//! Lexer for the filter language.
//!
//! Logos does the recognition; [`Lexer::next_token`] then classifies what
//! Logos produced:
//! - numbers become `Integer` or `Float` depending on a `.`
//! - unsigned words go through the keyword table
//! - `=word=` maps to a comparison kind or `Extension`
//! - string tokens are trimmed to their content
//!
//! The lexer never fails. Input it cannot recognize becomes `Illegal`, and
//! the parser decides what to report.

use logos::Logos;
use rowan::{TextRange, TextSize};
use std::ops::Range;

use super::token::{Token, TokenKind, alpha_operator, closing_quote, keyword};

/// Longest source the lexer can address. Spans are `u32` byte offsets.
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// What Logos recognizes before classification.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
enum RawToken {
    #[regex(
        r#"[^\s\p{C}"'();,=!~<>\[\]\\0-9.\-][^\s\p{C}"'();,=!~<>\[\]\\]*"#,
        allow_greedy = true
    )]
    #[regex(
        r#"-[^\s\p{C}"'();,=!~<>\[\]\\0-9.][^\s\p{C}"'();,=!~<>\[\]\\]*"#,
        allow_greedy = true
    )]
    Word,

    /// Run of digits and dots, optionally signed.
    #[regex(r"-?[0-9.]+")]
    Number,

    #[token("\"", |lex| scan_string(lex, '"'))]
    #[token("'", |lex| scan_string(lex, '\''))]
    Str,

    /// `=word=`
    #[regex(
        r#"=[^\s\p{C}"'();,=!~<>\[\]\\0-9.][^\s\p{C}"'();,=!~<>\[\]\\]*="#,
        allow_greedy = true
    )]
    AlphaOp,

    /// `=word` with no closing `=`.
    #[regex(
        r#"=[^\s\p{C}"'();,=!~<>\[\]\\0-9.][^\s\p{C}"'();,=!~<>\[\]\\]*"#,
        allow_greedy = true
    )]
    UnclosedAlphaOp,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Equal,
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtOrEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtOrEq,
    #[token("~")]
    Like,
    #[token("!")]
    Bang,
    #[token("\\")]
    Escape,
}

fn scan_string(lex: &mut logos::Lexer<RawToken>, quote: char) -> bool {
    let body = lex.remainder();
    let len = match closing_quote(body, quote) {
        Some(end) => end + quote.len_utf8(),
        None => body.len(),
    };
    lex.bump(len);
    true
}

/// Offsets past [`MAX_SOURCE_LEN`] saturate. [`Parser::parse`](super::Parser::parse)
/// rejects such sources before their spans are used.
pub(crate) fn text_size(offset: usize) -> TextSize {
    TextSize::try_from(offset).unwrap_or(TextSize::from(u32::MAX))
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new(text_size(range.start), text_size(range.end))
}

/// Pull-based tokenizer over one query string.
///
/// After end of input every call to [`next_token`](Self::next_token) returns `Eof`.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, RawToken>,
    source: &'src str,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: RawToken::lexer(source),
            source,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn next_token(&mut self) -> Token {
        let Some(result) = self.inner.next() else {
            let end = text_size(self.source.len());
            return Token::new(TokenKind::Eof, "", TextRange::empty(end));
        };

        let text = self.inner.slice();
        let span = range_to_text_range(self.inner.span());

        match result {
            Ok(kind) => classify(kind, text, span),
            Err(()) => Token::new(TokenKind::Illegal, text, span),
        }
    }
}

fn classify(raw: RawToken, text: &str, span: TextRange) -> Token {
    let kind = match raw {
        RawToken::Word if text.starts_with('-') => TokenKind::Ident,
        RawToken::Word => keyword(text).unwrap_or(TokenKind::Ident),
        RawToken::Number if text.contains('.') => TokenKind::Float,
        RawToken::Number => TokenKind::Integer,
        RawToken::Str => return Token::new(TokenKind::Str, string_content(text), span),
        RawToken::AlphaOp => alpha_operator(&text[1..text.len() - 1]),
        RawToken::UnclosedAlphaOp => TokenKind::Illegal,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Equal => TokenKind::Equal,
        RawToken::Eq => TokenKind::Eq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtOrEq => TokenKind::LtOrEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtOrEq => TokenKind::GtOrEq,
        RawToken::Like => TokenKind::Like,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Escape => TokenKind::Escape,
    };
    Token::new(kind, text, span)
}

/// Strips the quotes from a scanned string token. Unterminated strings keep
/// everything up to end of input.
fn string_content(text: &str) -> &str {
    let mut chars = text.chars();
    let Some(quote) = chars.next() else {
        return text;
    };
    let body = chars.as_str();
    match closing_quote(body, quote) {
        Some(end) => &body[..end],
        None => body,
    }
}

/// Tokenizes a whole query, including the trailing `Eof`.
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.is(TokenKind::Eof);
        tokens.push(token);
        if done {
            break;
        }
    }
    tokens
}
