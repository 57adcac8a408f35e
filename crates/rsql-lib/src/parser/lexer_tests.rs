use super::lexer::{Lexer, MAX_SOURCE_LEN, lex, text_size};
use super::token::TokenKind;

/// One token per line, `EOF` left out.
fn snapshot(input: &str) -> String {
    let mut out = String::new();
    for token in lex(input) {
        if token.is(TokenKind::Eof) {
            continue;
        }
        out.push_str(&format!("{} {:?}\n", token.kind, token.literal));
    }
    out
}

fn kinds(input: &str) -> Vec<TokenKind> {
    lex(input).into_iter().map(|t| t.kind).collect()
}

#[test]
fn empty_input_is_single_eof() {
    let tokens = lex("");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert_eq!(tokens[0].literal, "");
}

#[test]
fn whitespace_only_is_single_eof() {
    assert_eq!(kinds(" \t\n\u{3000} "), vec![TokenKind::Eof]);
}

#[test]
fn eof_repeats() {
    let mut lexer = Lexer::new("a");

    assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    for _ in 0..3 {
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Eof);
        assert_eq!(u32::from(token.span.start()), 1);
    }
}

#[test]
fn single_char_punctuation() {
    use TokenKind::*;

    assert_eq!(
        kinds(r"\();,=!~<>"),
        vec![Escape, LParen, RParen, Semicolon, Comma, Equal, Bang, Like, Lt, Gt, Eof]
    );
}

#[test]
fn reserved_tokens() {
    insta::assert_snapshot!(snapshot("( ) ; , == != ~ < > <= >= [ ]"), @r#"
    LPAREN "("
    RPAREN ")"
    SEMICOLON ";"
    COMMA ","
    EQ "=="
    NEQ "!="
    LIKE "~"
    LT "<"
    GT ">"
    LE "<="
    GE ">="
    LBRACKET "["
    RBRACKET "]"
    "#);
}

#[test]
fn alpha_operators() {
    insta::assert_snapshot!(snapshot("=eq= =neq= =gt= =ge= =lt= =le= =in= =out="), @r#"
    EQ "=eq="
    NEQ "=neq="
    GT "=gt="
    GE "=ge="
    LT "=lt="
    LE "=le="
    EXTENSION "=in="
    EXTENSION "=out="
    "#);
}

#[test]
fn alpha_operator_without_closing_equal() {
    insta::assert_snapshot!(snapshot("family_name=LUNDY"), @r#"
    IDENT "family_name"
    ILLEGAL "=LUNDY"
    "#);
}

#[test]
fn equal_before_digit_is_bare_equal() {
    insta::assert_snapshot!(snapshot("a=1"), @r#"
    IDENT "a"
    EQUAL "="
    INTEGER "1"
    "#);
}

#[test]
fn numbers() {
    insta::assert_snapshot!(snapshot("1 2.5 .5 007 1.2.3 -3 -4.5"), @r#"
    INTEGER "1"
    FLOAT "2.5"
    FLOAT ".5"
    INTEGER "007"
    FLOAT "1.2.3"
    INTEGER "-3"
    FLOAT "-4.5"
    "#);
}

#[test]
fn words_and_keywords() {
    insta::assert_snapshot!(snapshot("foo -bar true -true null false x.y a-b Que*Tarantino"), @r#"
    IDENT "foo"
    IDENT "-bar"
    TRUE "true"
    IDENT "-true"
    NULL "null"
    FALSE "false"
    IDENT "x.y"
    IDENT "a-b"
    IDENT "Que*Tarantino"
    "#);
}

#[test]
fn keywords_are_case_sensitive() {
    use TokenKind::*;

    assert_eq!(kinds("True NULL"), vec![Ident, Ident, Eof]);
}

#[test]
fn non_ascii_words() {
    insta::assert_snapshot!(snapshot("名前==東京 ñame"), @r#"
    IDENT "名前"
    EQ "=="
    IDENT "東京"
    IDENT "ñame"
    "#);
}

#[test]
fn strings_keep_escapes_raw() {
    insta::assert_snapshot!(snapshot(r#"'abc' "say \"hi\"" 'name\'s' "it's""#), @r#"
    STRING "abc"
    STRING "say \\\"hi\\\""
    STRING "name\\'s"
    STRING "it's"
    "#);
}

#[test]
fn string_swallows_punctuation() {
    insta::assert_snapshot!(snapshot(r#"a=="x;y,(z)""#), @r#"
    IDENT "a"
    EQ "=="
    STRING "x;y,(z)"
    "#);
}

#[test]
fn unterminated_string_runs_to_end() {
    insta::assert_snapshot!(snapshot("a=='open ended"), @r#"
    IDENT "a"
    EQ "=="
    STRING "open ended"
    "#);
}

#[test]
fn lone_minus_is_illegal() {
    let tokens = lex("- 1");

    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert!(tokens[0].literal.starts_with('-'));
    assert!(tokens.iter().any(|t| t.is(TokenKind::Integer) && t.literal == "1"));
}

#[test]
fn control_character_is_illegal() {
    use TokenKind::*;

    assert_eq!(kinds("a\u{7}"), vec![Ident, Illegal, Eof]);
}

#[test]
fn spans_are_byte_offsets() {
    let tokens = lex("ab == 'c'");
    let spans: Vec<(u32, u32)> = tokens
        .iter()
        .map(|t| (t.span.start().into(), t.span.end().into()))
        .collect();

    assert_eq!(spans, vec![(0, 2), (3, 5), (6, 9), (9, 9)]);
}

#[test]
fn full_query() {
    let input = r#"director=='name\'s';actor=eq="name's";Year=le=2000,Year>=2010;(one <= -1.0, two != true),three=in=(1,2,3)"#;

    insta::assert_snapshot!(snapshot(input), @r#"
    IDENT "director"
    EQ "=="
    STRING "name\\'s"
    SEMICOLON ";"
    IDENT "actor"
    EQ "=eq="
    STRING "name's"
    SEMICOLON ";"
    IDENT "Year"
    LE "=le="
    INTEGER "2000"
    COMMA ","
    IDENT "Year"
    GE ">="
    INTEGER "2010"
    SEMICOLON ";"
    LPAREN "("
    IDENT "one"
    LE "<="
    FLOAT "-1.0"
    COMMA ","
    IDENT "two"
    NEQ "!="
    TRUE "true"
    RPAREN ")"
    COMMA ","
    IDENT "three"
    EXTENSION "=in="
    LPAREN "("
    INTEGER "1"
    COMMA ","
    INTEGER "2"
    COMMA ","
    INTEGER "3"
    RPAREN ")"
    "#);
}

#[test]
fn offsets_saturate_past_addressable_range() {
    assert_eq!(u32::from(text_size(7)), 7);
    assert_eq!(u32::from(text_size(MAX_SOURCE_LEN)), u32::MAX);
    assert_eq!(u32::from(text_size(usize::MAX)), u32::MAX);
}

#[test]
fn raw_kinds_are_classified() {
    assert_eq!(
        kinds("-1 2.5 =in= =le= =open"),
        [
            TokenKind::Integer,
            TokenKind::Float,
            TokenKind::Extension,
            TokenKind::LtOrEq,
            TokenKind::Illegal,
            TokenKind::Eof,
        ]
    );
}
