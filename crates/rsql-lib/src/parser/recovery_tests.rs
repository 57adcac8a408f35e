use crate::Error;
use crate::diagnostics::DiagnosticKind;

use super::{Parser, parse};

/// Every diagnostic on its own line, in report order.
fn diagnostics(input: &str) -> String {
    let (_, diagnostics) = parse(input).expect("within recursion limit");
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn errors(input: &str) -> Vec<String> {
    let mut parser = Parser::new(input);
    parser.parse_program();
    parser.errors()
}

#[test]
fn missing_right_operand() {
    insta::assert_snapshot!(diagnostics("foo=="), @"error at 5..5: expected an expression, found end of input");
}

#[test]
fn unexpected_closing_paren() {
    insta::assert_snapshot!(diagnostics("foo==)"), @"error at 5..6: expected an expression, found `)`");
}

#[test]
fn unclosed_group() {
    insta::assert_snapshot!(
        diagnostics("(foo==1"),
        @"error at 7..7: missing closing `)`, found end of input (related: group opened here at 0..1)"
    );
}

#[test]
fn unclosed_group_before_other_token() {
    insta::assert_snapshot!(diagnostics("(a==1 b==2)"), @r"
    error at 6..7: missing closing `)`, found `b` (related: group opened here at 0..1)
    error at 10..11: expected an expression, found `)`
    ");
}

#[test]
fn unclosed_array() {
    insta::assert_snapshot!(
        diagnostics("foo==[1,2"),
        @"error at 9..9: missing closing `]`, found end of input (related: array opened here at 5..6)"
    );
}

#[test]
fn unclosed_alpha_operator_suggests_eq() {
    insta::assert_snapshot!(
        diagnostics("family_name=LUNDY"),
        @"error at 11..17: unrecognized input `=LUNDY` (fix: use `==` for equality)"
    );
}

#[test]
fn bare_equal_suggests_eq() {
    insta::assert_snapshot!(diagnostics("foo=1"), @r"
    error at 3..4: expected an expression, found `=` (fix: use `==` for equality)
    warning at 4..5: adjacent expressions are combined with AND; separate them with `;`
    ");
}

#[test]
fn bang_alone_is_not_an_operator() {
    insta::assert_snapshot!(diagnostics("foo!1"), @r"
    error at 3..4: expected an expression, found `!`
    warning at 4..5: adjacent expressions are combined with AND; separate them with `;`
    ");
}

#[test]
fn integer_out_of_range() {
    assert_eq!(
        errors("a==99999999999999999999"),
        vec!["could not parse `99999999999999999999` as integer"]
    );
}

#[test]
fn malformed_float() {
    assert_eq!(
        errors("a==1.2.3"),
        vec!["could not parse `1.2.3` as float"]
    );
}

#[test]
fn control_character() {
    let (_, diagnostics) = parse("a==\u{7}").unwrap();

    let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, vec![DiagnosticKind::IllegalToken]);
}

#[test]
fn collects_several_errors() {
    assert_eq!(
        errors("a==;b==)"),
        vec![
            "expected an expression, found `;`",
            "expected an expression, found `)`",
        ]
    );
}

#[test]
fn resumes_after_error() {
    let mut parser = Parser::new("a==) b==2");
    let program = parser.parse_program();

    assert_eq!(parser.errors(), vec!["expected an expression, found `)`"]);
    assert_eq!(program.to_string(), "(b==2)");
}

#[test]
fn stray_closing_bracket() {
    let mut parser = Parser::new("a==1 ]");
    let program = parser.parse_program();

    assert_eq!(program.statements.len(), 1);
    assert_eq!(parser.errors(), vec!["expected an expression, found `]`"]);
}

#[test]
fn warnings_are_not_errors() {
    let (_, diagnostics) = parse("a==1 b==2").unwrap();

    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(errors("a==1 b==2").is_empty());
}

#[test]
fn recursion_limit_is_fatal() {
    let result = Parser::new("((((a==1))))")
        .with_recursion_fuel(Some(3))
        .parse();

    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));
}

#[test]
fn recursion_limit_allows_shallow_input() {
    let result = Parser::new("((((a==1))))")
        .with_recursion_fuel(Some(16))
        .parse();

    let (program, diagnostics) = result.unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(program.to_string(), "(a==1)");
}

#[test]
fn default_recursion_limit() {
    let deep = format!("{}a==1{}", "(".repeat(300), ")".repeat(300));

    assert!(matches!(parse(&deep), Err(Error::RecursionLimitExceeded)));

    let unlimited = Parser::new(&deep).with_recursion_fuel(None).parse();
    assert!(unlimited.is_ok());
}

#[test]
fn fatal_error_is_listed_last() {
    let mut parser = Parser::new("a==) ((((b==1))))").with_recursion_fuel(Some(2));
    parser.parse_program();

    assert_eq!(
        parser.errors(),
        vec!["expected an expression, found `)`", "recursion limit exceeded"]
    );
}

#[test]
fn rendered_diagnostics_point_at_source() {
    let input = "(foo==1";
    let (_, diagnostics) = parse(input).unwrap();

    let rendered = diagnostics.render(input);
    assert!(rendered.contains("missing closing `)`"), "{rendered}");
    assert!(rendered.contains("group opened here"), "{rendered}");
    assert!(rendered.contains("(foo==1"), "{rendered}");
}
