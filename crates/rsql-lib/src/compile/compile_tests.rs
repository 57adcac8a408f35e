use rsql_core::{ColumnMap, Predicate, Value};

use super::{CompileError, Compiler, compile};
use crate::parser::{Program, parse};

#[track_caller]
fn program(input: &str) -> Program {
    let (program, diagnostics) = parse(input).expect("within recursion limit");
    assert!(
        !diagnostics.has_errors(),
        "syntax errors in {input:?}: {:?}",
        diagnostics.error_messages()
    );
    program
}

#[track_caller]
fn lower(input: &str, columns: &[&str]) -> Result<Option<Predicate>, CompileError> {
    compile(&program(input), &ColumnMap::from_columns(columns.iter().copied()))
}

/// Functional form of a query that must compile to something.
#[track_caller]
fn lowered(input: &str, columns: &[&str]) -> String {
    match lower(input, columns) {
        Ok(Some(predicate)) => predicate.to_string(),
        Ok(None) => panic!("no predicate for {input:?}"),
        Err(err) => panic!("compile error for {input:?}: {err}"),
    }
}

#[track_caller]
fn lower_err(input: &str, columns: &[&str]) -> CompileError {
    match lower(input, columns) {
        Err(err) => err,
        Ok(predicate) => panic!("expected error for {input:?}, got {predicate:?}"),
    }
}

#[test]
fn equality_with_array() {
    let predicate = lower("foo==[1,2,3]", &["foo"]).unwrap().unwrap();

    assert_eq!(
        predicate,
        Predicate::Eq("foo".into(), Value::List(vec![1i64.into(), 2i64.into(), 3i64.into()]))
    );
    insta::assert_snapshot!(predicate.to_string(), @"Eq(foo, [1, 2, 3])");
}

#[test]
fn grouped_and_inside_or() {
    insta::assert_snapshot!(
        lowered("foo==1,(bar==2;baz==3)", &["foo", "bar", "baz"]),
        @"Or(Eq(foo, 1), And(Eq(bar, 2), Eq(baz, 3)))"
    );
}

#[test]
fn every_comparison_operator() {
    let cases = [
        ("a==1", "Eq(a, 1)"),
        ("a=eq=1", "Eq(a, 1)"),
        ("a!=1", "NotEq(a, 1)"),
        ("a=neq=1", "NotEq(a, 1)"),
        ("a<1", "Lt(a, 1)"),
        ("a=lt=1", "Lt(a, 1)"),
        ("a<=1", "LtOrEq(a, 1)"),
        ("a=le=1", "LtOrEq(a, 1)"),
        ("a>1", "Gt(a, 1)"),
        ("a=gt=1", "Gt(a, 1)"),
        ("a>=1", "GtOrEq(a, 1)"),
        ("a=ge=1", "GtOrEq(a, 1)"),
    ];

    for (input, expected) in cases {
        assert_eq!(lowered(input, &["a"]), expected, "{input}");
    }
}

#[test]
fn scalar_values() {
    insta::assert_snapshot!(
        lowered("a==x;a=='quoted text';a==2.5;a==true;a==false;a==null", &["a"]),
        @r#"And(Eq(a, "x"), Eq(a, "quoted text"), Eq(a, 2.5), Eq(a, true), Eq(a, false), Eq(a, null))"#
    );
}

#[test]
fn negative_values() {
    insta::assert_snapshot!(
        lowered("a==-5;a<=-1.0;a==-abc", &["a"]),
        @r#"And(Eq(a, -5), LtOrEq(a, -1.0), Eq(a, "-abc"))"#
    );
}

#[test]
fn unknown_column() {
    let err = lower_err("unknown==1", &["foo"]);

    assert_eq!(err, CompileError::UnknownColumn("unknown".to_string()));
    assert_eq!(err.to_string(), "unknown column `unknown`");
    assert!(err.is_field_error());
    assert!(!err.is_value_error());
}

#[test]
fn unknown_column_deep_in_tree() {
    let err = lower_err("foo==1;(foo==2,bar==3)", &["foo"]);

    assert_eq!(err, CompileError::UnknownColumn("bar".to_string()));
}

#[test]
fn like_requires_string() {
    let err = lower_err("foo~1", &["foo"]);

    assert!(matches!(err, CompileError::TypeMismatch { .. }));
    assert!(err.is_value_error());
    insta::assert_snapshot!(err.to_string(), @"invalid value for `~`: LIKE requires a string value, found integer");
}

#[test]
fn like_rejects_array() {
    let err = lower_err("foo ~ [bar*,bin*]", &["foo"]);

    insta::assert_snapshot!(err.to_string(), @"invalid value for `~`: LIKE requires a string value, found array");
}

#[test]
fn like_translates_glob() {
    insta::assert_snapshot!(
        lowered("director~Que*Tarantino;title~'*the end*'", &["director", "title"]),
        @r#"And(Like(director, "Que%Tarantino"), Like(title, "%the end%"))"#
    );
}

#[test]
fn like_keeps_glob_when_disabled() {
    let compiler = Compiler::new().glob_wildcards(false);
    let predicate = compiler
        .compile(&program("name~a*b"), &ColumnMap::from_columns(["name"]))
        .unwrap()
        .unwrap();

    assert_eq!(predicate, Predicate::Like("name".into(), "a*b".into()));
}

#[test]
fn empty_input_compiles_to_nothing() {
    assert_eq!(lower("", &[]), Ok(None));
    assert_eq!(lower("   ", &["foo"]), Ok(None));
}

#[test]
fn and_chain_is_flattened() {
    let predicate = lower("a==1;b==2;c==3", &["a", "b", "c"]).unwrap().unwrap();

    let Predicate::And(children) = &predicate else {
        panic!("expected And, got {predicate}");
    };
    assert_eq!(children.len(), 3);
    insta::assert_snapshot!(predicate.to_string(), @"And(Eq(a, 1), Eq(b, 2), Eq(c, 3))");
}

#[test]
fn or_chain_is_flattened() {
    insta::assert_snapshot!(
        lowered("a==1,b==2,c==3", &["a", "b", "c"]),
        @"Or(Eq(a, 1), Eq(b, 2), Eq(c, 3))"
    );
}

#[test]
fn mixed_nesting_is_preserved() {
    insta::assert_snapshot!(
        lowered("(a==1,b==2);(c==3,d==4)", &["a", "b", "c", "d"]),
        @"And(Or(Eq(a, 1), Eq(b, 2)), Or(Eq(c, 3), Eq(d, 4)))"
    );
}

#[test]
fn full_query() {
    let input = r#"director=='name\'s';actor=eq="name\'s";Year=le=2000,Year>=2010;one <= -1.0, two != true"#;

    insta::assert_snapshot!(
        lowered(input, &["director", "actor", "Year", "one", "two"]),
        @r#"And(Eq(director, "name's"), Eq(actor, "name's"), Or(LtOrEq(Year, 2000), GtOrEq(Year, 2010)), Or(LtOrEq(one, -1.0), NotEq(two, true)))"#
    );
}

#[test]
fn arrays_and_like_together() {
    let input = "genres==[sci-fi,action] ; genres==[romance,animated,horror] , director~Que*Tarantino";

    insta::assert_snapshot!(
        lowered(input, &["genres", "director"]),
        @r#"And(Eq(genres, ["sci-fi", "action"]), Or(Eq(genres, ["romance", "animated", "horror"]), Like(director, "Que%Tarantino")))"#
    );
}

#[test]
fn adjacent_statements_are_conjoined() {
    let (program, diagnostics) = parse("a==1 b==2").unwrap();
    assert!(diagnostics.has_warnings());

    let predicate = compile(&program, &ColumnMap::from_columns(["a", "b"]))
        .unwrap()
        .unwrap();
    insta::assert_snapshot!(predicate.to_string(), @"And(Eq(a, 1), Eq(b, 2))");
}

#[test]
fn columns_are_resolved_through_the_map() {
    let columns = ColumnMap::new()
        .with("Year", "release_year")
        .with("family", "family_name");
    let predicate = compile(&program("Year>=2000;family==lundy"), &columns)
        .unwrap()
        .unwrap();

    assert_eq!(predicate.columns(), vec!["release_year", "family_name"]);
}

#[test]
fn closure_resolver() {
    let resolver = |field: &str| Some(format!("t.{}", field.to_lowercase()));
    let predicate = compile(&program("Name==x"), &resolver).unwrap().unwrap();

    assert_eq!(predicate, Predicate::Eq("t.name".into(), "x".into()));
}

#[test]
fn predicate_in_value_position() {
    insta::assert_snapshot!(
        lowered("foo==(bar==1)", &["foo", "bar"]),
        @"Eq(foo, Eq(bar, 1))"
    );
}

#[test]
fn extension_operator_uses_registered_lowering() {
    let compiler = Compiler::new().extension("in", |column, value| match value {
        Value::List(items) => Ok(Predicate::or(
            items
                .into_iter()
                .map(|item| Predicate::Eq(column.to_string(), item)),
        )),
        other => Ok(Predicate::Eq(column.to_string(), other)),
    });
    assert!(compiler.has_extension("in"));
    assert!(!compiler.has_extension("out"));

    let predicate = compiler
        .compile(&program("tag=in=[a,b];id=in=7"), &ColumnMap::from_columns(["tag", "id"]))
        .unwrap()
        .unwrap();

    insta::assert_snapshot!(predicate.to_string(), @r#"And(Or(Eq(tag, "a"), Eq(tag, "b")), Eq(id, 7))"#);
}

#[test]
fn extension_lowering_can_reject_values() {
    let compiler = Compiler::new().extension("in", |_, value| {
        Err(CompileError::TypeMismatch {
            operator: "=in=".to_string(),
            reason: format!("expected array, found {}", value.type_name()),
        })
    });

    let err = compiler
        .compile(&program("tag=in=1"), &ColumnMap::from_columns(["tag"]))
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid value for `=in=`: expected array, found integer");
}

#[test]
fn later_extension_registration_wins() {
    let compiler = Compiler::new()
        .extension("is", |column, _| Ok(Predicate::Eq(column.to_string(), Value::Null)))
        .extension("is", |column, _| Ok(Predicate::NotEq(column.to_string(), Value::Null)));

    let predicate = compiler
        .compile(&program("tag=is=x"), &ColumnMap::from_columns(["tag"]))
        .unwrap()
        .unwrap();
    assert_eq!(predicate, Predicate::NotEq("tag".into(), Value::Null));
}

#[test]
fn unregistered_extension_is_unsupported() {
    let err = lower_err("tag=out=[a]", &["tag"]);

    assert_eq!(err, CompileError::UnsupportedOperator("=out=".to_string()));
    assert_eq!(err.to_string(), "unsupported operator `=out=`");
}

#[test]
fn unknown_column_reported_before_unsupported_operator() {
    let err = lower_err("nope=out=1", &["tag"]);

    assert_eq!(err, CompileError::UnknownColumn("nope".to_string()));
}

#[test]
fn bare_value_is_not_a_filter() {
    let err = lower_err("foo", &["foo"]);

    assert_eq!(err, CompileError::NotAFilter("foo".to_string()));
    assert_eq!(err.to_string(), "`foo` is not a filter expression");
}

#[test]
fn logical_operand_must_be_a_filter() {
    let err = lower_err("a==1;[1,2]", &["a"]);

    assert_eq!(err, CompileError::NotAFilter("[1,2]".to_string()));
}

#[test]
fn left_side_must_be_a_field() {
    let err = lower_err("1==1", &[]);

    insta::assert_snapshot!(err.to_string(), @"invalid value for `==`: left side must be a field name, found `1`");
}

#[test]
fn nested_array_is_rejected() {
    let err = lower_err("a==[1,[2]]", &["a"]);

    insta::assert_snapshot!(err.to_string(), @"invalid value for `==`: array elements must be scalars, found `[2]`");
}

#[test]
fn compiler_debug_lists_extensions() {
    let compiler = Compiler::new()
        .extension("out", |c, v| Ok(Predicate::NotEq(c.to_string(), v)))
        .extension("in", |c, v| Ok(Predicate::Eq(c.to_string(), v)));

    insta::assert_snapshot!(
        format!("{compiler:?}"),
        @r#"Compiler { extensions: ["in", "out"], glob_wildcards: true }"#
    );
}

#[test]
fn long_or_chain_under_and() {
    let input = format!("{}a==1;b==2", "a==1,".repeat(10_000));

    let Some(Predicate::And(children)) = lower(&input, &["a", "b"]).unwrap() else {
        panic!("expected a conjunction");
    };

    assert_eq!(children.len(), 2);
    let Predicate::Or(alternatives) = &children[0] else {
        panic!("expected a disjunction, got {}", children[0]);
    };
    assert_eq!(alternatives.len(), 10_001);
    assert_eq!(children[1], Predicate::Eq("b".into(), 2i64.into()));
}

#[test]
fn long_chain_reports_first_bad_operand() {
    let input = format!("{}nope==1{}", "a==1;".repeat(5_000), ";zap==2".repeat(5_000));

    let err = lower_err(&input, &["a"]);

    assert_eq!(err, CompileError::UnknownColumn("nope".to_string()));
}

#[test]
fn long_comparison_chain_is_rejected() {
    let input = format!("a{}", "==1".repeat(10_000));

    let err = lower_err(&input, &["a"]);

    assert!(err.is_value_error(), "{err}");
}
