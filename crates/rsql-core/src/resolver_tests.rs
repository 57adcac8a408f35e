use crate::{ColumnMap, ColumnResolver, ResolveError};

#[test]
fn column_map_resolves_known_fields() {
    let map = ColumnMap::new()
        .with("Year", "year")
        .with("family", "family_name");

    assert_eq!(map.resolve("Year"), Ok("year".to_string()));
    assert_eq!(map.resolve("family"), Ok("family_name".to_string()));
    assert_eq!(map.len(), 2);
}

#[test]
fn column_map_rejects_unknown_fields() {
    let map = ColumnMap::from_columns(["foo", "bar"]);

    assert_eq!(
        map.resolve("unknown"),
        Err(ResolveError::NotFound("unknown".to_string()))
    );
    assert_eq!(
        map.resolve("unknown").unwrap_err().to_string(),
        "column not found: unknown"
    );
}

#[test]
fn column_map_lookup_is_case_sensitive() {
    let map = ColumnMap::from_columns(["year"]);

    assert!(map.resolve("year").is_ok());
    assert!(map.resolve("Year").is_err());
}

#[test]
fn column_map_preserves_insertion_order() {
    let map: ColumnMap = [("b", "col_b"), ("a", "col_a")].into_iter().collect();

    assert_eq!(map.columns().collect::<Vec<_>>(), vec!["col_b", "col_a"]);
    assert_eq!(map.iter().next(), Some(("b", "col_b")));
}

#[test]
fn column_map_from_json_object() {
    let map: ColumnMap = serde_json::from_str(r#"{"Year": "year", "actor": "actor"}"#).unwrap();

    assert_eq!(map.resolve("Year"), Ok("year".to_string()));
    assert_eq!(map.resolve("actor"), Ok("actor".to_string()));
    assert!(!map.is_empty());
}

#[test]
fn closure_resolver() {
    let resolver = |field: &str| field.strip_prefix("x_").map(str::to_uppercase);

    assert_eq!(resolver.resolve("x_name"), Ok("NAME".to_string()));
    assert_eq!(
        resolver.resolve("name"),
        Err(ResolveError::NotFound("name".to_string()))
    );
}
