use kvplate_core::{Mapping, Number, Tree};

use crate::error::Result;

/// Parse a TOML document; datetimes become their RFC 3339 strings
pub fn parse(input: &str) -> Result<Tree> {
    let table: ::toml::Table = ::toml::from_str(input)?;
    Ok(tree_from_table(table))
}

pub fn serialize(tree: &Tree) -> Result<String> {
    Ok(::toml::to_string(tree)?)
}

fn tree_from_table(table: ::toml::Table) -> Tree {
    let mut mapping = Mapping::new();
    for (key, value) in table {
        mapping.insert(key, tree_from_toml(value));
    }
    Tree::Map(mapping)
}

fn tree_from_toml(value: ::toml::Value) -> Tree {
    use ::toml::Value;

    match value {
        Value::String(s) => Tree::String(s),
        Value::Integer(i) => Tree::Number(Number::Int(i)),
        Value::Float(f) => Tree::Number(Number::Float(f)),
        Value::Boolean(b) => Tree::Bool(b),
        Value::Datetime(dt) => Tree::String(dt.to_string()),
        Value::Array(items) => Tree::List(items.into_iter().map(tree_from_toml).collect()),
        Value::Table(table) => tree_from_table(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let tree = parse(
            r#"
title = "demo"

[database]
port = 5432
enabled = true
ratio = 0.75

[[servers]]
name = "alpha"
"#,
        )
        .unwrap();

        assert_eq!(tree.get("title"), Some(&Tree::from("demo")));
        assert_eq!(tree.get("database.port"), Some(&Tree::from(5432_i64)));
        assert_eq!(tree.get("database.enabled"), Some(&Tree::from(true)));
        assert_eq!(tree.get("database.ratio"), Some(&Tree::from(0.75)));
        assert!(matches!(tree.get("servers"), Some(Tree::List(items)) if items.len() == 1));
    }

    #[test]
    fn test_parse_toml_datetime_as_string() {
        let tree = parse("released = 1979-05-27T07:32:00Z\n").unwrap();
        assert_eq!(tree.get("released"), Some(&Tree::from("1979-05-27T07:32:00Z")));
    }

    #[test]
    fn test_serialize_toml_tables() {
        let tree = parse("name = \"x\"\n[a]\nb = \"y\"\n").unwrap();
        let text = serialize(&tree).unwrap();

        assert!(text.contains("name = \"x\""));
        assert!(text.contains("[a]"));
        assert!(text.contains("b = \"y\""));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(parse("a = ").is_err());
    }
}
