use kvplate_core::Tree;
use serde_json::Value as JsonValue;

use crate::error::Result;

pub fn parse(input: &str) -> Result<Tree> {
    let value: JsonValue = serde_json::from_str(input)?;
    Ok(Tree::from(value))
}

/// Two-space indented, no trailing newline
pub fn serialize(tree: &Tree) -> Result<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let tree = parse(r#"{"server": {"port": 8080, "tags": ["a"]}, "debug": false}"#).unwrap();
        assert_eq!(tree.get("server.port"), Some(&Tree::from(8080_i64)));
        assert_eq!(tree.get("debug"), Some(&Tree::from(false)));
    }

    #[test]
    fn test_serialize_json_is_indented() {
        let tree = parse(r#"{"b": "2", "a": {"c": "1"}}"#).unwrap();
        assert_eq!(
            serialize(&tree).unwrap(),
            "{\n  \"a\": {\n    \"c\": \"1\"\n  },\n  \"b\": \"2\"\n}"
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(parse("{ not json").is_err());
    }
}
