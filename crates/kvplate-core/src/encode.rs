//! Type-preserving leaf encoding
//!
//! Leaves are rendered as compact JSON so a consumer can recover the original
//! type: strings stay quoted, numbers/booleans/null stay literal, lists and
//! nested maps become JSON arrays and objects. `&`, `<` and `>` are written
//! as-is (serde_json never HTML-escapes).

use base64::Engine as _;

use crate::error::{ConvertError, Result};
use crate::path::KeyPath;
use crate::tree::Tree;

/// Encode a leaf as JSON text
///
/// Fails for values JSON cannot represent: non-finite floats and maps with
/// non-string keys nested inside a list.
pub fn encode_leaf(leaf: &Tree, path: &KeyPath) -> Result<String> {
    check_encodable(leaf).map_err(|message| ConvertError::EncodingFailure {
        path: path.to_slash(),
        message,
    })?;

    let text = serde_json::to_string(leaf).map_err(|e| ConvertError::EncodingFailure {
        path: path.to_slash(),
        message: e.to_string(),
    })?;

    Ok(text.strip_suffix('\n').map(str::to_string).unwrap_or(text))
}

/// Standard base64 (padded) of the encoded text
pub fn encode_base64(text: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(text.as_bytes())
}

/// Decode a base64 value back to its JSON text
pub fn decode_base64(value: &str) -> Option<String> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(value).ok()?;
    String::from_utf8(bytes).ok()
}

fn check_encodable(node: &Tree) -> std::result::Result<(), String> {
    match node {
        Tree::Number(n) if !n.is_finite() => Err(format!("unsupported value: {}", n)),
        Tree::List(items) => items.iter().try_for_each(check_encodable),
        Tree::Map(mapping) => {
            for (k, v) in mapping.iter() {
                if k.as_str().is_none() {
                    return Err(format!("map key {} is not a string", k.describe()));
                }
                check_encodable(v)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Mapping, Number};
    use serde_json::json;

    fn at() -> KeyPath {
        KeyPath::from_prefix("a/b")
    }

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode_leaf(&Tree::from(1_i64), &at()).unwrap(), "1");
        assert_eq!(encode_leaf(&Tree::from(1.5), &at()).unwrap(), "1.5");
        assert_eq!(encode_leaf(&Tree::from(true), &at()).unwrap(), "true");
        assert_eq!(encode_leaf(&Tree::Null, &at()).unwrap(), "null");
        assert_eq!(encode_leaf(&Tree::from("x"), &at()).unwrap(), r#""x""#);
    }

    #[test]
    fn test_encode_keeps_html_characters() {
        let text = encode_leaf(&Tree::from("a & <b> c"), &at()).unwrap();
        assert_eq!(text, r#""a & <b> c""#);
    }

    #[test]
    fn test_encode_escapes_quotes_and_newlines() {
        let text = encode_leaf(&Tree::from("say \"hi\"\nbye"), &at()).unwrap();
        assert_eq!(text, r#""say \"hi\"\nbye""#);
    }

    #[test]
    fn test_encode_list_of_maps() {
        let leaf = Tree::from(json!([{ "name": "a", "port": 1 }, "plain"]));
        let text = encode_leaf(&leaf, &at()).unwrap();
        assert_eq!(text, r#"[{"name":"a","port":1},"plain"]"#);
    }

    #[test]
    fn test_encode_non_finite_float_fails() {
        let err = encode_leaf(&Tree::Number(Number::Float(f64::INFINITY)), &at()).unwrap_err();
        match err {
            ConvertError::EncodingFailure { path, .. } => assert_eq!(path, "a/b"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_encode_non_string_key_inside_list_fails() {
        let mut inner = Mapping::new();
        inner.insert(Tree::from(7_i64), Tree::from("seven"));
        let leaf = Tree::List(vec![Tree::Map(inner)]);

        let err = encode_leaf(&leaf, &at()).unwrap_err();
        assert!(matches!(err, ConvertError::EncodingFailure { .. }));
    }

    #[test]
    fn test_base64_roundtrip_preserves_unicode() {
        let text = encode_leaf(&Tree::from("héllo ✓"), &at()).unwrap();
        let b64 = encode_base64(&text);
        assert_eq!(decode_base64(&b64).unwrap(), text);
    }

    #[test]
    fn test_base64_known_values() {
        assert_eq!(encode_base64("1"), "MQ==");
        assert_eq!(encode_base64(r#""x""#), "Ingi");
        assert!(decode_base64("not base64!").is_none());
    }
}
