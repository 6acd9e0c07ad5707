//! Canonical tree: the format-agnostic representation of a parsed document

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;

/// A parsed configuration document
///
/// `Map` is the only interior node. Every other variant is a leaf, including
/// `List`, which is never traversed element-wise.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Tree {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Tree>),
    Map(Mapping),
}

/// Numeric scalar
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// False for NaN and the infinities, which have no JSON representation
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Float(f) => f.is_finite(),
            _ => true,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::UInt(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

/// Map node
///
/// Entries keep source order and keys are unique. Keys are trees rather than
/// strings because some formats (YAML) allow non-string keys; such a key makes
/// the tree malformed for flattening and templating.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: Vec<(Tree, Tree)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing the value of an equal key
    pub fn insert(&mut self, key: impl Into<Tree>, value: Tree) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by string key
    pub fn get(&self, key: &str) -> Option<&Tree> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tree> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in source order
    pub fn iter(&self) -> impl Iterator<Item = (&Tree, &Tree)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Entries sorted lexicographically by key
    ///
    /// Returns the first non-string key as the error value.
    pub fn sorted_entries(&self) -> std::result::Result<Vec<(&str, &Tree)>, &Tree> {
        let mut sorted = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match key.as_str() {
                Some(k) => sorted.push((k, value)),
                None => return Err(key),
            }
        }
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        Ok(sorted)
    }
}

impl FromIterator<(Tree, Tree)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (Tree, Tree)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl Tree {
    /// Create an empty map
    pub fn empty_map() -> Self {
        Tree::Map(Mapping::new())
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Tree::Map(_))
    }

    /// Any node that is not a map
    pub fn is_leaf(&self) -> bool {
        !self.is_map()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tree::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Tree::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get a value by dotted path (e.g., "server.port")
    pub fn get(&self, path: &str) -> Option<&Tree> {
        path.split('.')
            .try_fold(self, |node, key| node.as_map().and_then(|m| m.get(key)))
    }

    /// Short human-readable rendering used in error messages
    pub fn describe(&self) -> String {
        match self {
            Tree::Null => "null".to_string(),
            Tree::Bool(b) => b.to_string(),
            Tree::Number(n) => n.to_string(),
            Tree::String(s) => format!("{:?}", s),
            Tree::List(items) => format!("[list of {}]", items.len()),
            Tree::Map(m) => format!("{{map of {}}}", m.len()),
        }
    }
}

impl From<&str> for Tree {
    fn from(s: &str) -> Self {
        Tree::String(s.to_string())
    }
}

impl From<String> for Tree {
    fn from(s: String) -> Self {
        Tree::String(s)
    }
}

impl From<bool> for Tree {
    fn from(b: bool) -> Self {
        Tree::Bool(b)
    }
}

impl From<i64> for Tree {
    fn from(n: i64) -> Self {
        Tree::Number(Number::Int(n))
    }
}

impl From<f64> for Tree {
    fn from(n: f64) -> Self {
        Tree::Number(Number::Float(n))
    }
}

impl From<Mapping> for Tree {
    fn from(m: Mapping) -> Self {
        Tree::Map(m)
    }
}

impl From<JsonValue> for Tree {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Tree::Null,
            JsonValue::Bool(b) => Tree::Bool(b),
            JsonValue::Number(n) => Tree::Number(number_from_json(&n)),
            JsonValue::String(s) => Tree::String(s),
            JsonValue::Array(items) => Tree::List(items.into_iter().map(Tree::from).collect()),
            JsonValue::Object(map) => Tree::Map(
                map.into_iter()
                    .map(|(k, v)| (Tree::String(k), Tree::from(v)))
                    .collect(),
            ),
        }
    }
}

fn number_from_json(n: &serde_json::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Int(i)
    } else if let Some(u) = n.as_u64() {
        Number::UInt(u)
    } else {
        Number::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match *self {
            Number::Int(n) => serializer.serialize_i64(n),
            Number::UInt(n) => serializer.serialize_u64(n),
            Number::Float(n) => serializer.serialize_f64(n),
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Tree::Null => serializer.serialize_unit(),
            Tree::Bool(b) => serializer.serialize_bool(*b),
            Tree::Number(n) => n.serialize(serializer),
            Tree::String(s) => serializer.serialize_str(s),
            Tree::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Tree::Map(mapping) => mapping.serialize(serializer),
        }
    }
}

impl Serialize for Mapping {
    /// String keys are emitted in lexicographic order, any other keys after
    /// them in source order. Serializers that only accept string keys reject
    /// the latter.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut string_keyed: Vec<(&str, &Tree)> = Vec::new();
        let mut other: Vec<(&Tree, &Tree)> = Vec::new();
        for (k, v) in self.iter() {
            match k.as_str() {
                Some(s) => string_keyed.push((s, v)),
                None => other.push((k, v)),
            }
        }
        string_keyed.sort_by(|a, b| a.0.cmp(b.0));

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in string_keyed {
            map.serialize_entry(k, v)?;
        }
        for (k, v) in other {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_builds_nested_maps() {
        let tree = Tree::from(json!({
            "server": { "host": "localhost", "port": 8080 },
            "tags": ["a", "b"]
        }));

        assert_eq!(tree.get("server.host"), Some(&Tree::from("localhost")));
        assert_eq!(tree.get("server.port"), Some(&Tree::from(8080_i64)));
        assert!(matches!(tree.get("tags"), Some(Tree::List(items)) if items.len() == 2));
        assert!(tree.get("server.missing").is_none());
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut mapping = Mapping::new();
        mapping.insert("a", Tree::from(1_i64));
        mapping.insert("a", Tree::from(2_i64));

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("a"), Some(&Tree::from(2_i64)));
    }

    #[test]
    fn test_sorted_entries_orders_keys() {
        let mut mapping = Mapping::new();
        mapping.insert("zeta", Tree::Null);
        mapping.insert("alpha", Tree::Null);
        mapping.insert("mid", Tree::Null);

        let keys: Vec<&str> = mapping.sorted_entries().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_sorted_entries_reports_non_string_key() {
        let mut mapping = Mapping::new();
        mapping.insert("ok", Tree::Null);
        mapping.insert(Tree::from(1_i64), Tree::from("one"));

        let bad = mapping.sorted_entries().unwrap_err();
        assert_eq!(bad, &Tree::from(1_i64));
    }

    #[test]
    fn test_serialize_sorts_keys() {
        let tree = Tree::from(json!({ "b": 1, "a": { "d": true, "c": null } }));
        let text = serde_json::to_string(&tree).unwrap();
        assert_eq!(text, r#"{"a":{"c":null,"d":true},"b":1}"#);
    }

    #[test]
    fn test_serialize_rejects_non_string_key_in_json() {
        let mut mapping = Mapping::new();
        mapping.insert(Tree::Bool(true), Tree::from("yes"));
        assert!(serde_json::to_string(&Tree::Map(mapping)).is_err());
    }

    #[test]
    fn test_leaf_classification() {
        assert!(Tree::empty_map().is_map());
        assert!(Tree::List(vec![]).is_leaf());
        assert!(Tree::Null.is_leaf());
        assert!(!Number::Float(f64::NAN).is_finite());
        assert!(Number::UInt(u64::MAX).is_finite());
    }
}
