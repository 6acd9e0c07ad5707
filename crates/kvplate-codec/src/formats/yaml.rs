use kvplate_core::{Number, Tree};
use serde_yaml::Value as YamlValue;

use crate::error::Result;

/// Parse YAML, resolving `<<` merge keys
///
/// Tags are dropped and the tagged value kept. Non-string mapping keys are
/// preserved; they are rejected later by the flattener and templater.
pub fn parse(input: &str) -> Result<Tree> {
    let mut value: YamlValue = serde_yaml::from_str(input)?;
    value.apply_merge()?;

    Ok(match value {
        YamlValue::Null => Tree::empty_map(),
        other => tree_from_yaml(other),
    })
}

pub fn serialize(tree: &Tree) -> Result<String> {
    Ok(serde_yaml::to_string(tree)?)
}

fn tree_from_yaml(value: YamlValue) -> Tree {
    match value {
        YamlValue::Null => Tree::Null,
        YamlValue::Bool(b) => Tree::Bool(b),
        YamlValue::Number(n) => Tree::Number(if let Some(i) = n.as_i64() {
            Number::Int(i)
        } else if let Some(u) = n.as_u64() {
            Number::UInt(u)
        } else {
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }),
        YamlValue::String(s) => Tree::String(s),
        YamlValue::Sequence(items) => Tree::List(items.into_iter().map(tree_from_yaml).collect()),
        YamlValue::Mapping(mapping) => Tree::Map(
            mapping
                .into_iter()
                .map(|(k, v)| (tree_from_yaml(k), tree_from_yaml(v)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => tree_from_yaml(tagged.value),
    }
}
