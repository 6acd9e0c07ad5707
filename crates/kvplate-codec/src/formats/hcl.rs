use kvplate_core::Tree;
use serde_json::Value as JsonValue;

use crate::error::Result;

/// Parse an HCL body; blocks become nested maps keyed by their labels
pub fn parse(input: &str) -> Result<Tree> {
    let value: JsonValue = ::hcl::from_str(input)?;
    Ok(Tree::from(value))
}

pub fn serialize(tree: &Tree) -> Result<String> {
    Ok(::hcl::to_string(tree)?)
}
