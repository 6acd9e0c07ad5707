//! Flattening a tree into key-value store pairs

use serde::{Deserialize, Serialize};

use crate::encode::{decode_base64, encode_base64, encode_leaf};
use crate::error::{ConvertError, Result};
use crate::path::KeyPath;
use crate::tree::Tree;

/// One entry of a key-value store bulk import
///
/// `value` is base64 of the leaf's JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KvPair {
    pub flags: u64,
    pub key: String,
    pub value: String,
}

impl KvPair {
    /// JSON text carried by this pair
    pub fn decoded_value(&self) -> Option<String> {
        decode_base64(&self.value)
    }
}

/// Flatten `tree` depth-first into pairs keyed under `prefix`
///
/// Sibling keys are visited in lexicographic order, so the output is stable
/// across runs. Lists are leaves. Any error aborts the whole flattening.
pub fn flatten(tree: &Tree, prefix: &KeyPath) -> Result<Vec<KvPair>> {
    let mut pairs = Vec::new();
    visit(tree, prefix, &mut pairs)?;
    Ok(pairs)
}

fn visit(node: &Tree, path: &KeyPath, out: &mut Vec<KvPair>) -> Result<()> {
    match node {
        Tree::Map(mapping) => {
            let entries = mapping
                .sorted_entries()
                .map_err(|key| ConvertError::MalformedTree {
                    path: path.to_slash(),
                    key: key.describe(),
                })?;

            for (key, child) in entries {
                visit(child, &path.child(key), out)?;
            }
            Ok(())
        }
        leaf => {
            let text = encode_leaf(leaf, path)?;
            tracing::trace!(key = %path, value = %text, "flattened leaf");
            out.push(KvPair {
                flags: 0,
                key: path.to_slash(),
                value: encode_base64(&text),
            });
            Ok(())
        }
    }
}
