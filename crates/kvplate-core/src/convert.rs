//! Multi-document conversions
//!
//! Documents are processed strictly in input order and every conversion is
//! all-or-nothing: the first error aborts the whole run.

use crate::error::Result;
use crate::flatten::{KvPair, flatten};
use crate::format::{Format, FormatCodec};
use crate::path::KeyPath;
use crate::template::templatize_document;
use crate::tree::Tree;

/// Flatten each document under `prefix` and concatenate the pairs
pub fn flatten_documents(trees: &[Tree], prefix: &KeyPath) -> Result<Vec<KvPair>> {
    let mut pairs = Vec::new();
    for (index, tree) in trees.iter().enumerate() {
        let doc_pairs = flatten(tree, prefix)?;
        tracing::debug!(document = index, pairs = doc_pairs.len(), "flattened document");
        pairs.extend(doc_pairs);
    }
    Ok(pairs)
}

/// Pretty-printed JSON array of pairs, two-space indented
pub fn render_kv_json(pairs: &[KvPair]) -> Result<String> {
    Ok(serde_json::to_string_pretty(pairs)?)
}

/// Templatize each document, serialize it as `format_name` and concatenate
///
/// Placeholders are resolved per document, right after that document is
/// serialized. An unrecognized format name yields an empty string rather than
/// an error.
pub fn render_templates(
    codec: &dyn FormatCodec,
    format_name: &str,
    trees: &[Tree],
    prefix: &KeyPath,
) -> Result<String> {
    let Some(format) = Format::from_name(format_name) else {
        tracing::warn!(format = format_name, "no serializer for output format, producing empty output");
        return Ok(String::new());
    };

    let mut out = String::new();
    for (index, tree) in trees.iter().enumerate() {
        let doc = templatize_document(tree, prefix, &KeyPath::root())?;
        let text = codec.serialize(format, &doc.tree)?;
        tracing::debug!(document = index, format = %format, leaves = doc.leaves.len(), "serialized template");
        out.push_str(&doc.resolve(&text));
    }

    Ok(out)
}
