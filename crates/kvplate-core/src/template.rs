//! Building consul-template documents from a tree
//!
//! The templater never mutates its input: it returns a new tree with the same
//! map keys at every level where each leaf is replaced by a directive
//! placeholder (see [`crate::directive`]). Placeholder `n` stands for the
//! `n`-th entry of [`TemplatedDocument::leaves`].

use crate::directive::{Directive, placeholder, unescape};
use crate::encode::encode_leaf;
use crate::error::{ConvertError, Result};
use crate::path::KeyPath;
use crate::tree::{Mapping, Tree};

/// A leaf replaced by a directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatedLeaf {
    /// Dotted address of the leaf in the source document
    pub address: String,
    /// Key-value store key referenced by the directive
    pub key: String,
    pub directive: Directive,
}

/// Result of templating one document
#[derive(Debug, Clone, PartialEq)]
pub struct TemplatedDocument {
    pub tree: Tree,
    /// Leaves in traversal order
    pub leaves: Vec<TemplatedLeaf>,
}

impl TemplatedDocument {
    /// Replace the placeholders in text serialized from `self.tree`
    pub fn resolve(&self, serialized: &str) -> String {
        unescape(serialized, |index| self.leaves.get(index).map(|leaf| &leaf.directive))
    }
}

/// Replace every leaf of `tree` with a `keyOrDefault` directive
///
/// `path_prefix` is prepended to directive keys; `address_prefix` to leaf
/// addresses.
pub fn templatize(tree: &Tree, path_prefix: &KeyPath, address_prefix: &KeyPath) -> Result<Tree> {
    templatize_document(tree, path_prefix, address_prefix).map(|doc| doc.tree)
}

/// Same as [`templatize`], also reporting every templated leaf
pub fn templatize_document(
    tree: &Tree,
    path_prefix: &KeyPath,
    address_prefix: &KeyPath,
) -> Result<TemplatedDocument> {
    let mut leaves = Vec::new();
    let tree = visit(tree, path_prefix, address_prefix, &mut leaves)?;
    Ok(TemplatedDocument { tree, leaves })
}

fn visit(
    node: &Tree,
    path: &KeyPath,
    address: &KeyPath,
    leaves: &mut Vec<TemplatedLeaf>,
) -> Result<Tree> {
    match node {
        Tree::Map(mapping) => {
            let entries = mapping
                .sorted_entries()
                .map_err(|key| ConvertError::MalformedTree {
                    path: path.to_slash(),
                    key: key.describe(),
                })?;

            let mut templated = Mapping::new();
            for (key, child) in entries {
                let value = visit(child, &path.child(key), &address.child(key), leaves)?;
                templated.insert(key, value);
            }
            Ok(Tree::Map(templated))
        }
        leaf => {
            let encoded = encode_leaf(leaf, path)?;
            let directive = Directive::from_encoded(path.to_slash(), &encoded);
            let stand_in = placeholder(leaves.len());

            tracing::trace!(address = %address.to_dotted(), key = %directive.key, "templated leaf");
            leaves.push(TemplatedLeaf {
                address: address.to_dotted(),
                key: directive.key.clone(),
                directive,
            });
            Ok(Tree::String(stand_in))
        }
    }
}
