//! kvplate Core - flattening and templating of configuration trees
//!
//! This crate turns a parsed configuration document into:
//! - `KvPair`s: slash-keyed, base64 JSON values for a Consul-style KV bulk import
//! - a templated tree: the same document with every leaf replaced by a
//!   placeholder that resolves, after serialization, to a
//!   `{{ keyOrDefault "<key>" "<default>" }}` directive
//!
//! Parsing and serializing concrete formats is left to a [`FormatCodec`]
//! implementation (see the `kvplate-codec` crate).
//!
//! # Example
//!
//! ```
//! use kvplate_core::{KeyPath, Tree, flatten, templatize_document};
//! use serde_json::json;
//!
//! let tree = Tree::from(json!({ "a": { "b": 1 } }));
//!
//! let pairs = flatten(&tree, &KeyPath::root()).unwrap();
//! assert_eq!(pairs[0].key, "a/b");
//!
//! let doc = templatize_document(&tree, &KeyPath::from_prefix("svc"), &KeyPath::root()).unwrap();
//! let serialized = serde_json::to_string(&doc.tree).unwrap();
//! assert_eq!(
//!     doc.resolve(&serialized),
//!     r#"{"a":{"b":{{ keyOrDefault "svc/a/b" "1" }}}}"#
//! );
//! ```

pub mod convert;
pub mod directive;
pub mod encode;
pub mod error;
pub mod flatten;
pub mod format;
pub mod path;
pub mod template;
pub mod tree;

pub use convert::{flatten_documents, render_kv_json, render_templates};
pub use directive::{Directive, placeholder, unescape};
pub use error::{ConvertError, Result};
pub use flatten::{KvPair, flatten};
pub use format::{Format, FormatCodec};
pub use path::KeyPath;
pub use template::{TemplatedDocument, TemplatedLeaf, templatize, templatize_document};
pub use tree::{Mapping, Number, Tree};
