//! `keyOrDefault` directives and the placeholders that carry them through
//! format serializers
//!
//! A directive ends up as `{{ keyOrDefault "<key>" "<default>" }}`. Written
//! literally into a tree, a serializer would wrap it in its own quotes and
//! escape the inner `"` and `\` a second time, so the tree holds a placeholder
//! instead:
//!
//! ```text
//! __kvo__3__kvc__
//! ```
//!
//! The number indexes the directive in its templated document. Placeholders
//! contain only identifier characters, which no supported serializer escapes,
//! so the serializer at most wraps them in quotes. [`unescape`] strips those
//! quotes and renders each directive exactly once, with JSON-escaped
//! arguments.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const OPEN_SENTINEL: &str = "__kvo__";
pub const CLOSE_SENTINEL: &str = "__kvc__";

/// A placeholder wrapped in double quotes, in single quotes, or bare
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    let bare = format!(r"{}(\d+){}", OPEN_SENTINEL, CLOSE_SENTINEL);
    Regex::new(&format!(r#""{bare}"|'{bare}'|{bare}"#, bare = bare)).expect("valid regex")
});

/// A `keyOrDefault` lookup of a flattened key with a literal fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Slash-form key in the key-value store
    pub key: String,
    /// Fallback returned when the key is absent
    pub default: String,
}

impl Directive {
    /// Build a directive from a leaf's encoded JSON text
    ///
    /// A JSON string loses its quotes (the directive argument supplies
    /// them); any other JSON text is used verbatim.
    pub fn from_encoded(key: impl Into<String>, encoded: &str) -> Self {
        let default = serde_json::from_str::<String>(encoded).unwrap_or_else(|_| encoded.to_string());
        Self {
            key: key.into(),
            default,
        }
    }

    /// Final template syntax
    pub fn render(&self) -> String {
        format!(
            "{{{{ keyOrDefault {} {} }}}}",
            quote_argument(&self.key),
            quote_argument(&self.default)
        )
    }
}

/// Serializer-safe stand-in for the directive at `index`
pub fn placeholder(index: usize) -> String {
    format!("{}{}{}", OPEN_SENTINEL, index, CLOSE_SENTINEL)
}

/// Double-quoted, JSON-escaped literal
fn quote_argument(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}

/// Turn serialized placeholders into template syntax
///
/// Rules, applied in a single left-to-right pass so rendered defaults are
/// never rescanned:
/// 1. a serializer quote (`"` or `'`) right before the open sentinel is dropped
/// 2. the matching quote right after the close sentinel is dropped
/// 3. the index between the sentinels is resolved with `lookup` and the
///    directive's arguments are written as real `"`-quoted literals
/// 4. the sentinels become `{{`/`}}`
///
/// A placeholder whose index `lookup` does not know is left untouched.
pub fn unescape<'a, F>(serialized: &str, lookup: F) -> String
where
    F: Fn(usize) -> Option<&'a Directive>,
{
    PLACEHOLDER
        .replace_all(serialized, |caps: &Captures<'_>| {
            let resolved = caps
                .iter()
                .skip(1)
                .flatten()
                .next()
                .and_then(|m| m.as_str().parse::<usize>().ok())
                .and_then(&lookup);
            match resolved {
                Some(directive) => directive.render(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
