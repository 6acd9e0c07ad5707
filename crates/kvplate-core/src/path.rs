//! Key paths: the chain of map keys from the document root to a node
//!
//! A path renders two ways from the same segments:
//! - slash-joined (`a/b/c`) for key-value store keys
//! - dot-joined (`a.b.c`) for template addresses
//!
//! Delimiters inside keys are not escaped. A key containing `/` or `.` yields
//! an ambiguous rendering, exactly as the key-value store and the templating
//! engine would see it.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The empty path
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a user-supplied slash prefix, dropping empty segments
    ///
    /// `"svc/app/"` and `"/svc/app"` both become `[svc, app]`.
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            segments: prefix
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Path of a child node reached through `key`
    pub fn child(&self, key: &str) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(key.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Key-value store rendering
    pub fn to_slash(&self) -> String {
        self.segments.join("/")
    }

    /// Template address rendering
    pub fn to_dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_slash())
    }
}
