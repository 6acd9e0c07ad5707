//! Supported document formats

use std::fmt;
use std::str::FromStr;

use crate::error::{ConvertError, Result};
use crate::tree::Tree;

/// A structured text format kvplate can read and write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Toml,
    Json,
    Yaml,
    Hcl,
    Properties,
}

impl Format {
    /// Every accepted format name, aliases included
    pub const NAMES: &'static [&'static str] = &[
        "toml",
        "json",
        "yaml",
        "yml",
        "hcl",
        "prop",
        "props",
        "properties",
    ];

    /// Resolve a format name (case-sensitive, like the names above)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "hcl" => Some(Self::Hcl),
            "prop" | "props" | "properties" => Some(Self::Properties),
            _ => None,
        }
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Hcl => "hcl",
            Self::Properties => "properties",
        }
    }

    /// `NAMES` joined for help and error messages
    pub fn names_list() -> String {
        Self::NAMES.join(", ")
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = ConvertError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ConvertError::UnsupportedFormat {
            name: s.to_string(),
            supported: Self::names_list(),
        })
    }
}

/// Parse and serialize capability for the supported formats
///
/// Implementations must produce a map at the document root from `parse` and
/// serialize a map back into the format's text.
pub trait FormatCodec {
    /// Parse document text into a tree
    fn parse(&self, format: Format, input: &str) -> Result<Tree>;

    /// Serialize a tree into document text
    fn serialize(&self, format: Format, tree: &Tree) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves() {
        for name in Format::NAMES {
            assert!(Format::from_name(name).is_some(), "{} should resolve", name);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Format::from_name("yml"), Some(Format::Yaml));
        assert_eq!(Format::from_name("props"), Some(Format::Properties));
        assert_eq!(Format::from_name("prop"), Some(Format::Properties));
        assert_eq!(Format::Yaml.to_string(), "yaml");
    }

    #[test]
    fn test_unknown_name_is_unsupported() {
        let err = "xml".parse::<Format>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported format: 'xml'. Available options are: toml, json, yaml, yml, hcl, prop, props, properties"
        );
        assert!(Format::from_name("JSON").is_none());
    }
}
