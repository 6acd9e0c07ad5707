//! kvplate Codec - format adapters for kvplate
//!
//! [`StandardCodec`] implements [`FormatCodec`] for every [`Format`]:
//!
//! | Format       | Library      | Notes                                   |
//! |--------------|--------------|-----------------------------------------|
//! | `toml`       | `toml`       | datetimes become strings                |
//! | `json`       | `serde_json` | written with two-space indentation      |
//! | `yaml`/`yml` | `serde_yaml` | merge keys resolved, tags dropped       |
//! | `hcl`        | `hcl-rs`     | blocks become nested maps               |
//! | `prop`/`props`/`properties` | built in | dotted keys nest into maps |
//!
//! Blank input parses to an empty map in every format. A document whose root
//! is not a map is rejected.

pub mod error;
pub mod formats;

pub use error::{CodecError, Result};

use kvplate_core::{Format, FormatCodec, Tree};

/// The codec used by the kvplate CLI
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCodec;

impl StandardCodec {
    pub fn new() -> Self {
        Self
    }

    fn parse_raw(format: Format, input: &str) -> Result<Tree> {
        match format {
            Format::Toml => formats::toml::parse(input),
            Format::Json => formats::json::parse(input),
            Format::Yaml => formats::yaml::parse(input),
            Format::Hcl => formats::hcl::parse(input),
            Format::Properties => formats::properties::parse(input),
        }
    }

    fn serialize_raw(format: Format, tree: &Tree) -> Result<String> {
        match format {
            Format::Toml => formats::toml::serialize(tree),
            Format::Json => formats::json::serialize(tree),
            Format::Yaml => formats::yaml::serialize(tree),
            Format::Hcl => formats::hcl::serialize(tree),
            Format::Properties => formats::properties::serialize(tree),
        }
    }
}

impl FormatCodec for StandardCodec {
    fn parse(&self, format: Format, input: &str) -> kvplate_core::Result<Tree> {
        if input.trim().is_empty() {
            tracing::debug!(format = %format, "blank input, using empty document");
            return Ok(Tree::empty_map());
        }

        let tree = Self::parse_raw(format, input).map_err(|e| e.into_convert_error(format))?;
        if !tree.is_map() {
            return Err(CodecError::RootNotMap {
                found: tree.describe(),
            }
            .into_convert_error(format));
        }

        tracing::debug!(
            format = %format,
            keys = tree.as_map().map_or(0, |m| m.len()),
            "parsed document"
        );
        Ok(tree)
    }

    fn serialize(&self, format: Format, tree: &Tree) -> kvplate_core::Result<String> {
        Self::serialize_raw(format, tree).map_err(|e| e.into_convert_error(format))
    }
}
