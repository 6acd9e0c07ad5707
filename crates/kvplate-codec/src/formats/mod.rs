//! Per-format parse/serialize adapters

pub mod hcl;
pub mod json;
pub mod properties;
pub mod toml;
pub mod yaml;
