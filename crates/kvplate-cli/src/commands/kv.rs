//! KV command - flatten config files into a Consul KV import

use kvplate_codec::StandardCodec;
use kvplate_core::{KeyPath, flatten_documents, render_kv_json};

use super::{ConvertArgs, describe_sources};
use crate::error::{CliError, Result};
use crate::util;

pub fn run(args: &ConvertArgs) -> Result<()> {
    let format = args.input_format()?;
    let inputs = util::read_inputs(&args.files)?;
    let trees = util::parse_inputs(&StandardCodec, format, &inputs)?;

    let prefix = KeyPath::from_prefix(&args.prefix);
    let pairs = flatten_documents(&trees, &prefix)
        .map_err(|e| CliError::from_convert(&describe_sources(args), e))?;
    tracing::debug!(documents = trees.len(), pairs = pairs.len(), "flattened input");

    let json = render_kv_json(&pairs).map_err(|e| CliError::internal(format!("error marshalling output: {}", e)))?;
    util::write_output(args.output.as_deref(), &json)
}
