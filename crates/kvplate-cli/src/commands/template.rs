//! Template command - turn config files into consul-template sources
//!
//! The output uses the input format, with every value replaced by a
//! `keyOrDefault` lookup that falls back to the original value.

use kvplate_codec::StandardCodec;
use kvplate_core::{KeyPath, render_templates};

use super::{ConvertArgs, describe_sources};
use crate::error::{CliError, Result};
use crate::util;

pub fn run(args: &ConvertArgs) -> Result<()> {
    let format = args.input_format()?;
    let inputs = util::read_inputs(&args.files)?;
    let trees = util::parse_inputs(&StandardCodec, format, &inputs)?;

    let prefix = KeyPath::from_prefix(&args.prefix);
    let out = render_templates(&StandardCodec, &args.format, &trees, &prefix)
        .map_err(|e| CliError::from_convert(&describe_sources(args), e))?;
    tracing::debug!(documents = trees.len(), bytes = out.len(), format = %format, "rendered templates");

    util::write_output(args.output.as_deref(), &out)
}
