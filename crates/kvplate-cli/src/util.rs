//! Input and output plumbing shared by the commands

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use kvplate_core::{Format, FormatCodec, Tree};

use crate::error::{CliError, Result};

/// One input document
#[derive(Debug)]
pub struct Input {
    /// File path, or `<stdin>`
    pub name: String,
    pub content: String,
}

/// Read every file in order, or stdin when no file is given
///
/// All files are read before any conversion starts, so a missing file fails
/// the run without producing output.
pub fn read_inputs(files: &[PathBuf]) -> Result<Vec<Input>> {
    if files.is_empty() {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::io("error reading stdin", e))?;
        tracing::debug!(bytes = content.len(), "read stdin");
        return Ok(vec![Input {
            name: "<stdin>".to_string(),
            content,
        }]);
    }

    files
        .iter()
        .map(|path| {
            let content = fs::read_to_string(path).map_err(|e| {
                CliError::io(format!("error opening input file {}", path.display()), e)
            })?;
            tracing::debug!(file = %path.display(), bytes = content.len(), "read input file");
            Ok(Input {
                name: path.display().to_string(),
                content,
            })
        })
        .collect()
}

/// Parse every input with the given codec
pub fn parse_inputs(codec: &dyn FormatCodec, format: Format, inputs: &[Input]) -> Result<Vec<Tree>> {
    inputs
        .iter()
        .map(|input| {
            codec
                .parse(format, &input.content)
                .map_err(|e| CliError::from_convert(&input.name, e))
        })
        .collect()
}

/// Write `content` to `path` or stdout, ending with exactly one newline
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    let content = content.trim_end_matches('\n');
    match path {
        Some(path) => {
            let mut text = String::with_capacity(content.len() + 1);
            text.push_str(content);
            text.push('\n');
            fs::write(path, text)
                .map_err(|e| CliError::io(format!("error writing {}", path.display()), e))?;
            tracing::debug!(file = %path.display(), "wrote output");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content).map_err(|e| CliError::io("error writing stdout", e))?;
        }
    }
    Ok(())
}
