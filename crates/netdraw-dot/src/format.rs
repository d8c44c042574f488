//! Output format inferred from the output path.

use std::fmt;
use std::path::Path;

use netdraw_error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// `.dot` / `.gv`: the DOT source itself, no layout pass.
    Dot,
    /// Any other extension, handed to the backend as its format name.
    Image(String),
}

impl OutputFormat {
    /// Infer the format from the path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .ok_or_else(|| {
                Error::unsupported("output path has no file extension to infer the format from")
                    .with_operation("format::from_path")
                    .with_context("path", path.display().to_string())
            })?;

        let extension = extension.to_ascii_lowercase();
        Ok(match extension.as_str() {
            "dot" | "gv" => OutputFormat::Dot,
            _ => OutputFormat::Image(extension),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Image(name) => name,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
