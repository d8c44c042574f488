//! Graph output for netdraw.
//!
//! Turns a finished [`Graph`] into DOT source and writes it either verbatim
//! (`.dot`, `.gv`) or through a [`RenderBackend`] for every other extension.
//!
//! # Module Structure
//!
//! - [`dot`]: DOT format utilities and the [`DotBuilder`]
//! - [`render`]: graph to DOT source
//! - [`format`]: output format inference from the path
//! - [`backend`]: Graphviz process backend

pub mod backend;
pub mod dot;
pub mod format;
pub mod render;

use std::fs;
use std::path::Path;

use tracing::info;

use netdraw_core::Graph;
use netdraw_error::{Error, Result};

pub use backend::{GraphvizBackend, RenderBackend};
pub use dot::DotBuilder;
pub use format::OutputFormat;
pub use render::{rankdir_value, render_dot};

/// Write `graph` to `path`, choosing the format from the extension.
///
/// The format is resolved before anything is rendered, so an unusable path
/// fails without touching the filesystem.
pub fn write_graph(
    graph: &Graph,
    path: &Path,
    backend: &dyn RenderBackend,
) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(path)?;
    let source = render_dot(graph);

    match &format {
        OutputFormat::Dot => {
            fs::write(path, &source).map_err(|err| {
                Error::from(err)
                    .with_operation("write_graph")
                    .with_context("path", path.display().to_string())
            })?;
            info!(path = %path.display(), "dot source written");
        }
        OutputFormat::Image(name) => {
            info!(backend = backend.name(), format = %name, "rendering");
            backend
                .render(&source, name, path)
                .map_err(|e| e.with_context("path", path.display().to_string()))?;
        }
    }

    Ok(format)
}
