//! Rendering backends that lay out DOT source into an image file.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use netdraw_error::{Error, Result};

/// Lays out DOT source and writes it to `path` in `format`.
pub trait RenderBackend {
    fn name(&self) -> &str;

    fn render(&self, dot: &str, format: &str, path: &Path) -> Result<()>;
}

/// Graphviz `dot`, fed through stdin.
#[derive(Debug, Clone)]
pub struct GraphvizBackend {
    program: String,
}

impl Default for GraphvizBackend {
    fn default() -> Self {
        Self {
            program: "dot".to_string(),
        }
    }
}

impl GraphvizBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl RenderBackend for GraphvizBackend {
    fn name(&self) -> &str {
        &self.program
    }

    fn render(&self, dot: &str, format: &str, path: &Path) -> Result<()> {
        debug!(program = %self.program, format, path = %path.display(), "spawning graphviz");
        let mut child = Command::new(&self.program)
            .arg(format!("-T{}", format))
            .arg("-o")
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                Error::backend_unavailable(self.program.clone())
                    .with_operation("graphviz::render")
                    .with_context(
                        "hint",
                        "install Graphviz (apt install graphviz, brew install graphviz) \
                         or write a .dot file instead",
                    )
                    .set_source(err)
            })?;

        // Graphviz closes stdin early when it rejects its arguments; the exit
        // status and stderr below say why.
        let written = match child.stdin.take() {
            Some(mut stdin) => match stdin.write_all(dot.as_bytes()) {
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                    debug!(program = %self.program, "graphviz closed stdin early");
                    Ok(())
                }
                other => other,
            },
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|err| Error::from(err).with_operation("graphviz::render"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::render_failed(stderr.trim().to_string())
                .with_operation("graphviz::render")
                .with_context("format", format)
                .with_context("status", output.status.to_string()));
        }
        written.map_err(|err| Error::from(err).with_operation("graphviz::render"))?;

        info!(path = %path.display(), format, "graph rendered");
        Ok(())
    }
}
