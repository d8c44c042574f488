//! netdraw command-line interface.
//!
pub mod options;
pub mod pipeline;

use std::path::PathBuf;

use netdraw_core::{DEFAULT_MAX_OUTPUTS, GraphDefaults, OutputOptions, RankDir, Result};
use netdraw_dot::{OutputFormat, RenderBackend};

pub use options::Cli;
pub use pipeline::draw;

/// Options for running netdraw.
#[derive(Debug, Clone)]
pub struct NetdrawOptions {
    pub model: PathBuf,
    pub output: PathBuf,
    pub max_outputs: usize,
    pub horizontal: bool,
}

impl NetdrawOptions {
    pub fn new(model: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            output: PathBuf::from("model_graph.pdf"),
            max_outputs: DEFAULT_MAX_OUTPUTS,
            horizontal: false,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_max_outputs(mut self, max_outputs: usize) -> Self {
        self.max_outputs = max_outputs;
        self
    }

    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn graph_defaults(&self) -> GraphDefaults {
        GraphDefaults::default().with_rankdir(RankDir::horizontal(self.horizontal))
    }

    pub fn output_options(&self) -> OutputOptions {
        OutputOptions::new().with_max_outputs(self.max_outputs)
    }
}

impl From<Cli> for NetdrawOptions {
    fn from(cli: Cli) -> Self {
        NetdrawOptions::new(cli.model)
            .with_output(cli.output)
            .with_max_outputs(cli.max_out_nodes)
            .with_horizontal(cli.horizontal)
    }
}

/// Main entry point
pub fn run_main(opts: &NetdrawOptions, backend: &dyn RenderBackend) -> Result<OutputFormat> {
    draw(opts, backend)
}
