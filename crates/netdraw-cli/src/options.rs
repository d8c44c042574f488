//! Command-line options.

use std::path::PathBuf;

use clap::Parser;

use netdraw_core::DEFAULT_MAX_OUTPUTS;

const EPILOGUE: &str = "NOTE:
Right now this only supports graph models. Sequential models have to be
converted to graph models first.";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "netdraw",
    about = "Draw a neural network model description as a graph",
    version,
    after_help = EPILOGUE
)]
pub struct Cli {
    /// Model description file (JSON, graph format)
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Output file; its extension picks the format (pdf, png, svg, dot, ...)
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = "model_graph.pdf"
    )]
    pub output: PathBuf,

    /// Outputs with more labels than this are drawn as a single node
    #[arg(
        short = 'm',
        long = "max-out-nodes",
        value_name = "N",
        default_value_t = DEFAULT_MAX_OUTPUTS
    )]
    pub max_out_nodes: usize,

    /// Lay the graph out left to right instead of top to bottom
    #[arg(short = 'z', long = "horizontal", default_value_t = false)]
    pub horizontal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["netdraw", "model.json"]).unwrap();
        assert_eq!(cli.model, PathBuf::from("model.json"));
        assert_eq!(cli.output, PathBuf::from("model_graph.pdf"));
        assert_eq!(cli.max_out_nodes, 5);
        assert!(!cli.horizontal);
    }

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from([
            "netdraw", "model.json", "-o", "g.svg", "-m", "10", "-z",
        ])
        .unwrap();
        assert_eq!(cli.output, PathBuf::from("g.svg"));
        assert_eq!(cli.max_out_nodes, 10);
        assert!(cli.horizontal);
    }

    #[test]
    fn long_flags() {
        let cli = Cli::try_parse_from([
            "netdraw",
            "--output",
            "g.png",
            "--max-out-nodes",
            "0",
            "--horizontal",
            "model.json",
        ])
        .unwrap();
        assert_eq!(cli.output, PathBuf::from("g.png"));
        assert_eq!(cli.max_out_nodes, 0);
        assert!(cli.horizontal);
    }

    #[test]
    fn model_is_required() {
        assert!(Cli::try_parse_from(["netdraw"]).is_err());
        assert!(Cli::try_parse_from(["netdraw", "m.json", "-m", "-1"]).is_err());
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }
}
