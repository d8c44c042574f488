//! Core pipeline: load model → build graph → add outputs → write.

use std::time::Instant;

use tracing::info;

use netdraw_core::{GraphBuilder, Model, OutputAggregator, Result};
use netdraw_dot::{OutputFormat, RenderBackend, write_graph};

use crate::NetdrawOptions;

/// Draw one model.
///
/// 1. Read and parse the model document
/// 2. Build model nodes and edges
/// 3. Attach output nodes
/// 4. Write the graph (directly or through the backend)
///
/// Nothing is written unless steps 1 to 3 succeed.
pub fn draw(opts: &NetdrawOptions, backend: &dyn RenderBackend) -> Result<OutputFormat> {
    // 1. Load
    let load_start = Instant::now();
    let model = Model::from_path(&opts.model)?;
    info!(
        path = %opts.model.display(),
        nodes = model.nodes.len(),
        layers = model.layers.len(),
        outputs = model.outputs.len(),
        "Model loaded: {:.3}s",
        load_start.elapsed().as_secs_f64()
    );

    // 2. Model graph
    let build_start = Instant::now();
    let mut graph = GraphBuilder::new(&model, opts.graph_defaults()).build()?;
    info!(
        nodes = graph.len(),
        edges = graph.edges().len(),
        "Graph building: {:.3}s",
        build_start.elapsed().as_secs_f64()
    );

    // 3. Outputs
    let output_start = Instant::now();
    OutputAggregator::new(&model, opts.output_options()).extend(&mut graph)?;
    info!(
        nodes = graph.len(),
        max_outputs = opts.max_outputs,
        "Output nodes: {:.3}s",
        output_start.elapsed().as_secs_f64()
    );

    // 4. Write
    let write_start = Instant::now();
    let format = write_graph(&graph, &opts.output, backend)?;
    info!(
        path = %opts.output.display(),
        format = %format,
        "Writing: {:.3}s",
        write_start.elapsed().as_secs_f64()
    );

    Ok(format)
}
