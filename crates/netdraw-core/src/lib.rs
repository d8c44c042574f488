//! Network model description to abstract graph.
//!
//! [`GraphBuilder`] turns every model node into a labeled graph node and
//! wires up its sources; [`OutputAggregator`] then hangs the model's named
//! outputs off the nodes that produce them.

pub mod builder;
pub mod graph;
pub mod model;
pub mod outputs;

pub use builder::{GraphBuilder, layer_label};
pub use graph::{Edge, Graph, GraphDefaults, GraphNode, NodeId, OutputId, RankDir, Shape};
pub use model::{Activation, InputSpec, Layer, LayerKind, Model, ModelNode, NodeKind, OutputSpec};
pub use netdraw_error::{Error, ErrorKind, Result};
pub use outputs::{DEFAULT_MAX_OUTPUTS, OutputAggregator, OutputOptions};

/// Build the complete graph for a model: model nodes first, outputs second.
pub fn build_model_graph(
    model: &Model,
    defaults: GraphDefaults,
    options: OutputOptions,
) -> Result<Graph> {
    let mut graph = GraphBuilder::new(model, defaults).build()?;
    OutputAggregator::new(model, options).extend(&mut graph)?;
    Ok(graph)
}
