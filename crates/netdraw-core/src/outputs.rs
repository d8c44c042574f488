//! Terminal nodes for the model's named outputs.

use tracing::{debug, warn};

use netdraw_error::{Error, Result};

use crate::graph::{Graph, GraphNode, NodeId, Shape};
use crate::model::{Model, OutputSpec};

/// Default collapse threshold.
pub const DEFAULT_MAX_OUTPUTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Outputs with more labels than this collapse into one summary node.
    pub max_outputs: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            max_outputs: DEFAULT_MAX_OUTPUTS,
        }
    }
}

impl OutputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_outputs(mut self, max_outputs: usize) -> Self {
        self.max_outputs = max_outputs;
        self
    }
}

/// Appends one node per output label, or one summary node per output whose
/// label count exceeds `max_outputs`, each wired to its originating node.
#[derive(Debug)]
pub struct OutputAggregator<'m> {
    model: &'m Model,
    options: OutputOptions,
}

impl<'m> OutputAggregator<'m> {
    pub fn new(model: &'m Model, options: OutputOptions) -> Self {
        Self { model, options }
    }

    pub fn extend(&self, graph: &mut Graph) -> Result<()> {
        for (name, spec) in &self.model.outputs {
            let source = NodeId::Model(spec.node_index);
            if !graph.contains(&source) {
                return Err(Error::invalid_reference(
                    "nodes",
                    spec.node_index,
                    self.model.nodes.len(),
                )
                .with_operation("outputs::extend")
                .with_context("output", name.clone()));
            }

            for (id, label) in self.terminals(name, spec) {
                attach(graph, &source, id, label, name);
            }
        }
        Ok(())
    }

    /// Synthetic node ids and labels for one output.
    fn terminals(&self, name: &str, spec: &OutputSpec) -> Vec<(NodeId, String)> {
        let count = spec.labels.len();
        if count > self.options.max_outputs {
            debug!(output = name, count, "collapsing output");
            vec![(
                NodeId::output(spec.node_index, name),
                format!("{}({})", name, count),
            )]
        } else {
            spec.labels
                .iter()
                .map(|label| (NodeId::output(spec.node_index, label.as_str()), label.clone()))
                .collect()
        }
    }
}

fn attach(graph: &mut Graph, source: &NodeId, id: NodeId, label: String, output: &str) {
    let replaced = graph.insert_node(GraphNode {
        id: id.clone(),
        label,
        shape: Shape::Default,
    });
    if let Some(previous) = replaced {
        warn!(
            id = %id,
            output,
            previous = %previous.label,
            "output node id collides with an earlier one, label overwritten"
        );
    }
    graph.add_edge(source.clone(), id);
}
